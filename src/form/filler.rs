//! Write text values into named AcroForm fields

use crate::error::{Error, Result};
use crate::form::fields::{
    acroform_fields, collect_terminal_fields, encode_pdf_text, AcroFormLocation,
};
use lopdf::{Document, Object};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Mapping from form field name to the text to display in it.
///
/// Keys are fixed by the template's authoring, not derived dynamically.
pub type FieldMapping = BTreeMap<String, String>;

/// A mapping entry that was not applied
#[derive(Debug, Clone, Serialize)]
pub struct SkippedField {
    pub name: String,
    pub reason: String,
}

/// Outcome of a fill pass
#[derive(Debug, Clone, Serialize)]
pub struct FillReport {
    /// Number of fields whose value was set
    pub fields_filled: u32,
    /// Mapping entries that matched no text field
    pub skipped: Vec<SkippedField>,
}

/// Fill text fields in a document and return the modified bytes.
///
/// Each mapping entry that names a text field (`/FT /Tx`) gets its `/V`
/// replaced and its stale appearance stream dropped; `/NeedAppearances` is
/// set so viewers regenerate the rendering. Entries naming an unknown field
/// or a non-text field are skipped without error and reported. Fields not
/// named by the mapping are left untouched.
pub fn fill_text_fields(data: &[u8], mapping: &FieldMapping) -> Result<(Vec<u8>, FillReport)> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: "Not a valid PDF file".to_string(),
        });
    }

    let mut doc = Document::load_mem(data)?;

    let (_, acroform_location) = acroform_fields(&doc)?;
    let terminals = collect_terminal_fields(&doc)?;

    let mut fields_filled = 0u32;
    let mut skipped = Vec::new();
    let mut matched: HashSet<&str> = HashSet::new();

    for field in &terminals {
        let Some(value) = mapping.get(&field.name) else {
            continue;
        };
        matched.insert(field.name.as_str());

        if field.field_type.as_deref() != Some(b"Tx".as_slice()) {
            skipped.push(SkippedField {
                name: field.name.clone(),
                reason: "Not a text field".to_string(),
            });
            continue;
        }

        let dict = doc.get_object_mut(field.id)?.as_dict_mut()?;
        dict.set("V", encode_pdf_text(value));
        dict.remove(b"AP");

        // Separate widget annotations carry their own appearance streams
        for widget_id in &field.widget_ids {
            if let Ok(widget) = doc
                .get_object_mut(*widget_id)
                .and_then(|obj| obj.as_dict_mut())
            {
                widget.remove(b"AP");
            }
        }

        fields_filled += 1;
    }

    for name in mapping.keys() {
        if !matched.contains(name.as_str()) {
            skipped.push(SkippedField {
                name: name.clone(),
                reason: "Field not found in document".to_string(),
            });
        }
    }

    set_need_appearances(&mut doc, acroform_location)?;

    let mut output = Vec::new();
    doc.save_to(&mut output)?;

    Ok((
        output,
        FillReport {
            fields_filled,
            skipped,
        },
    ))
}

fn set_need_appearances(doc: &mut Document, location: AcroFormLocation) -> Result<()> {
    match location {
        AcroFormLocation::Indirect(id) => {
            let acro = doc.get_object_mut(id)?.as_dict_mut()?;
            acro.set("NeedAppearances", Object::Boolean(true));
        }
        AcroFormLocation::InCatalog(catalog_id) => {
            let catalog = doc.get_object_mut(catalog_id)?.as_dict_mut()?;
            let acro = catalog.get_mut(b"AcroForm")?.as_dict_mut()?;
            acro.set("NeedAppearances", Object::Boolean(true));
        }
    }
    Ok(())
}
