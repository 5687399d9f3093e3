//! AcroForm field tree traversal

use crate::error::{Error, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;

/// Information about a single form field
#[derive(Debug, Clone, Serialize)]
pub struct FormFieldInfo {
    /// Fully qualified field name (e.g. `name[first]` or `address.street`)
    pub name: String,
    /// Field type: "text", "button", "choice", "signature", or "unknown"
    pub field_type: String,
    /// Current field value, if any
    pub value: Option<String>,
}

/// A terminal field in the AcroForm tree, resolved to its object id.
#[derive(Debug)]
pub(crate) struct TerminalField {
    pub id: ObjectId,
    /// Fully qualified name, `.`-joined through the parent chain
    pub name: String,
    /// Raw `/FT` name, inherited from the parent when absent
    pub field_type: Option<Vec<u8>>,
    /// Widget-only kids (no `/T` of their own) carrying appearance streams
    pub widget_ids: Vec<ObjectId>,
}

/// Where the AcroForm dictionary lives, for later mutation.
#[derive(Debug, Clone, Copy)]
pub(crate) enum AcroFormLocation {
    /// Indirect object referenced from the catalog
    Indirect(ObjectId),
    /// Dictionary stored inline in the catalog
    InCatalog(ObjectId),
}

/// Locate the AcroForm dictionary and its top-level field references.
pub(crate) fn acroform_fields(doc: &Document) -> Result<(Vec<ObjectId>, AcroFormLocation)> {
    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_object(catalog_id)?.as_dict()?;

    let (acro_dict, location): (&Dictionary, AcroFormLocation) =
        match catalog.get(b"AcroForm") {
            Ok(Object::Reference(id)) => (
                doc.get_object(*id)?.as_dict()?,
                AcroFormLocation::Indirect(*id),
            ),
            Ok(Object::Dictionary(dict)) => (dict, AcroFormLocation::InCatalog(catalog_id)),
            _ => return Err(Error::MissingAcroForm),
        };

    let fields = acro_dict.get(b"Fields")?.as_array()?;
    let ids = fields
        .iter()
        .filter_map(|obj| obj.as_reference().ok())
        .collect();

    Ok((ids, location))
}

/// Walk the field tree and collect terminal fields with qualified names.
///
/// A node with `/Kids` is a container when any kid carries its own `/T`;
/// otherwise the kids are widget annotations of the node itself.
pub(crate) fn collect_terminal_fields(doc: &Document) -> Result<Vec<TerminalField>> {
    let (top_ids, _) = acroform_fields(doc)?;
    let mut out = Vec::new();
    for id in top_ids {
        walk_field(doc, id, None, None, &mut out);
    }
    Ok(out)
}

fn walk_field(
    doc: &Document,
    id: ObjectId,
    prefix: Option<&str>,
    inherited_ft: Option<&[u8]>,
    out: &mut Vec<TerminalField>,
) {
    let Ok(dict) = doc.get_object(id).and_then(|o| o.as_dict()) else {
        return;
    };

    let partial = dict
        .get(b"T")
        .ok()
        .and_then(|obj| resolve_string(doc, obj));
    let qualified = match (prefix, partial.as_deref()) {
        (Some(p), Some(t)) => format!("{}.{}", p, t),
        (Some(p), None) => p.to_string(),
        (None, Some(t)) => t.to_string(),
        (None, None) => return, // nameless top-level node, nothing addressable
    };

    let field_type: Option<Vec<u8>> = match dict.get(b"FT") {
        Ok(Object::Name(name)) => Some(name.clone()),
        _ => inherited_ft.map(|ft| ft.to_vec()),
    };

    let kid_ids: Vec<ObjectId> = match dict.get(b"Kids").and_then(|o| o.as_array()) {
        Ok(kids) => kids.iter().filter_map(|k| k.as_reference().ok()).collect(),
        Err(_) => Vec::new(),
    };

    let kids_are_fields = kid_ids.iter().any(|kid| {
        doc.get_object(*kid)
            .and_then(|o| o.as_dict())
            .map(|d| d.has(b"T"))
            .unwrap_or(false)
    });

    if !kid_ids.is_empty() && kids_are_fields {
        for kid in kid_ids {
            walk_field(doc, kid, Some(&qualified), field_type.as_deref(), out);
        }
    } else {
        out.push(TerminalField {
            id,
            name: qualified,
            field_type,
            widget_ids: kid_ids,
        });
    }
}

/// Enumerate all form fields in a document.
///
/// A document without an AcroForm yields an empty list rather than an error.
pub fn list_fields(data: &[u8]) -> Result<Vec<FormFieldInfo>> {
    let doc = Document::load_mem(data)?;

    let terminals = match collect_terminal_fields(&doc) {
        Ok(t) => t,
        Err(Error::MissingAcroForm) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let infos = terminals
        .iter()
        .map(|field| {
            let value = doc
                .get_object(field.id)
                .and_then(|o| o.as_dict())
                .ok()
                .and_then(|dict| dict.get(b"V").ok())
                .and_then(|obj| resolve_string(&doc, obj));
            FormFieldInfo {
                name: field.name.clone(),
                field_type: field_type_name(field.field_type.as_deref()).to_string(),
                value,
            }
        })
        .collect();

    Ok(infos)
}

fn field_type_name(ft: Option<&[u8]>) -> &'static str {
    match ft {
        Some(b"Tx") => "text",
        Some(b"Btn") => "button",
        Some(b"Ch") => "choice",
        Some(b"Sig") => "signature",
        _ => "unknown",
    }
}

/// Resolve an object (following one level of indirection) to a text string.
fn resolve_string(doc: &Document, obj: &Object) -> Option<String> {
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_text(bytes)),
        Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1.
pub(crate) fn decode_pdf_text(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Encode a text value as a PDF string object.
///
/// ASCII stays a literal string; anything else becomes UTF-16BE with BOM.
pub(crate) fn encode_pdf_text(value: &str) -> Object {
    if value.is_ascii() {
        Object::string_literal(value)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in value.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, lopdf::StringFormat::Hexadecimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_ascii() {
        assert_eq!(decode_pdf_text(b"email"), "email");
    }

    #[test]
    fn test_decode_utf16be() {
        // BOM + "ab"
        let bytes = [0xFE, 0xFF, 0x00, 0x61, 0x00, 0x62];
        assert_eq!(decode_pdf_text(&bytes), "ab");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // 0xE9 is not valid standalone UTF-8; Latin-1 maps it to 'é'
        assert_eq!(decode_pdf_text(&[0xE9]), "é");
    }

    #[test]
    fn test_encode_ascii_is_literal() {
        match encode_pdf_text("a@b.com") {
            Object::String(bytes, lopdf::StringFormat::Literal) => {
                assert_eq!(bytes, b"a@b.com");
            }
            other => panic!("expected literal string, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_non_ascii_round_trips() {
        match encode_pdf_text("Łukasz") {
            Object::String(bytes, _) => {
                assert_eq!(decode_pdf_text(&bytes), "Łukasz");
            }
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(field_type_name(Some(b"Tx")), "text");
        assert_eq!(field_type_name(Some(b"Btn")), "button");
        assert_eq!(field_type_name(Some(b"Ch")), "choice");
        assert_eq!(field_type_name(Some(b"Sig")), "signature");
        assert_eq!(field_type_name(None), "unknown");
    }

    #[test]
    fn test_list_fields_no_acroform() {
        use lopdf::{dictionary, Document, Object, ObjectId};

        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();

        assert!(list_fields(&buf).unwrap().is_empty());
    }
}
