//! AcroForm processing layer
//!
//! Parses the template with lopdf, enumerates the interactive form field
//! tree, and writes text values back into named fields.

mod fields;
mod filler;

pub use fields::{list_fields, FormFieldInfo};
pub use filler::{fill_text_fields, FieldMapping, FillReport, SkippedField};
