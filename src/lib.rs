//! acrofill Library
//!
//! This crate fills AcroForm PDF templates from user data:
//! - `source`: fetch the blank template (URL, path, or base64) and cache it
//! - `form`: enumerate and fill named text fields
//! - `export`: copy the filled document to the download directory
//! - `pipeline`: the generate/download flow with log-and-absent error handling

pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod pipeline;
pub mod source;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use form::{fill_text_fields, list_fields, FieldMapping, FillReport, FormFieldInfo};
pub use pipeline::{download, generate, UserData};
pub use source::{TemplateCache, TemplateSource};
