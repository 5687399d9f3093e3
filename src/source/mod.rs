//! Template acquisition layer
//!
//! Resolves the blank form template from a URL, a local path, or inline
//! base64 data, and persists it in the on-disk cache.

mod cache;
mod resolver;

pub use cache::TemplateCache;
pub use resolver::{resolve, ResolvedTemplate, TemplateSource};
