//! The generate/download pipeline
//!
//! Three stages run strictly in sequence: fetch the template into the cache,
//! fill its text fields, export the result. Each stage is a single
//! best-effort attempt; failures are logged at the stage boundary and
//! surfaced to callers only as an absent path.

use crate::config::AppConfig;
use crate::error::Result;
use crate::export::export_to_dir;
use crate::form::{fill_text_fields, FieldMapping};
use crate::source::{resolve, TemplateCache};
use std::path::{Path, PathBuf};

/// The values collected by the form screen
#[derive(Debug, Clone, Default)]
pub struct UserData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_area: String,
    pub phone_number: String,
}

impl UserData {
    /// Mapping onto the field names the demo template defines.
    pub fn field_mapping(&self) -> FieldMapping {
        FieldMapping::from([
            ("name[first]".to_string(), self.first_name.clone()),
            ("name[last]".to_string(), self.last_name.clone()),
            ("email".to_string(), self.email.clone()),
            ("phone[area]".to_string(), self.phone_area.clone()),
            ("phone[phone]".to_string(), self.phone_number.clone()),
        ])
    }
}

/// Fetch the template into the cache, returning the cache path.
///
/// Returns `None` on any network or write error; the caller must treat an
/// absent path as "cannot proceed".
pub async fn store_template_cache(config: &AppConfig) -> Option<PathBuf> {
    match try_store_template_cache(config).await {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Template cached");
            Some(path)
        }
        Err(e) => {
            tracing::error!(
                source = %config.template_source.name(),
                error = %e,
                "Failed to fetch template"
            );
            None
        }
    }
}

async fn try_store_template_cache(config: &AppConfig) -> Result<PathBuf> {
    let resolved = resolve(&config.template_source, config.max_download_bytes).await?;
    let cache = TemplateCache::new(&config.cache_dir);
    cache.store_template(&resolved.data)
}

/// Fill the cached template with the given mapping, returning the output path.
///
/// Unknown field names in the mapping are ignored; any parse or I/O failure
/// is logged and yields `None`.
pub fn fill_template(
    config: &AppConfig,
    template_path: &Path,
    mapping: &FieldMapping,
) -> Option<PathBuf> {
    match try_fill_template(config, template_path, mapping) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Filled document written");
            Some(path)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fill template");
            None
        }
    }
}

fn try_fill_template(
    config: &AppConfig,
    template_path: &Path,
    mapping: &FieldMapping,
) -> Result<PathBuf> {
    let template = std::fs::read(template_path)?;
    let (filled, report) = fill_text_fields(&template, mapping)?;

    for skip in &report.skipped {
        tracing::debug!(field = %skip.name, reason = %skip.reason, "Mapping entry skipped");
    }
    tracing::debug!(fields_filled = report.fields_filled, "Fill pass complete");

    let cache = TemplateCache::new(&config.cache_dir);
    cache.store_filled(&filled)
}

/// Run fetch then fill; the "Generate" action.
pub async fn generate(config: &AppConfig, user_data: &UserData) -> Option<PathBuf> {
    let template_path = store_template_cache(config).await?;
    fill_template(config, &template_path, &user_data.field_mapping())
}

/// Copy a filled document into the download directory; the "Download" action.
pub fn download(config: &AppConfig, filled_path: &Path, file_name: &str) -> Option<PathBuf> {
    match export_to_dir(filled_path, &config.download_dir, file_name) {
        Ok(dest) => {
            tracing::info!(path = %dest.display(), "Document exported");
            Some(dest)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to export document");
            None
        }
    }
}
