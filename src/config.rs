//! Runtime configuration

use crate::source::TemplateSource;
use std::path::PathBuf;

/// Template URL the demo form ships with.
pub const DEMO_TEMPLATE_URL: &str =
    "https://firebasestorage.googleapis.com/v0/b/rfahmi-id.appspot.com/o/docs%2Facroform.pdf?alt=media&token=f3fc84be-e296-44b8-a9fc-162cf4ae08a8";

/// File name used when exporting without an explicit name.
pub const DEFAULT_EXPORT_NAME: &str = "PDF_Download.pdf";

/// Resource configuration for the fill pipeline
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the blank template comes from
    pub template_source: TemplateSource,
    /// Directory holding the cached template and the filled output
    pub cache_dir: PathBuf,
    /// Directory exported files are copied into
    pub download_dir: PathBuf,
    /// Maximum download size in bytes for URL sources (default: 100MB)
    pub max_download_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            template_source: TemplateSource::Url {
                url: DEMO_TEMPLATE_URL.to_string(),
            },
            cache_dir: std::env::temp_dir().join("acrofill"),
            download_dir: default_download_dir(),
            max_download_bytes: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Resolve the platform download directory.
///
/// `ACROFILL_DOWNLOAD_DIR` wins, then `$HOME/Downloads`, then the current
/// directory.
pub fn default_download_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ACROFILL_DOWNLOAD_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join("Downloads");
    }
    PathBuf::from(".")
}
