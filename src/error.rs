//! Error types for acrofill

use thiserror::Error;

/// Result type alias for acrofill
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for acrofill
#[derive(Error, Debug)]
pub enum Error {
    /// Template file not found
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// Document has no interactive form
    #[error("Document has no AcroForm")]
    MissingAcroForm,

    /// Source resolution error
    #[error("Failed to resolve template source: {reason}")]
    SourceResolution { reason: String },

    /// Base64 decode error
    #[error("Invalid base64 data: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF parse/serialize error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Download too large
    #[error("Download too large: {size} bytes (max: {max_size} bytes)")]
    DownloadTooLarge { size: u64, max_size: u64 },
}
