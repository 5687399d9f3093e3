//! Source resolution for the form template

use crate::error::{Error, Result};
use base64::Engine;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};

/// Where the blank template comes from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Download over HTTP(S)
    Url { url: String },
    /// Read from the local file system
    Path { path: PathBuf },
    /// Inline base64 encoded document
    Base64 { base64: String },
}

impl TemplateSource {
    /// Human readable name for logs
    pub fn name(&self) -> String {
        match self {
            TemplateSource::Url { url } => url.clone(),
            TemplateSource::Path { path } => path.display().to_string(),
            TemplateSource::Base64 { .. } => "<base64>".to_string(),
        }
    }
}

/// Resolved template data
pub struct ResolvedTemplate {
    pub data: Vec<u8>,
    pub source_name: String,
}

/// Resolve a template source to raw document bytes.
///
/// A single best-effort attempt: no auth, no retries.
pub async fn resolve(source: &TemplateSource, max_download_bytes: u64) -> Result<ResolvedTemplate> {
    match source {
        TemplateSource::Url { url } => resolve_url(url, max_download_bytes).await,
        TemplateSource::Path { path } => resolve_path(path),
        TemplateSource::Base64 { base64 } => resolve_base64(base64),
    }
}

/// Resolve a file path to template data
pub fn resolve_path<P: AsRef<Path>>(path: P) -> Result<ResolvedTemplate> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::TemplateNotFound {
            path: path.display().to_string(),
        });
    }

    let data = std::fs::read(path).map_err(Error::Io)?;
    validate_pdf_header(&data)?;

    Ok(ResolvedTemplate {
        data,
        source_name: path.display().to_string(),
    })
}

/// Resolve base64 encoded data to template data
pub fn resolve_base64(base64_data: &str) -> Result<ResolvedTemplate> {
    let engine = base64::engine::general_purpose::STANDARD;
    let data = engine.decode(base64_data)?;
    validate_pdf_header(&data)?;

    Ok(ResolvedTemplate {
        data,
        source_name: "<base64>".to_string(),
    })
}

/// Resolve a URL to template data with a download size limit
pub async fn resolve_url(url: &str, max_download_bytes: u64) -> Result<ResolvedTemplate> {
    // Reject malformed URLs before issuing the request
    url::Url::parse(url).map_err(|e| Error::SourceResolution {
        reason: format!("Invalid URL: {}", e),
    })?;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .map_err(Error::HttpRequest)?;

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::SourceResolution {
            reason: format!("HTTP request failed with status: {}", response.status()),
        });
    }

    // Check Content-Length header for early rejection
    if let Some(content_length) = response.content_length() {
        if content_length > max_download_bytes {
            return Err(Error::DownloadTooLarge {
                size: content_length,
                max_size: max_download_bytes,
            });
        }
    }

    // Stream the body with incremental size checking to prevent OOM
    let mut data = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Error::HttpRequest)?;
        data.extend_from_slice(&chunk);
        if data.len() as u64 > max_download_bytes {
            return Err(Error::DownloadTooLarge {
                size: data.len() as u64,
                max_size: max_download_bytes,
            });
        }
    }

    validate_pdf_header(&data)?;

    Ok(ResolvedTemplate {
        data,
        source_name: url.to_string(),
    })
}

fn validate_pdf_header(data: &[u8]) -> Result<()> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: "Data is not a valid PDF file".to_string(),
        });
    }
    Ok(())
}
