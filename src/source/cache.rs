//! On-disk cache for the template and the filled output
//!
//! The cache holds exactly two well-known files: the most recently fetched
//! blank template and the most recently produced filled document. Both are
//! overwritten in place; the filled output is additionally unlinked before
//! each rewrite so a failed write never leaves a stale mix of runs.

use crate::error::Result;
use std::path::{Path, PathBuf};

const TEMPLATE_FILE: &str = "template.pdf";
const FILLED_FILE: &str = "filled.pdf";

/// Fixed-path cache for pipeline artifacts
#[derive(Debug, Clone)]
pub struct TemplateCache {
    dir: PathBuf,
}

impl TemplateCache {
    /// Create a cache rooted at the given directory.
    /// The directory is created on first write, not here.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the blank template is cached at
    pub fn template_path(&self) -> PathBuf {
        self.dir.join(TEMPLATE_FILE)
    }

    /// Path the filled output is written to
    pub fn filled_path(&self) -> PathBuf {
        self.dir.join(FILLED_FILE)
    }

    /// Persist fetched template bytes, overwriting any previous copy.
    pub fn store_template(&self, data: &[u8]) -> Result<PathBuf> {
        let path = self.template_path();
        self.write(&path, data)?;
        Ok(path)
    }

    /// Read the cached template back.
    pub fn load_template(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(self.template_path())?)
    }

    /// Persist filled output bytes.
    ///
    /// The previous output is unlinked first; a missing file counts as
    /// success so the first run behaves like every later one.
    pub fn store_filled(&self, data: &[u8]) -> Result<PathBuf> {
        let path = self.filled_path();
        remove_if_exists(&path)?;
        self.write(&path, data)?;
        Ok(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

/// Delete a file, treating "not found" as success.
fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
