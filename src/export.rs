//! Export filled documents to a user-visible directory

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Copy a file into `dest_dir` under `file_name` and return the destination.
///
/// The destination directory is created if needed; an existing file with the
/// same name is overwritten. The copy is byte identical.
pub fn export_to_dir<P, Q>(source: P, dest_dir: Q, file_name: &str) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref();
    if !source.exists() {
        return Err(Error::TemplateNotFound {
            path: source.display().to_string(),
        });
    }

    let dest_dir = dest_dir.as_ref();
    std::fs::create_dir_all(dest_dir)?;

    let destination = dest_dir.join(file_name);
    std::fs::copy(source, &destination)?;
    Ok(destination)
}
