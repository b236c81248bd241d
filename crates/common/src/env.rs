//! Environment/runtime helpers
//!
//! Sanity checks so the data file can be written once the server is up.

use std::fs::Metadata;
use std::io;
use std::path::Path;

use tracing::{info, warn};

/// What startup found at the configured data path.
#[derive(Debug, PartialEq, Eq)]
pub enum DataFileState {
    Existing,
    Missing,
    NotAFile,
    Unreadable(io::ErrorKind),
}

impl DataFileState {
    pub fn from_metadata(meta: io::Result<Metadata>) -> Self {
        match meta {
            Ok(meta) if meta.is_file() => Self::Existing,
            Ok(_) => Self::NotAFile,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::Missing,
            Err(e) => Self::Unreadable(e.kind()),
        }
    }
}

/// Ensure the directory holding `data_file` exists.
///
/// A bare file name (no parent) lives in the working directory and needs
/// nothing. A data file that exists but is not a regular file is reported
/// but not treated as fatal; the first store operation will surface it.
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }

    match DataFileState::from_metadata(tokio::fs::metadata(data_file).await) {
        DataFileState::Existing => info!(path = %data_file.display(), "using existing data file"),
        DataFileState::Missing => info!(path = %data_file.display(), "data file not found; starting with an empty store"),
        DataFileState::NotAFile => {
            warn!(path = %data_file.display(), "data path exists but is not a regular file");
        }
        DataFileState::Unreadable(kind) => {
            warn!(path = %data_file.display(), error = %kind, "cannot inspect data file");
        }
    }
    Ok(())
}
