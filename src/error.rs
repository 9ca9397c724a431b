use std::path::PathBuf;

/// Failures the comparison can hit.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A root argument is missing or not a directory. Fatal.
    #[error("{label}: {} is not a valid directory", path.display())]
    InvalidRoot { label: &'static str, path: PathBuf },
    /// A single file could not be read. The file is skipped.
    #[error("failed to read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Checks that `path` exists and is a directory.
///
/// # Errors
/// Returns [`CompareError::InvalidRoot`] naming `label` otherwise.
pub fn ensure_dir(label: &'static str, path: &std::path::Path) -> Result<(), CompareError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CompareError::InvalidRoot {
            label,
            path: path.to_path_buf(),
        })
    }
}
