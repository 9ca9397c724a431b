use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// One regular file found under a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub relative_path: String,
    /// Raw on-disk size, before normalization.
    pub size: u64,
    /// Lowercase hex BLAKE3 digest of the normalized content.
    pub content_hash: String,
    pub absolute_path: PathBuf,
}

/// Relative path (forward slashes) to file info, in walk order.
pub type Index = IndexMap<String, FileInfo>;

/// A file that could not be indexed or verified. It is left out of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub path: String,
    pub message: String,
}

/// What one walk of a root produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub index: Index,
    pub warnings: Vec<ScanWarning>,
}

/// Every relative path of both roots, in exactly one list, each sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub identical: Vec<String>,
    pub different: Vec<String>,
    pub only_in_left: Vec<String>,
    pub only_in_right: Vec<String>,
}

impl ClassificationResult {
    pub fn summary(&self) -> Summary {
        let unique = self.only_in_left.len() + self.only_in_right.len();
        Summary {
            total: self.identical.len() + self.different.len() + unique,
            identical: self.identical.len(),
            different: self.different.len(),
            unique,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub identical: usize,
    pub different: usize,
    pub unique: usize,
}
