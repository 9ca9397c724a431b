//! Compare two directory trees file-by-file, treating CRLF, CR and LF line
//! endings as equal.
//!
//! The pipeline is linear: [`indexer::build_index`] walks and hashes each
//! root, [`compare::classify`] splits the union of paths into identical,
//! different and one-sided files, and [`formatters::text::render`] prints it.

pub mod cli;
pub mod compare;
pub mod error;
pub mod formatters;
pub mod indexer;
pub mod logging;
pub mod normalize;
pub mod traversal;
pub mod types;

pub use compare::classify;
pub use error::CompareError;
pub use indexer::build_index;
pub use normalize::normalize;
pub use types::{ClassificationResult, FileInfo, Index};
