use std::path::Path;

use serde::Serialize;

use crate::types::{ClassificationResult, ScanWarning, Summary};

#[derive(Debug, Serialize)]
pub struct RootRef<'a> {
    pub name: &'a str,
    pub root: String,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub left: RootRef<'a>,
    pub right: RootRef<'a>,
    #[serde(flatten)]
    pub result: &'a ClassificationResult,
    pub summary: Summary,
    pub warnings: &'a [ScanWarning],
}

/// Full, untruncated result as pretty JSON.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn format(
    result: &ClassificationResult,
    left: (&str, &Path),
    right: (&str, &Path),
    warnings: &[ScanWarning],
) -> serde_json::Result<String> {
    let report = JsonReport {
        left: RootRef {
            name: left.0,
            root: left.1.display().to_string(),
        },
        right: RootRef {
            name: right.0,
            root: right.1.display().to_string(),
        },
        result,
        summary: result.summary(),
        warnings,
    };
    serde_json::to_string_pretty(&report)
}
