use std::collections::BTreeSet;
use std::fs;

use tracing::{debug, warn};

use crate::normalize::normalized_eq;
use crate::types::{ClassificationResult, Index, ScanWarning};

/// Sorts every path of `left ∪ right` into exactly one bucket.
///
/// Paths on both sides are identical iff their content hashes match; size
/// plays no part.
pub fn classify(left: &Index, right: &Index) -> ClassificationResult {
    let all: BTreeSet<&str> = left
        .keys()
        .chain(right.keys())
        .map(String::as_str)
        .collect();

    let mut out = ClassificationResult::default();
    for rel in all {
        match (left.get(rel), right.get(rel)) {
            (Some(l), Some(r)) if l.content_hash == r.content_hash => {
                out.identical.push(rel.to_string());
            }
            (Some(_), Some(_)) => out.different.push(rel.to_string()),
            (Some(_), None) => out.only_in_left.push(rel.to_string()),
            (None, Some(_)) => out.only_in_right.push(rel.to_string()),
            (None, None) => unreachable!("key came from one of the indexes"),
        }
    }
    out
}

/// Re-reads both sides of every identical path and compares normalized bytes.
///
/// Paths whose content turns out to differ, or that can no longer be read,
/// move to `different` (kept sorted). Read failures are returned as warnings.
pub fn verify_identical(
    result: &mut ClassificationResult,
    left: &Index,
    right: &Index,
) -> Vec<ScanWarning> {
    let mut warnings = Vec::new();
    let mut demoted = Vec::new();

    result.identical.retain(|rel| {
        let (Some(l), Some(r)) = (left.get(rel), right.get(rel)) else {
            return true;
        };
        let read = fs::read(&l.absolute_path).and_then(|a| Ok((a, fs::read(&r.absolute_path)?)));
        match read {
            Ok((a, b)) if normalized_eq(&a, &b) => true,
            Ok(_) => {
                warn!("{rel}: hashes match but content differs");
                demoted.push(rel.clone());
                false
            }
            Err(err) => {
                warn!("{rel}: verification read failed: {err}");
                warnings.push(ScanWarning {
                    path: rel.clone(),
                    message: format!("verification failed: {err}"),
                });
                demoted.push(rel.clone());
                false
            }
        }
    });

    if !demoted.is_empty() {
        debug!("{} paths demoted to different", demoted.len());
        result.different.extend(demoted);
        result.different.sort_unstable();
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileInfo;
    use std::path::PathBuf;

    fn index(entries: &[(&str, &str)]) -> Index {
        entries
            .iter()
            .map(|(path, hash)| {
                (
                    (*path).to_string(),
                    FileInfo {
                        relative_path: (*path).to_string(),
                        size: 0,
                        content_hash: (*hash).to_string(),
                        absolute_path: PathBuf::from(path),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn three_way_split_sorted() {
        let left = index(&[("z.txt", "1"), ("b.txt", "2"), ("a.txt", "3"), ("l.txt", "4")]);
        let right = index(&[("a.txt", "3"), ("b.txt", "9"), ("z.txt", "1"), ("r.txt", "5")]);
        let r = classify(&left, &right);
        assert_eq!(r.identical, vec!["a.txt", "z.txt"]);
        assert_eq!(r.different, vec!["b.txt"]);
        assert_eq!(r.only_in_left, vec!["l.txt"]);
        assert_eq!(r.only_in_right, vec!["r.txt"]);
    }

    #[test]
    fn partitions_the_key_union() {
        let left = index(&[("a", "1"), ("b", "2"), ("c", "3"), ("d/e", "4")]);
        let right = index(&[("b", "2"), ("c", "x"), ("f", "6"), ("d/e", "4")]);
        let r = classify(&left, &right);

        let mut seen: Vec<&String> = r
            .identical
            .iter()
            .chain(&r.different)
            .chain(&r.only_in_left)
            .chain(&r.only_in_right)
            .collect();
        let n = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), n, "a path landed in two lists");

        let union: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
        assert_eq!(seen, union.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn same_index_is_all_identical() {
        let left = index(&[("b", "2"), ("a", "1"), ("c/d", "3")]);
        let r = classify(&left, &left.clone());
        assert_eq!(r.identical, vec!["a", "b", "c/d"]);
        assert!(r.different.is_empty());
        assert!(r.only_in_left.is_empty());
        assert!(r.only_in_right.is_empty());
    }

    #[test]
    fn size_does_not_decide_equality() {
        let mut left = index(&[("f", "same")]);
        let right = index(&[("f", "same")]);
        left.get_mut("f").unwrap().size = 100;
        assert_eq!(classify(&left, &right).identical, vec!["f"]);
    }

    #[test]
    fn empty_indexes() {
        let r = classify(&Index::new(), &Index::new());
        assert_eq!(r, ClassificationResult::default());
        assert_eq!(r.summary().total, 0);
    }

    #[test]
    fn verify_demotes_forged_collision() {
        let dir = tempfile::tempdir().unwrap();
        let lp = dir.path().join("l.txt");
        let rp = dir.path().join("r.txt");
        std::fs::write(&lp, "one\r\n").unwrap();
        std::fs::write(&rp, "two\n").unwrap();

        let mut left = index(&[("f.txt", "h"), ("ok.txt", "k")]);
        let mut right = index(&[("f.txt", "h"), ("ok.txt", "k")]);
        left.get_mut("f.txt").unwrap().absolute_path = lp.clone();
        right.get_mut("f.txt").unwrap().absolute_path = rp;
        left.get_mut("ok.txt").unwrap().absolute_path = lp;
        right.get_mut("ok.txt").unwrap().absolute_path = dir.path().join("one.txt");
        std::fs::write(dir.path().join("one.txt"), "one\n").unwrap();

        let mut r = classify(&left, &right);
        assert_eq!(r.identical, vec!["f.txt", "ok.txt"]);
        let warnings = verify_identical(&mut r, &left, &right);
        assert!(warnings.is_empty());
        assert_eq!(r.identical, vec!["ok.txt"]);
        assert_eq!(r.different, vec!["f.txt"]);
    }

    #[test]
    fn verify_read_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut left = index(&[("gone.txt", "h")]);
        let mut right = index(&[("gone.txt", "h")]);
        left.get_mut("gone.txt").unwrap().absolute_path = dir.path().join("a");
        right.get_mut("gone.txt").unwrap().absolute_path = dir.path().join("b");

        let mut r = classify(&left, &right);
        let warnings = verify_identical(&mut r, &left, &right);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "gone.txt");
        assert!(r.identical.is_empty());
        assert_eq!(r.different, vec!["gone.txt"]);
    }
}
