use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::CompareError;
use crate::normalize::normalize;
use crate::traversal::{TraversalOptions, WalkedFile, collect_files};
use crate::types::{FileInfo, ScanOutcome, ScanWarning};

/// Hex BLAKE3 digest of `bytes` after line-ending normalization.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(&normalize(bytes)).to_hex().to_string()
}

/// Reads one file fully and builds its [`FileInfo`].
///
/// The handle is closed before this returns, on success or failure.
///
/// # Errors
/// Returns [`CompareError::FileAccess`] if the file cannot be read.
pub fn index_file(file: &WalkedFile) -> Result<FileInfo, CompareError> {
    let bytes = fs::read(&file.absolute_path).map_err(|source| CompareError::FileAccess {
        path: file.absolute_path.clone(),
        source,
    })?;
    Ok(FileInfo {
        relative_path: file.relative_path.clone(),
        size: bytes.len() as u64,
        content_hash: content_hash(&bytes),
        absolute_path: file.absolute_path.clone(),
    })
}

/// Walks `root` and hashes every file under it.
///
/// A file that fails to read is logged, recorded in `warnings` and left
/// out of the index; the walk carries on. `on_file` is called once per
/// file attempted.
pub fn build_index_with(
    root: &Path,
    opts: TraversalOptions,
    mut on_file: impl FnMut(&str),
) -> ScanOutcome {
    let collected = collect_files(root, opts);
    info!(
        "{}: {} files to hash",
        root.display(),
        collected.files.len()
    );

    let mut outcome = ScanOutcome {
        warnings: collected.errors,
        ..Default::default()
    };
    for w in &outcome.warnings {
        warn!("{}: {}", w.path, w.message);
    }

    for file in &collected.files {
        on_file(&file.relative_path);
        match index_file(file) {
            Ok(fi) => {
                debug!("{} {}", fi.content_hash, fi.relative_path);
                outcome.index.insert(fi.relative_path.clone(), fi);
            }
            Err(err) => {
                warn!("skipping {}: {err}", file.relative_path);
                outcome.warnings.push(ScanWarning {
                    path: file.relative_path.clone(),
                    message: err.to_string(),
                });
            }
        }
    }
    outcome
}

pub fn build_index(root: &Path, opts: TraversalOptions) -> ScanOutcome {
    build_index_with(root, opts, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn hash_ignores_line_endings() {
        assert_eq!(content_hash(b"a\r\nb\r\n"), content_hash(b"a\nb\n"));
        assert_eq!(content_hash(b"a\rb\r"), content_hash(b"a\nb\n"));
        assert_ne!(content_hash(b"a\nb\n"), content_hash(b"a\nc\n"));
        assert_eq!(content_hash(b"").len(), 64);
    }

    #[test]
    fn index_records_raw_size_and_forward_slash_keys() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/x.txt"), "hello\r\n").unwrap();
        fs::write(root.join("y.txt"), "").unwrap();

        let out = build_index(root, TraversalOptions::default());
        assert!(out.warnings.is_empty());
        assert_eq!(out.index.len(), 2);

        let x = &out.index["sub/x.txt"];
        assert_eq!(x.relative_path, "sub/x.txt");
        assert_eq!(x.size, 7);
        assert_eq!(x.content_hash, content_hash(b"hello\n"));
        assert_eq!(x.absolute_path, root.join("sub/x.txt"));
        assert_eq!(out.index["y.txt"].size, 0);
    }

    #[test]
    fn empty_root_gives_empty_index() {
        let dir = tempdir().unwrap();
        let out = build_index(dir.path(), TraversalOptions::default());
        assert!(out.index.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn missing_file_becomes_warning() {
        let dir = tempdir().unwrap();
        let gone = WalkedFile {
            relative_path: "gone.txt".into(),
            absolute_path: dir.path().join("gone.txt"),
        };
        let err = index_file(&gone).unwrap_err();
        assert!(matches!(err, CompareError::FileAccess { .. }));
        assert!(err.to_string().contains("gone.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_skipped_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("ok.txt"), "ok").unwrap();
        let locked = root.join("locked.txt");
        fs::write(&locked, "secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores permission bits; nothing to observe then
        if fs::read(&locked).is_ok() {
            return;
        }

        let mut seen = Vec::new();
        let out = build_index_with(root, TraversalOptions::default(), |p| {
            seen.push(p.to_string());
        });
        assert_eq!(seen.len(), 2);
        assert!(out.index.contains_key("ok.txt"));
        assert!(!out.index.contains_key("locked.txt"));
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].path, "locked.txt");
    }
}
