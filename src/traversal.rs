use std::fs;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, trace};

use crate::types::ScanWarning;

#[derive(Debug, Clone, Copy, Default)]
pub struct TraversalOptions {
    pub follow_symlinks: bool,
    pub respect_gitignore: bool,
}

/// A file the walker handed back, with its key under the root.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    pub relative_path: String,
    pub absolute_path: PathBuf,
}

#[derive(Debug, Default)]
pub struct Collected {
    pub files: Vec<WalkedFile>,
    pub errors: Vec<ScanWarning>,
}

/// Walks `root` and returns every regular file below it.
///
/// Symlinks to files are kept (their target is read later). Symlinked
/// directories are only entered with `follow_symlinks`; the walker reports
/// loops as errors in that mode. Nothing the walker fails on is dropped: it
/// lands in `errors`.
pub fn collect_files(root: &Path, opts: TraversalOptions) -> Collected {
    let mut builder = WalkBuilder::new(root);
    builder.follow_links(opts.follow_symlinks);
    builder.standard_filters(false);
    if opts.respect_gitignore {
        builder.ignore(true);
        builder.git_ignore(true);
        builder.git_exclude(true);
        builder.git_global(true);
        builder.require_git(false);
    }
    builder.hidden(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    let mut out = Collected::default();
    for dent in builder.build() {
        let dent = match dent {
            Ok(d) => d,
            Err(err) => {
                debug!("walk error under {}: {err}", root.display());
                let path = error_path(&err)
                    .map_or_else(|| ".".to_string(), |p| display_key(root, p));
                out.errors.push(ScanWarning {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };
        let path = dent.path();
        if dent.depth() == 0 {
            continue;
        }
        if dent.path_is_symlink()
            && let Err(err) = fs::metadata(path)
        {
            out.errors.push(ScanWarning {
                path: display_key(root, path),
                message: format!("broken symlink: {err}"),
            });
            continue;
        }
        if !path.is_file() {
            continue;
        }
        let Some(relative_path) = relative_key(root, path) else {
            out.errors.push(ScanWarning {
                path: display_key(root, path),
                message: "file name is not valid UTF-8".to_string(),
            });
            continue;
        };
        trace!("found {relative_path}");
        out.files.push(WalkedFile {
            relative_path,
            absolute_path: path.to_path_buf(),
        });
    }

    out
}

/// `path` relative to `root`, joined with `/` on every platform.
///
/// `None` when a component is not valid UTF-8; such names have no stable key.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

/// Lossy form of [`relative_key`], only for messages.
fn display_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The path a walk error is about, if it names one.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
