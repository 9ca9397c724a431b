use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::compare::{classify, verify_identical};
use crate::error::ensure_dir;
use crate::formatters::{json, text};
use crate::indexer::build_index_with;
use crate::traversal::TraversalOptions;
use crate::types::{ScanOutcome, ScanWarning};

use super::Args;

/// Validates both roots, indexes them, classifies and prints the report.
///
/// # Errors
/// Returns an error if a root is not a directory, before anything is scanned.
pub fn run_with_args(args: &Args) -> Result<()> {
    ensure_dir("branch1", &args.branch1)?;
    ensure_dir("branch2", &args.branch2)?;

    if !args.json {
        println!("Comparing:");
        println!("  {}: {}", args.name1, args.branch1.display());
        println!("  {}: {}", args.name2, args.branch2.display());
        println!("Scanning files...");
    }

    let opts = TraversalOptions {
        follow_symlinks: args.follow_symlinks,
        respect_gitignore: args.respect_gitignore,
    };

    let pb = args.progress.then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {pos} files hashed {wide_msg}")
        {
            pb.set_style(style.tick_chars("⠁⠃⠇⠋⠙⠸⢰⣠⣄⡆"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });
    let tick = |rel: &str| {
        if let Some(ref pb) = pb {
            pb.inc(1);
            pb.set_message(rel.to_string());
        }
    };

    // The two roots share nothing, so they are indexed side by side.
    let (left, right): (ScanOutcome, ScanOutcome) = rayon::join(
        || build_index_with(&args.branch1, opts, tick),
        || build_index_with(&args.branch2, opts, tick),
    );

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    info!(
        "indexed {} + {} files ({} + {} skipped)",
        left.index.len(),
        right.index.len(),
        left.warnings.len(),
        right.warnings.len()
    );

    let mut warnings: Vec<ScanWarning> = tag(&args.name1, left.warnings)
        .chain(tag(&args.name2, right.warnings))
        .collect();

    let mut result = classify(&left.index, &right.index);
    if args.verify {
        warnings.extend(verify_identical(&mut result, &left.index, &right.index));
    }

    if args.json {
        let s = json::format(
            &result,
            (args.name1.as_str(), args.branch1.as_path()),
            (args.name2.as_str(), args.branch2.as_path()),
            &warnings,
        )
        .context("serialize report")?;
        println!("{s}");
        return Ok(());
    }

    let render_opts = text::RenderOptions {
        identical_limit: args.identical_limit,
        colors: text::Colors::from_env(),
    };
    let s = text::render_with(&result, &args.name1, &args.name2, &warnings, &render_opts);
    println!("\n{s}");
    Ok(())
}

fn tag(name: &str, warnings: Vec<ScanWarning>) -> impl Iterator<Item = ScanWarning> + '_ {
    warnings.into_iter().map(move |w| ScanWarning {
        path: format!("{name}: {}", w.path),
        message: w.message,
    })
}
