use std::fmt::Write as _;
use std::io::IsTerminal;

use crate::types::{ClassificationResult, ScanWarning};

pub const DEFAULT_IDENTICAL_LIMIT: usize = 10;

const RULE_WIDTH: usize = 60;

pub struct RenderOptions {
    pub identical_limit: usize,
    pub colors: Colors,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            identical_limit: DEFAULT_IDENTICAL_LIMIT,
            colors: Colors::disabled(),
        }
    }
}

/// Plain report with the default truncation and no warnings.
pub fn render(result: &ClassificationResult, left_name: &str, right_name: &str) -> String {
    render_with(result, left_name, right_name, &[], &RenderOptions::default())
}

pub fn render_with(
    result: &ClassificationResult,
    left_name: &str,
    right_name: &str,
    warnings: &[ScanWarning],
    opts: &RenderOptions,
) -> String {
    let c = &opts.colors;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{}", c.bold("Comparison results"));
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "\nIdentical files ({}):", result.identical.len());
    for path in result.identical.iter().take(opts.identical_limit) {
        let _ = writeln!(out, "  {} {path}", c.paint("✓", "32"));
    }
    if result.identical.len() > opts.identical_limit {
        let _ = writeln!(
            out,
            "  ... and {} more identical files",
            result.identical.len() - opts.identical_limit
        );
    }

    section(&mut out, "Different files".to_string(), &result.different, c.paint("✗", "31"));
    section(
        &mut out,
        format!("Only in {left_name}"),
        &result.only_in_left,
        c.paint("+", "33"),
    );
    section(
        &mut out,
        format!("Only in {right_name}"),
        &result.only_in_right,
        c.paint("-", "36"),
    );

    if !warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings ({}):", warnings.len());
        for w in warnings {
            let _ = writeln!(out, "  {} {}: {}", c.paint("!", "1;33"), w.path, w.message);
        }
    }

    let s = result.summary();
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "Total files: {}", s.total);
    let _ = writeln!(out, "Identical: {}", s.identical);
    let _ = writeln!(out, "Different: {}", s.different);
    let _ = write!(out, "Unique: {}", s.unique);
    out
}

fn section(out: &mut String, title: String, paths: &[String], glyph: String) {
    let _ = writeln!(out, "\n{title} ({}):", paths.len());
    for path in paths {
        let _ = writeln!(out, "  {glyph} {path}");
    }
}

pub struct Colors {
    enabled: bool,
}

impl Colors {
    /// Glyph colouring for stdout, following the NO_COLOR and CLICOLOR conventions.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
    }

    /// `CLICOLOR_FORCE` (non-zero) beats `NO_COLOR` and `CLICOLOR=0`, which beat the tty check.
    fn resolve(var: impl Fn(&str) -> Option<String>, tty: bool) -> Self {
        let enabled = match var("CLICOLOR_FORCE").as_deref() {
            Some(v) if v != "0" => true,
            _ => var("NO_COLOR").is_none() && var("CLICOLOR").as_deref() != Some("0") && tty,
        };
        Colors { enabled }
    }

    pub const fn disabled() -> Self {
        Colors { enabled: false }
    }

    fn paint(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }

    fn bold(&self, s: &str) -> String {
        self.paint(s, "1")
    }
}
