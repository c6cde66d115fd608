//! CLI output formatting for `init` and `build`.
//!
//! Logs carry per-file detail; these summaries are what a user reads on
//! stdout after a command finishes. Paths are shown relative to the project
//! root when possible.
//!
//! # Output Format
//!
//! ## Init
//!
//! ```text
//! Config
//!     config.toml (written)
//! Directories
//!     content/posts
//!     content/pages
//!     themes
//! Theme
//!     themes/default (3 files)
//! Content
//!     001 content/posts/hello-world.md
//!     002 content/pages/about.md
//! ```
//!
//! ## Build
//!
//! ```text
//! Content
//!     1 post, 1 page
//! Output → build
//!     4 pages rendered (minified)
//!     6 files written
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::init::InitReport;
use crate::pipeline::BuildReport;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `root`, or as-is when it lives elsewhere.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// `1 post`, `2 posts`.
fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// Init
// ============================================================================

pub fn format_init_output(report: &InitReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Config".to_string());
    let status = if report.config_written {
        "written"
    } else {
        "kept existing"
    };
    lines.push(format!("{}config.toml ({})", indent(1), status));

    lines.push("Directories".to_string());
    for dir in &report.directories {
        lines.push(format!("{}{}", indent(1), display_path(dir, root)));
    }

    lines.push("Theme".to_string());
    lines.push(format!(
        "{}{} ({})",
        indent(1),
        display_path(&report.theme_dir, root),
        plural(report.theme_files, "file")
    ));

    lines.push("Content".to_string());
    for (i, path) in report.seeded.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            format_index(i + 1),
            display_path(path, root)
        ));
    }

    lines
}

pub fn print_init_output(report: &InitReport, root: &Path) {
    for line in format_init_output(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Content".to_string());
    lines.push(format!(
        "{}{}, {}",
        indent(1),
        plural(report.posts, "post"),
        plural(report.pages, "page")
    ));

    lines.push(format!(
        "Output → {}",
        display_path(&report.output_dir, root)
    ));
    let minified = if report.minified { " (minified)" } else { "" };
    lines.push(format!(
        "{}{} rendered{}",
        indent(1),
        plural(report.rendered, "page"),
        minified
    ));
    lines.push(format!(
        "{}{} written",
        indent(1),
        plural(report.artifacts, "file")
    ));

    lines
}

pub fn print_build_output(report: &BuildReport, root: &Path) {
    for line in format_build_output(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
