//! Plain-text rendering of the package tree report.
//!
//! The report is a purely derived artifact written as
//! `DIRECTORY_STRUCTURE.txt`. Its layout is:
//!
//! ```text
//! Package: demo
//! Version: 1.0
//! Total size: 213 bytes
//! Estimated tokens: ~54
//!
//! [manifest] 1 file, 13 bytes, ~4 tokens
//!   SKILL.md                 13 bytes   ~4 tokens
//!
//! [script] 1 file, 200 bytes, ~50 tokens
//!   scripts/run.py          200 bytes  ~50 tokens
//!
//! Tree:
//! demo/
//! ├── scripts/
//! │   └── run.py
//! └── SKILL.md
//!
//! Token Budget:
//! - Layer 0 (scripts/): ~50 tokens (run on demand, not loaded)
//! - Layer 1 (SKILL.md): ~4 tokens (loaded on trigger)
//! - Layer 2 (resources/): ~0 tokens (loaded selectively)
//! ```
//!
//! Groups with no files are omitted. A `Created:` line is appended only when
//! a date is supplied.

use crate::classification::Classification;
use crate::config::PackagerConfig;
use crate::created_on::CreatedOn;
use crate::scanner::{FileEntry, Totals, TreeReport};
use crate::version::PackageVersion;
use camino::Utf8Path;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Inputs for [`render_tree_report`].
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Version label shown in the header.
    pub version: &'a PackageVersion,
    /// Optional creation date appended to the report.
    pub created_on: Option<&'a CreatedOn>,
    /// Names used for the token budget section.
    pub config: &'a PackagerConfig,
}

/// Render the tree report for `report`.
#[must_use]
pub fn render_tree_report(report: &TreeReport, context: &ReportContext<'_>) -> String {
    let mut out = String::new();
    let totals = report.totals();

    push_line(&mut out, format_args!("Package: {}", report.package_name()));
    push_line(&mut out, format_args!("Version: {}", context.version));
    push_line(&mut out, format_args!("Total size: {}", bytes(totals.bytes)));
    push_line(&mut out, format_args!("Estimated tokens: ~{}", totals.units));

    let width = path_column_width(report);
    for class in Classification::ALL {
        let group = report.totals_for(class);
        if group.files == 0 {
            continue;
        }
        out.push('\n');
        push_line(&mut out, format_args!("[{class}] {}", subtotal(group)));
        for entry in report.entries_in(class) {
            push_entry_line(&mut out, entry, width);
        }
    }

    out.push_str("\nTree:\n");
    let paths: Vec<(String, Option<&str>)> = report
        .entries()
        .iter()
        .map(|e| (e.slash_path(), None))
        .collect();
    for line in draw_tree(report.package_name(), &paths) {
        push_line(&mut out, format_args!("{line}"));
    }

    out.push('\n');
    push_budget(&mut out, report, context.config);

    if let Some(date) = context.created_on {
        out.push('\n');
        push_line(&mut out, format_args!("Created: {date}"));
    }
    out
}

fn push_line(out: &mut String, args: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = out.write_fmt(args);
    out.push('\n');
}

fn push_entry_line(out: &mut String, entry: &FileEntry, width: usize) {
    push_line(
        out,
        format_args!(
            "  {:<width$}  {:>12}  {:>10}",
            entry.slash_path(),
            bytes(entry.size),
            format!("~{} tokens", entry.units),
        ),
    );
}

fn push_budget(out: &mut String, report: &TreeReport, config: &PackagerConfig) {
    let manifest_units = report
        .find(Utf8Path::new(&config.manifest_name))
        .map_or(0, |e| e.units);
    let script_units = report.totals_for(Classification::Script).units;
    let resource_units = report.totals_for(Classification::Resource).units;

    out.push_str("Token Budget:\n");
    push_line(
        out,
        format_args!(
            "- Layer 0 ({}/): ~{script_units} tokens (run on demand, not loaded)",
            config.scripts_dir
        ),
    );
    push_line(
        out,
        format_args!(
            "- Layer 1 ({}): ~{manifest_units} tokens (loaded on trigger)",
            config.manifest_name
        ),
    );
    push_line(
        out,
        format_args!(
            "- Layer 2 ({}/): ~{resource_units} tokens (loaded selectively)",
            config.resources_dir
        ),
    );
}

fn path_column_width(report: &TreeReport) -> usize {
    report
        .entries()
        .iter()
        .map(|e| e.slash_path().chars().count())
        .max()
        .unwrap_or(0)
}

fn subtotal(totals: Totals) -> String {
    let noun = if totals.files == 1 { "file" } else { "files" };
    format!(
        "{} {noun}, {}, ~{} tokens",
        totals.files,
        bytes(totals.bytes),
        totals.units
    )
}

fn bytes(count: u64) -> String {
    if count == 1 {
        "1 byte".to_owned()
    } else {
        format!("{count} bytes")
    }
}

/// Directory node used while drawing the box tree.
#[derive(Default)]
struct Node<'a> {
    dirs: BTreeMap<&'a str, Self>,
    files: BTreeMap<&'a str, Option<&'a str>>,
}

/// Draw a box-drawing tree for `/`-separated relative file paths.
///
/// Each directory lists its subdirectories first and then its files, both
/// sorted by name. A file's annotation, when present, is appended after two
/// spaces.
pub(crate) fn draw_tree(root_name: &str, files: &[(String, Option<&str>)]) -> Vec<String> {
    let mut root = Node::default();
    for (path, annotation) in files {
        let mut parts: Vec<&str> = path.split('/').collect();
        let Some(file) = parts.pop() else { continue };
        let mut node = &mut root;
        for dir in parts {
            node = node.dirs.entry(dir).or_default();
        }
        node.files.insert(file, *annotation);
    }

    let mut lines = vec![format!("{root_name}/")];
    draw_node(&root, "", &mut lines);
    lines
}

fn draw_node(node: &Node<'_>, prefix: &str, lines: &mut Vec<String>) {
    let count = node.dirs.len() + node.files.len();
    let mut index = 0;

    for (name, child) in &node.dirs {
        index += 1;
        let last = index == count;
        lines.push(format!("{prefix}{}{name}/", connector(last)));
        let extension = if last { "    " } else { "│   " };
        draw_node(child, &format!("{prefix}{extension}"), lines);
    }

    for (name, annotation) in &node.files {
        index += 1;
        let line = format!("{prefix}{}{name}", connector(index == count));
        match annotation {
            Some(label) => lines.push(format!("{line}  ({label})")),
            None => lines.push(line),
        }
    }
}

const fn connector(last: bool) -> &'static str {
    if last { "└── " } else { "├── " }
}

#[cfg(test)]
#[path = "tree_report_tests.rs"]
mod tests;
