//! Unit tests for tree report rendering.

use super::*;
use crate::classification::classify;
use crate::scanner::estimate_units;
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};

fn entry(path: &str, size: u64) -> FileEntry {
    let config = PackagerConfig::default();
    FileEntry {
        relative_path: Utf8PathBuf::from(path),
        size,
        units: estimate_units(size, config.bytes_per_unit),
        classification: classify(Utf8Path::new(path), &config),
    }
}

#[fixture]
fn demo_report() -> TreeReport {
    TreeReport::new(
        "demo",
        vec![
            entry("SKILL.md", 13),
            entry("resources/guide.md", 400),
            entry("scripts/run.py", 200),
        ],
    )
}

#[fixture]
fn version() -> PackageVersion {
    PackageVersion::try_from("1.0").expect("valid version")
}

fn render(report: &TreeReport, version: &PackageVersion, created: Option<&CreatedOn>) -> String {
    let config = PackagerConfig::default();
    let context = ReportContext {
        version,
        created_on: created,
        config: &config,
    };
    render_tree_report(report, &context)
}

#[rstest]
fn header_carries_name_version_and_totals(demo_report: TreeReport, version: PackageVersion) {
    let text = render(&demo_report, &version, None);
    let header: Vec<&str> = text.lines().take(4).collect();

    assert_eq!(
        header,
        [
            "Package: demo",
            "Version: 1.0",
            "Total size: 613 bytes",
            "Estimated tokens: ~154",
        ]
    );
}

#[rstest]
fn groups_entries_with_subtotals(demo_report: TreeReport, version: PackageVersion) {
    let text = render(&demo_report, &version, None);

    assert!(text.contains("[manifest] 1 file, 13 bytes, ~4 tokens"));
    assert!(text.contains("[script] 1 file, 200 bytes, ~50 tokens"));
    assert!(text.contains("[resource] 1 file, 400 bytes, ~100 tokens"));
    assert!(!text.contains("[other]"), "empty groups are omitted");

    let script_header = text.find("[script]").expect("script group");
    let resource_header = text.find("[resource]").expect("resource group");
    let run_line = text.find("scripts/run.py").expect("run.py line");
    assert!(script_header < run_line && run_line < resource_header);
}

#[rstest]
fn entry_lines_show_path_size_and_units(demo_report: TreeReport, version: PackageVersion) {
    let text = render(&demo_report, &version, None);
    let line = text
        .lines()
        .find(|l| l.trim_start().starts_with("scripts/run.py"))
        .expect("entry line");

    assert!(line.contains("200 bytes"));
    assert!(line.contains("~50 tokens"));
}

#[rstest]
fn includes_box_tree_with_directories_first(demo_report: TreeReport, version: PackageVersion) {
    let text = render(&demo_report, &version, None);
    let tree: Vec<&str> = text
        .lines()
        .skip_while(|l| *l != "Tree:")
        .skip(1)
        .take_while(|l| !l.is_empty())
        .collect();

    assert_eq!(
        tree,
        [
            "demo/",
            "├── resources/",
            "│   └── guide.md",
            "├── scripts/",
            "│   └── run.py",
            "└── SKILL.md",
        ]
    );
}

#[rstest]
fn summarises_token_budget_by_layer(demo_report: TreeReport, version: PackageVersion) {
    let text = render(&demo_report, &version, None);

    assert!(text.contains("- Layer 0 (scripts/): ~50 tokens"));
    assert!(text.contains("- Layer 1 (SKILL.md): ~4 tokens"));
    assert!(text.contains("- Layer 2 (resources/): ~100 tokens"));
}

#[rstest]
fn created_line_only_when_supplied(demo_report: TreeReport, version: PackageVersion) {
    assert!(!render(&demo_report, &version, None).contains("Created:"));

    let date = CreatedOn::try_from("2026-10-18").expect("valid date");
    let text = render(&demo_report, &version, Some(&date));
    assert!(text.trim_end().ends_with("Created: 2026-10-18"));
}

#[rstest]
fn rendering_is_deterministic(demo_report: TreeReport, version: PackageVersion) {
    assert_eq!(
        render(&demo_report, &version, None),
        render(&demo_report, &version, None)
    );
}

#[test]
fn draw_tree_nests_and_annotates() {
    let files = vec![
        ("a/b/c.txt".to_owned(), Some("other")),
        ("a/d.txt".to_owned(), None),
        ("e.txt".to_owned(), Some("manifest")),
    ];

    let lines = draw_tree("pkg", &files);

    assert_eq!(
        lines,
        [
            "pkg/",
            "├── a/",
            "│   ├── b/",
            "│   │   └── c.txt  (other)",
            "│   └── d.txt",
            "└── e.txt  (manifest)",
        ]
    );
}

#[test]
fn draw_tree_of_nothing_is_just_the_root() {
    assert_eq!(draw_tree("pkg", &[]), ["pkg/"]);
}
