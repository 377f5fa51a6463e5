//! Unit tests for overview detection and rendering.

use super::*;
use crate::classification::classify;
use crate::scanner::{FileEntry, estimate_units};
use crate::version::PackageVersion;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

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
fn archive() -> ArchiveName {
    ArchiveName::new(
        "billing-migration",
        PackageVersion::try_from("1.0").expect("valid version"),
    )
}

#[fixture]
fn report() -> TreeReport {
    TreeReport::new(
        "billing-migration",
        vec![entry("SKILL.md", 120), entry("scripts/run.py", 200)],
    )
}

fn render(report: &TreeReport, archive: &ArchiveName, created: Option<&CreatedOn>) -> String {
    let config = PackagerConfig::default();
    render_overview(
        report,
        &OverviewContext {
            archive,
            created_on: created,
            config: &config,
        },
    )
}

#[rstest]
#[case::markdown("README.md", true)]
#[case::lowercase("readme.md", true)]
#[case::mixed("Readme.rst", true)]
#[case::bare("README", true)]
#[case::prefix_only("READMEFIRST.md", false)]
#[case::manifest("SKILL.md", false)]
#[case::suffix("MY_README.md", false)]
fn recognises_overview_names(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_overview_name(name), expected);
}

#[rstest]
#[case::hyphen("billing-migration", "Billing Migration")]
#[case::underscore("api_client", "Api Client")]
#[case::single("demo", "Demo")]
#[case::doubled("a--b", "A B")]
fn titles_are_capitalised_words(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(display_title(name), expected);
}

#[rstest]
fn overview_names_package_version_and_archive(report: TreeReport, archive: ArchiveName) {
    let text = render(&report, &archive, None);

    assert!(text.starts_with("# Billing Migration\n"));
    assert!(text.contains("**Version:** 1.0"));
    assert!(text.contains("unzip billing-migration-v1.0.zip"));
    assert!(text.contains("Select the `billing-migration` folder"));
    assert!(!text.contains("**Created:**"));
}

#[rstest]
fn overview_lists_files_with_classification_only(report: TreeReport, archive: ArchiveName) {
    let text = render(&report, &archive, None);

    assert!(text.contains("│   └── run.py  (script)"));
    assert!(text.contains("SKILL.md  (manifest)"));
    assert!(text.contains("DIRECTORY_STRUCTURE.txt  (generated)"));
    assert!(text.contains("README.md  (generated)"));
    assert!(!text.contains("200 bytes"), "sizes belong in the tree report");
}

#[rstest]
fn overview_includes_installation_targets(report: TreeReport, archive: ArchiveName) {
    let text = render(&report, &archive, None);

    assert!(text.contains("## Quick Deploy"));
    assert!(text.contains("~/Library/Application\\ Support/Claude/skills/"));
    assert!(text.contains("~/.claude/skills/"));
    assert!(text.contains("%APPDATA%\\Claude\\skills\\billing-migration"));
}

#[rstest]
fn overview_shows_created_date_when_supplied(report: TreeReport, archive: ArchiveName) {
    let date = CreatedOn::try_from("2026-10-18").expect("valid date");
    let text = render(&report, &archive, Some(&date));
    assert!(text.contains("**Created:** 2026-10-18"));
}

#[rstest]
fn find_existing_returns_none_without_readme() {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8Path::from_path(temp.path()).expect("utf8");
    fs::write(root.join("SKILL.md"), "x").expect("write");

    let found = find_existing(root, &PackagerConfig::default()).expect("listing succeeds");
    assert!(found.is_none());
}

#[rstest]
#[case::configured("README.md")]
#[case::equivalent("readme.txt")]
fn find_existing_detects_readme_equivalents(#[case] name: &str) {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8Path::from_path(temp.path()).expect("utf8");
    fs::write(root.join(name), "hand written").expect("write");

    let found = find_existing(root, &PackagerConfig::default())
        .expect("listing succeeds")
        .expect("readme found");
    assert_eq!(found.file_name(), Some(name));
}

#[rstest]
fn find_existing_ignores_readme_directories() {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8Path::from_path(temp.path()).expect("utf8");
    fs::create_dir(root.join("readme")).expect("mkdir");

    let found = find_existing(root, &PackagerConfig::default()).expect("listing succeeds");
    assert!(found.is_none());
}

#[cfg(unix)]
#[rstest]
fn find_existing_skips_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().expect("temp dir");
    let root = Utf8Path::from_path(temp.path()).expect("utf8");
    let latin1 = temp.path().join(OsStr::from_bytes(b"readme.\xe9"));
    if fs::write(&latin1, "x").is_err() {
        return;
    }

    let found = find_existing(root, &PackagerConfig::default()).expect("listing succeeds");
    assert!(found.is_none());
}
