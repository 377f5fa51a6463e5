//! Unit tests for generated document writing.

use super::*;
use crate::scanner::scan_tree;
use crate::validator::validate_package_root;
use crate::version::PackageVersion;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    root: PackageRoot,
    archive: ArchiveName,
    config: PackagerConfig,
}

impl Fixture {
    fn synthesizer(&self) -> Synthesizer<'_> {
        Synthesizer::new(&self.root, &self.archive, None, &self.config)
    }

    fn report(&self) -> TreeReport {
        scan_tree(&self.root, &self.config).expect("scan")
    }
}

#[fixture]
fn fixture() -> Fixture {
    let temp = TempDir::new().expect("temp dir");
    let dir = Utf8Path::from_path(temp.path())
        .expect("non-UTF8 temp path")
        .join("demo");
    fs::create_dir_all(dir.join("scripts")).expect("mkdir");
    fs::write(dir.join("SKILL.md"), "# Demo\n").expect("write manifest");
    fs::write(dir.join("scripts/run.py"), [b'x'; 200]).expect("write script");

    let config = PackagerConfig::default();
    let root = validate_package_root(&dir, &config).expect("valid root");
    let archive = ArchiveName::new(
        root.name(),
        PackageVersion::try_from("1.0").expect("valid version"),
    );
    Fixture {
        _temp: temp,
        root,
        archive,
        config,
    }
}

#[rstest]
fn writes_tree_report_into_root(fixture: Fixture) {
    let report = fixture.report();

    let path = fixture
        .synthesizer()
        .write_tree_report(&report)
        .expect("report written");

    assert_eq!(path, fixture.root.join("DIRECTORY_STRUCTURE.txt"));
    let text = fs::read_to_string(&path).expect("read report");
    assert!(text.starts_with("Package: demo\nVersion: 1.0\n"));
    assert!(text.contains("scripts/run.py"));
}

#[rstest]
fn tree_report_is_overwritten(fixture: Fixture) {
    let path = fixture.root.join("DIRECTORY_STRUCTURE.txt");
    fs::write(&path, "stale").expect("write stale report");

    fixture
        .synthesizer()
        .write_tree_report(&fixture.report())
        .expect("report written");

    let text = fs::read_to_string(&path).expect("read report");
    assert_ne!(text, "stale");
}

#[rstest]
fn generates_overview_when_absent(fixture: Fixture) {
    let readme = fixture.root.join("README.md");
    assert!(!readme.exists());

    let outcome = fixture
        .synthesizer()
        .ensure_overview(&fixture.report())
        .expect("overview written");

    assert_eq!(outcome, OverviewOutcome::Generated(readme.clone()));
    assert!(outcome.was_generated());
    let text = fs::read_to_string(&readme).expect("read readme");
    assert!(text.starts_with("# Demo\n"));
}

#[rstest]
fn keeps_existing_overview_byte_for_byte(fixture: Fixture) {
    let readme = fixture.root.join("README.md");
    let original = b"# Hand written\n\nDo not touch.\n";
    fs::write(&readme, original).expect("write readme");

    let outcome = fixture
        .synthesizer()
        .ensure_overview(&fixture.report())
        .expect("overview check");

    assert_eq!(outcome, OverviewOutcome::Kept(readme.clone()));
    assert_eq!(fs::read(&readme).expect("read readme"), original);
}

#[rstest]
fn keeps_readme_equivalent_and_writes_nothing(fixture: Fixture) {
    fs::write(fixture.root.join("readme.txt"), "notes").expect("write readme");

    let outcome = fixture
        .synthesizer()
        .ensure_overview(&fixture.report())
        .expect("overview check");

    assert!(!outcome.was_generated());
    assert!(!fixture.root.join("README.md").exists());
}

#[rstest]
fn second_run_leaves_generated_overview_unchanged(fixture: Fixture) {
    let synthesizer = fixture.synthesizer();
    let first = synthesizer
        .ensure_overview(&fixture.report())
        .expect("first run");
    fs::write(first.path(), "edited by hand").expect("edit readme");

    let second = synthesizer
        .ensure_overview(&fixture.report())
        .expect("second run");

    assert!(!second.was_generated());
    assert_eq!(
        fs::read_to_string(second.path()).expect("read readme"),
        "edited by hand"
    );
}

#[cfg(unix)]
#[rstest]
fn write_failure_is_a_synthesis_error(fixture: Fixture) {
    use std::os::unix::fs::PermissionsExt;

    let dir = fixture.root.path();
    fs::set_permissions(dir, fs::Permissions::from_mode(0o555)).expect("chmod");
    let probe = dir.join(".probe");
    let writable = fs::write(&probe, "x").is_ok();
    let result = fixture.synthesizer().write_tree_report(&fixture.report());
    fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).expect("restore");

    if writable {
        // Running as root: permissions are not enforced.
        return;
    }
    let err = result.expect_err("read-only root must fail");
    assert!(matches!(err, PackagerError::Synthesis { .. }));
    assert!(err.to_string().contains("DIRECTORY_STRUCTURE.txt"));
}
