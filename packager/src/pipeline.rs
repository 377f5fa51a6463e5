//! End-to-end packaging.
//!
//! [`package_skill`] runs the stages in order: validate the root, scan it,
//! make sure an overview exists, write the tree report, then archive. Each
//! stage fails fast and later stages write nothing.

use crate::archiver::{ArchiveParams, create_archive, existing_destination};
use crate::config::PackagerConfig;
use crate::created_on::CreatedOn;
use crate::error::Result;
use crate::naming::ArchiveName;
use crate::scanner::{TreeReport, scan_tree_excluding};
use crate::synthesizer::{OverviewOutcome, Synthesizer};
use crate::validator::validate_package_root;
use crate::version::PackageVersion;
use camino::{Utf8Path, Utf8PathBuf};
use log::info;

/// A request to package one skill directory.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    /// Path to the package root.
    pub package_path: Utf8PathBuf,
    /// Version label used in the archive name.
    pub version: PackageVersion,
    /// Destination directory; defaults to the package root's parent.
    pub output_dir: Option<Utf8PathBuf>,
    /// Optional date stamped into generated documents.
    pub created_on: Option<CreatedOn>,
}

impl PackageRequest {
    /// Create a request with the default output directory and no date.
    #[must_use]
    pub fn new(package_path: impl Into<Utf8PathBuf>, version: PackageVersion) -> Self {
        Self {
            package_path: package_path.into(),
            version,
            output_dir: None,
            created_on: None,
        }
    }

    /// Write the archive into `output_dir`.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<Utf8PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    /// Stamp generated documents with `created_on`.
    #[must_use]
    pub fn with_created_on(mut self, created_on: CreatedOn) -> Self {
        self.created_on = Some(created_on);
        self
    }
}

/// The result of a successful packaging run.
#[derive(Debug, Clone)]
pub struct PackageOutput {
    /// Canonical path of the packaged directory.
    pub package_root: Utf8PathBuf,
    /// Path to the written archive.
    pub archive_path: Utf8PathBuf,
    /// Path to the regenerated tree report.
    pub tree_report_path: Utf8PathBuf,
    /// Whether the overview was generated or an existing one was kept.
    pub overview: OverviewOutcome,
    /// The files packed into the archive.
    pub report: TreeReport,
    /// Archive size in bytes.
    pub archive_size: u64,
    /// Lowercase hex SHA-256 digest of the archive.
    pub sha256: String,
}

/// Package the skill directory described by `request`.
///
/// # Errors
///
/// Returns [`crate::error::PackagerError::InvalidPackage`] if the root fails
/// validation, [`crate::error::PackagerError::Scan`] if it cannot be walked,
/// [`crate::error::PackagerError::Synthesis`] if a generated document cannot
/// be written, and [`crate::error::PackagerError::Archive`] if the archive
/// cannot be created. Generated documents may remain after an archive
/// failure; a partial archive never does.
///
/// # Examples
///
/// ```no_run
/// use skill_packager::config::PackagerConfig;
/// use skill_packager::pipeline::{PackageRequest, package_skill};
/// use skill_packager::version::PackageVersion;
///
/// let version = PackageVersion::try_from("1.0").expect("valid version");
/// let request = PackageRequest::new("skills/demo", version).with_output_dir("dist");
/// let output = package_skill(&request, &PackagerConfig::default()).expect("packaged");
/// println!("{}", output.archive_path);
/// ```
pub fn package_skill(request: &PackageRequest, config: &PackagerConfig) -> Result<PackageOutput> {
    let root = validate_package_root(&request.package_path, config)?;
    info!("packaging {} from {}", root.name(), root.path());

    let name = ArchiveName::new(root.name(), request.version.clone());
    let output_dir = request
        .output_dir
        .as_deref()
        .unwrap_or_else(|| root.parent())
        .to_owned();

    let synthesizer = Synthesizer::new(&root, &name, request.created_on.as_ref(), config);
    let excluded = report_exclusions(synthesizer.tree_report_path(), &output_dir, &name);

    let scan = scan_tree_excluding(&root, config, &excluded)?;
    let overview = synthesizer.ensure_overview(&scan)?;
    let scan = if overview.was_generated() {
        scan_tree_excluding(&root, config, &excluded)?
    } else {
        scan
    };
    let tree_report_path = synthesizer.write_tree_report(&scan)?;

    let archive = create_archive(&ArchiveParams {
        root: &root,
        name: &name,
        output_dir: &output_dir,
        config,
    })?;

    Ok(PackageOutput {
        package_root: root.path().to_owned(),
        archive_path: archive.archive_path,
        tree_report_path,
        overview,
        report: archive.report,
        archive_size: archive.size,
        sha256: archive.sha256,
    })
}

/// Paths the tree report must not list: itself and this run's archive.
fn report_exclusions(
    tree_report_path: Utf8PathBuf,
    output_dir: &Utf8Path,
    name: &ArchiveName,
) -> Vec<Utf8PathBuf> {
    let mut excluded = vec![tree_report_path];
    excluded.extend(existing_destination(output_dir, name));
    excluded
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
