//! Archive naming policy.
//!
//! Archives are named `<package-name>-v<version>.zip` and contain a single
//! top-level directory named after the package, so that unzipping into a
//! skills directory yields a self-named folder.

use crate::version::PackageVersion;
use std::fmt;

/// The fixed file extension for skill archives.
const ARCHIVE_EXTENSION: &str = ".zip";

/// A skill archive name.
///
/// # Examples
///
/// ```
/// use skill_packager::naming::ArchiveName;
/// use skill_packager::version::PackageVersion;
///
/// let version = PackageVersion::try_from("1.0").expect("valid version");
/// let name = ArchiveName::new("billing-migration", version);
///
/// assert_eq!(name.filename(), "billing-migration-v1.0.zip");
/// assert_eq!(name.member_path("scripts/run.py"), "billing-migration/scripts/run.py");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    package_name: String,
    version: PackageVersion,
}

impl ArchiveName {
    /// Create an archive name from a package name and version.
    #[must_use]
    pub fn new(package_name: impl Into<String>, version: PackageVersion) -> Self {
        Self {
            package_name: package_name.into(),
            version,
        }
    }

    /// Return the package name component.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &PackageVersion {
        &self.version
    }

    /// Return the archive file name.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }

    /// Return the in-archive path for a `/`-separated relative path.
    #[must_use]
    pub fn member_path(&self, slash_path: &str) -> String {
        format!("{}/{slash_path}", self.package_name)
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-v{}{ARCHIVE_EXTENSION}",
            self.package_name, self.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn name(package: &str, version: &str) -> ArchiveName {
        ArchiveName::new(
            package,
            PackageVersion::try_from(version).expect("valid version"),
        )
    }

    #[rstest]
    #[case::simple("demo", "1.0", "demo-v1.0.zip")]
    #[case::semver("pdf-tools", "2.1.3", "pdf-tools-v2.1.3.zip")]
    #[case::underscored("my_skill", "0.1", "my_skill-v0.1.zip")]
    fn filename_follows_convention(
        #[case] package: &str,
        #[case] version: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(name(package, version).filename(), expected);
    }

    #[test]
    fn member_paths_are_nested_under_package_name() {
        let archive = name("demo", "1.0");
        assert_eq!(archive.member_path("SKILL.md"), "demo/SKILL.md");
        assert_eq!(archive.member_path("scripts/run.py"), "demo/scripts/run.py");
    }

    #[test]
    fn accessors_return_components() {
        let archive = name("demo", "2.2");
        assert_eq!(archive.package_name(), "demo");
        assert_eq!(archive.version().as_str(), "2.2");
    }
}
