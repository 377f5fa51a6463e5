//! Package version newtype.
//!
//! The version label only names the output archive and appears in generated
//! documents, so the only requirements are that it is non-empty and can be
//! embedded in a file name.

use crate::error::{PackagerError, Result};
use std::fmt;

/// A caller-supplied package version label, such as `"2.2"`.
///
/// # Examples
///
/// ```
/// use skill_packager::version::PackageVersion;
///
/// let version: PackageVersion = "1.0".try_into().expect("valid version");
/// assert_eq!(version.as_str(), "1.0");
///
/// assert!(PackageVersion::try_from("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion(String);

impl PackageVersion {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for PackageVersion {
    type Error = PackagerError;

    fn try_from(value: &str) -> Result<Self> {
        validate_version(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = PackagerError;

    fn try_from(value: String) -> Result<Self> {
        validate_version(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for PackageVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` can label an archive file name.
fn validate_version(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PackagerError::InvalidVersion {
            reason: "version must not be empty".to_owned(),
        });
    }
    // The label is spliced into `<name>-v<version>.zip`; separators would
    // move the archive out of the output directory.
    if let Some(bad) = value.chars().find(|c| matches!(c, '/' | '\\')) {
        return Err(PackagerError::InvalidVersion {
            reason: format!("\"{value}\" contains path separator '{bad}'"),
        });
    }
    if value.chars().any(char::is_control) {
        return Err(PackagerError::InvalidVersion {
            reason: "version must not contain control characters".to_owned(),
        });
    }
    Ok(())
}
