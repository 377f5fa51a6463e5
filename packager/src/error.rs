//! Error types for the skill packager.
//!
//! Each pipeline stage has its own variant so that the CLI can report a
//! single line naming the offending path and the reason. Variants are grouped
//! into coarse [`ErrorKind`] classes for callers that branch on category.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging a skill directory.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The target directory is not a well-formed skill package.
    #[error("invalid skill package at {path}: {reason}")]
    InvalidPackage {
        /// The candidate package root.
        path: Utf8PathBuf,
        /// Which structural precondition failed.
        reason: String,
    },

    /// The version label cannot be used to name an archive.
    #[error("invalid package version: {reason}")]
    InvalidVersion {
        /// Description of the validation failure.
        reason: String,
    },

    /// The `--created` value is not a `YYYY-MM-DD` date.
    #[error("invalid --created date \"{value}\"; expected YYYY-MM-DD")]
    InvalidCreatedOn {
        /// The rejected value.
        value: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration at {path}: {reason}")]
    Config {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the read or parse failure.
        reason: String,
    },

    /// The package tree could not be read during traversal.
    #[error("failed to scan {path}: {source}")]
    Scan {
        /// The file or directory that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A generated document could not be written into the package root.
    #[error("failed to write {path}: {source}")]
    Synthesis {
        /// The document that could not be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The output archive could not be created.
    #[error("failed to create archive {path}: {reason}")]
    Archive {
        /// The archive destination (or its directory).
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

/// Coarse classification of [`PackagerError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The package directory failed a structural precondition.
    InvalidPackage,
    /// The filesystem changed or became unreadable during traversal.
    Scan,
    /// Writing a generated document failed.
    Synthesis,
    /// Writing the archive failed.
    Archive,
    /// The caller supplied an unusable argument or configuration.
    Usage,
}

impl PackagerError {
    /// Return the taxonomy class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPackage { .. } => ErrorKind::InvalidPackage,
            Self::Scan { .. } => ErrorKind::Scan,
            Self::Synthesis { .. } => ErrorKind::Synthesis,
            Self::Archive { .. } => ErrorKind::Archive,
            Self::InvalidVersion { .. } | Self::InvalidCreatedOn { .. } | Self::Config { .. } => {
                ErrorKind::Usage
            }
        }
    }

    pub(crate) fn invalid_package(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPackage {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn scan(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Scan {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<Utf8PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Archive {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
