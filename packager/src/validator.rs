//! Package root validation.
//!
//! Every later stage assumes the target is a directory that directly holds
//! the entry manifest. [`validate_package_root`] checks exactly that and
//! nothing more; the manifest's content is never read.

use crate::config::PackagerConfig;
use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use std::io;

/// A validated skill package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRoot {
    path: Utf8PathBuf,
    name: String,
}

impl PackageRoot {
    /// Return the canonical absolute path of the package root.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Return the package name (the root directory's base name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Join a relative path onto the package root.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.path.join(relative)
    }

    /// Return the directory that contains the package root.
    ///
    /// Validation rejects roots without a base name, so a parent always
    /// exists.
    #[must_use]
    pub fn parent(&self) -> &Utf8Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

/// Confirm that `candidate` is a well-formed package root.
///
/// The path must exist, be a directory, and contain a regular file named
/// exactly [`PackagerConfig::manifest_name`]. The comparison is byte-exact
/// even on case-insensitive filesystems.
///
/// # Errors
///
/// Returns [`PackagerError::InvalidPackage`] naming the failed precondition.
pub fn validate_package_root(
    candidate: &Utf8Path,
    config: &PackagerConfig,
) -> Result<PackageRoot> {
    let metadata = fs::metadata(candidate).map_err(|e| {
        let reason = if e.kind() == io::ErrorKind::NotFound {
            "directory does not exist".to_owned()
        } else {
            e.to_string()
        };
        PackagerError::invalid_package(candidate, reason)
    })?;

    if !metadata.is_dir() {
        return Err(PackagerError::invalid_package(candidate, "not a directory"));
    }

    let path = candidate
        .canonicalize_utf8()
        .map_err(|e| PackagerError::invalid_package(candidate, e.to_string()))?;

    let name = path
        .file_name()
        .ok_or_else(|| PackagerError::invalid_package(&path, "cannot derive a package name"))?
        .to_owned();

    if !contains_manifest(&path, &config.manifest_name)? {
        return Err(PackagerError::invalid_package(
            &path,
            format!("{} not found", config.manifest_name),
        ));
    }

    debug!("validated package root {path} ({name})");
    Ok(PackageRoot { path, name })
}

/// Look for a regular file named exactly `manifest_name` directly in `dir`.
fn contains_manifest(dir: &Utf8Path, manifest_name: &str) -> Result<bool> {
    let entries = dir
        .read_dir_utf8()
        .map_err(|e| PackagerError::invalid_package(dir, e.to_string()))?;

    for entry in entries {
        // Entries with non-UTF-8 names cannot be the manifest.
        let Ok(entry) = entry else { continue };
        if entry.file_name() != manifest_name {
            continue;
        }
        // Follows symlinks: a linked manifest counts.
        return Ok(entry.path().is_file());
    }
    Ok(false)
}
