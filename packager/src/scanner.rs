//! Package tree scanner.
//!
//! Walks a validated package root depth-first, visiting the entries of each
//! directory in lexicographic order, and records every file's size, estimated
//! content units and [`Classification`]. The walk order is the archive's
//! member order, so it must not depend on the platform's directory listing
//! order.

use crate::classification::{Classification, classify};
use crate::config::PackagerConfig;
use crate::error::{PackagerError, Result};
use crate::validator::PackageRoot;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use std::collections::{BTreeMap, HashSet};
use std::fs;

/// A single file discovered under the package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the package root.
    pub relative_path: Utf8PathBuf,
    /// Size in bytes (of the link target for symlinked files).
    pub size: u64,
    /// Estimated content units, `ceil(size / bytes_per_unit)`.
    pub units: u64,
    /// Layer the file belongs to.
    pub classification: Classification,
}

impl FileEntry {
    /// Return the relative path joined with `/` regardless of platform.
    #[must_use]
    pub fn slash_path(&self) -> String {
        self.relative_path
            .components()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// File count, byte total and unit total for a group of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Number of files.
    pub files: usize,
    /// Sum of file sizes in bytes.
    pub bytes: u64,
    /// Sum of estimated content units.
    pub units: u64,
}

impl Totals {
    fn add(&mut self, entry: &FileEntry) {
        self.files += 1;
        self.bytes += entry.size;
        self.units += entry.units;
    }
}

/// The result of scanning a package root.
///
/// Entries are kept in walk order. Totals are computed once at construction
/// and the report is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeReport {
    package_name: String,
    entries: Vec<FileEntry>,
    totals: Totals,
    by_classification: BTreeMap<Classification, Totals>,
}

impl TreeReport {
    /// Build a report from entries already in walk order.
    #[must_use]
    pub fn new(package_name: impl Into<String>, entries: Vec<FileEntry>) -> Self {
        let mut totals = Totals::default();
        let mut by_classification = BTreeMap::new();
        for entry in &entries {
            totals.add(entry);
            by_classification
                .entry(entry.classification)
                .or_insert_with(Totals::default)
                .add(entry);
        }
        Self {
            package_name: package_name.into(),
            entries,
            totals,
            by_classification,
        }
    }

    /// Return the package name the report was taken for.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Return every entry in walk order.
    #[must_use]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Return totals across all entries.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Return totals for one classification (zero when it has no files).
    #[must_use]
    pub fn totals_for(&self, classification: Classification) -> Totals {
        self.by_classification
            .get(&classification)
            .copied()
            .unwrap_or_default()
    }

    /// Iterate over the entries of one classification, in walk order.
    pub fn entries_in(
        &self,
        classification: Classification,
    ) -> impl Iterator<Item = &FileEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.classification == classification)
    }

    /// Find an entry by its relative path.
    #[must_use]
    pub fn find(&self, relative: &Utf8Path) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.relative_path.as_path() == relative)
    }
}

/// Estimate content units for a file of `size` bytes.
///
/// A zero divisor is treated as one so the function stays total;
/// configuration loading rejects zero before it gets here.
///
/// # Examples
///
/// ```
/// use skill_packager::scanner::estimate_units;
///
/// assert_eq!(estimate_units(0, 4), 0);
/// assert_eq!(estimate_units(1, 4), 1);
/// assert_eq!(estimate_units(200, 4), 50);
/// assert_eq!(estimate_units(201, 4), 51);
/// ```
#[must_use]
pub fn estimate_units(size: u64, bytes_per_unit: u64) -> u64 {
    size.div_ceil(bytes_per_unit.max(1))
}

/// Scan every file under `root`.
///
/// # Errors
///
/// Returns [`PackagerError::Scan`] naming the first path that could not be
/// read, or [`PackagerError::InvalidPackage`] for a file name that is not
/// valid UTF-8. No partial report is returned.
pub fn scan_tree(root: &PackageRoot, config: &PackagerConfig) -> Result<TreeReport> {
    scan_tree_excluding(root, config, &[])
}

/// Scan every file under `root`, skipping the absolute paths in `excluded`.
///
/// The pipeline uses exclusions to keep its own outputs (the tree report
/// while it is being regenerated, or an archive written into the package
/// root) out of the listing.
///
/// # Errors
///
/// Returns [`PackagerError::Scan`] naming the first path that could not be
/// read, or [`PackagerError::InvalidPackage`] for a file name that is not
/// valid UTF-8.
pub fn scan_tree_excluding(
    root: &PackageRoot,
    config: &PackagerConfig,
    excluded: &[Utf8PathBuf],
) -> Result<TreeReport> {
    let mut walker = Walker {
        config,
        excluded,
        ancestors: HashSet::new(),
        entries: Vec::new(),
    };

    let real_root = root
        .path()
        .canonicalize_utf8()
        .map_err(|e| PackagerError::scan(root.path(), e))?;
    walker.ancestors.insert(real_root);
    walker.walk(root.path(), Utf8Path::new(""))?;

    debug!(
        "scanned {} file(s) under {}",
        walker.entries.len(),
        root.path()
    );
    Ok(TreeReport::new(root.name(), walker.entries))
}

/// Mutable state for one depth-first walk.
struct Walker<'a> {
    config: &'a PackagerConfig,
    excluded: &'a [Utf8PathBuf],
    /// Real paths of the directories on the current descent path.
    ancestors: HashSet<Utf8PathBuf>,
    entries: Vec<FileEntry>,
}

impl Walker<'_> {
    fn walk(&mut self, dir: &Utf8Path, relative: &Utf8Path) -> Result<()> {
        for name in sorted_children(dir)? {
            let path = dir.join(&name);
            let child_relative = relative.join(&name);

            if self.excluded.contains(&path) {
                debug!("excluding {path}");
                continue;
            }

            // Follows symlinks, so a link is measured by its target.
            let metadata = fs::metadata(&path).map_err(|e| PackagerError::scan(&path, e))?;

            if metadata.is_dir() {
                self.descend(&path, &child_relative)?;
            } else if metadata.is_file() {
                let size = metadata.len();
                self.entries.push(FileEntry {
                    classification: classify(&child_relative, self.config),
                    units: estimate_units(size, self.config.bytes_per_unit),
                    size,
                    relative_path: child_relative,
                });
            } else {
                debug!("skipping special file {path}");
            }
        }
        Ok(())
    }

    fn descend(&mut self, path: &Utf8Path, relative: &Utf8Path) -> Result<()> {
        let real = path
            .canonicalize_utf8()
            .map_err(|e| PackagerError::scan(path, e))?;

        if self.ancestors.contains(&real) {
            warn!("skipping {path}: symlink cycle back to {real}");
            return Ok(());
        }

        self.ancestors.insert(real.clone());
        let result = self.walk(path, relative);
        self.ancestors.remove(&real);
        result
    }
}

/// List the names in `dir`, sorted lexicographically.
///
/// A name that is not valid UTF-8 cannot be recorded or archived, so it
/// makes the package invalid rather than failing the scan.
fn sorted_children(dir: &Utf8Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PackagerError::scan(dir, e))? {
        let entry = entry.map_err(|e| PackagerError::scan(dir, e))?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                return Err(PackagerError::invalid_package(
                    dir.join(raw.to_string_lossy().as_ref()),
                    "file name is not valid UTF-8",
                ));
            }
        }
    }
    names.sort_unstable();
    Ok(names)
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
