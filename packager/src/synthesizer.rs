//! Generated document writing.
//!
//! Writes the tree report (always) and the fallback overview (only when the
//! package has none) into the package root. Both operations are idempotent.

use crate::config::PackagerConfig;
use crate::created_on::CreatedOn;
use crate::error::{PackagerError, Result};
use crate::naming::ArchiveName;
use crate::overview::{OverviewContext, find_existing, render_overview};
use crate::scanner::TreeReport;
use crate::tree_report::{ReportContext, render_tree_report};
use crate::validator::PackageRoot;
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use std::fs;

/// What [`Synthesizer::ensure_overview`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewOutcome {
    /// A new overview was written at this path.
    Generated(Utf8PathBuf),
    /// A human-authored overview already existed and was left untouched.
    Kept(Utf8PathBuf),
}

impl OverviewOutcome {
    /// Return the overview path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Generated(path) | Self::Kept(path) => path,
        }
    }

    /// Return `true` if this run wrote the overview.
    #[must_use]
    pub fn was_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Writes generated documents into a package root.
pub struct Synthesizer<'a> {
    root: &'a PackageRoot,
    archive: &'a ArchiveName,
    created_on: Option<&'a CreatedOn>,
    config: &'a PackagerConfig,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer for `root`.
    #[must_use]
    pub fn new(
        root: &'a PackageRoot,
        archive: &'a ArchiveName,
        created_on: Option<&'a CreatedOn>,
        config: &'a PackagerConfig,
    ) -> Self {
        Self {
            root,
            archive,
            created_on,
            config,
        }
    }

    /// Return the path of the tree report inside the package root.
    #[must_use]
    pub fn tree_report_path(&self) -> Utf8PathBuf {
        self.root.join(&self.config.tree_report_name)
    }

    /// Render `report` and (re)write the tree report file.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Synthesis`] if the file cannot be written.
    pub fn write_tree_report(&self, report: &TreeReport) -> Result<Utf8PathBuf> {
        let context = ReportContext {
            version: self.archive.version(),
            created_on: self.created_on,
            config: self.config,
        };
        let path = self.tree_report_path();
        write_document(&path, &render_tree_report(report, &context))?;
        info!("wrote {path}");
        Ok(path)
    }

    /// Write a fallback overview unless one already exists.
    ///
    /// Existing README-equivalents are never modified, so edits made to an
    /// earlier generated draft survive later runs.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Scan`] if the root cannot be listed, or
    /// [`PackagerError::Synthesis`] if the overview cannot be written.
    pub fn ensure_overview(&self, report: &TreeReport) -> Result<OverviewOutcome> {
        if let Some(existing) = find_existing(self.root.path(), self.config)? {
            info!("using existing {existing}");
            return Ok(OverviewOutcome::Kept(existing));
        }

        let context = OverviewContext {
            archive: self.archive,
            created_on: self.created_on,
            config: self.config,
        };
        let path = self.root.join(&self.config.overview_name);
        write_document(&path, &render_overview(report, &context))?;
        info!("generated {path}");
        Ok(OverviewOutcome::Generated(path))
    }
}

fn write_document(path: &Utf8Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| PackagerError::Synthesis {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
#[path = "synthesizer_tests.rs"]
mod tests;
