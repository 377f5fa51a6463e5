//! Packager configuration.
//!
//! Every fixed name the packager relies on (the entry manifest, the layer
//! directories, the generated documents) and the bytes-per-unit divisor live
//! in [`PackagerConfig`]. The value is passed explicitly to each stage so that
//! tests can override any of it. Overrides may also be loaded from a TOML
//! file; omitted keys keep their defaults.

use crate::error::{PackagerError, Result};
use crate::overview::is_overview_name;
use camino::Utf8Path;
use serde::Deserialize;

/// Names and calibration constants used across the packaging pipeline.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerConfig {
    /// File that must sit directly in the package root (case-sensitive).
    pub manifest_name: String,
    /// Top-level directory whose files are classified as scripts.
    pub scripts_dir: String,
    /// Top-level directory whose files are classified as resources.
    pub resources_dir: String,
    /// Divisor used to turn a byte count into estimated content units.
    ///
    /// The default of 4 follows the common "about four characters per token"
    /// heuristic for English prose. It is a calibration value only.
    pub bytes_per_unit: u64,
    /// Name of the generated tree report.
    pub tree_report_name: String,
    /// Name of the overview document generated when none exists.
    pub overview_name: String,
}

impl PackagerConfig {
    /// Default entry manifest name.
    pub const DEFAULT_MANIFEST_NAME: &'static str = "SKILL.md";
    /// Default scripts directory name.
    pub const DEFAULT_SCRIPTS_DIR: &'static str = "scripts";
    /// Default resources directory name.
    pub const DEFAULT_RESOURCES_DIR: &'static str = "resources";
    /// Default bytes-per-unit divisor.
    pub const DEFAULT_BYTES_PER_UNIT: u64 = 4;
    /// Default tree report file name.
    pub const DEFAULT_TREE_REPORT_NAME: &'static str = "DIRECTORY_STRUCTURE.txt";
    /// Default overview file name.
    pub const DEFAULT_OVERVIEW_NAME: &'static str = "README.md";

    /// Parse overrides from TOML source.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Config`] if the source is not valid TOML,
    /// contains unknown keys, or sets a value that fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use skill_packager::config::PackagerConfig;
    ///
    /// let config = PackagerConfig::from_toml_str(
    ///     "bytes_per_unit = 3\n",
    ///     Utf8Path::new("packager.toml"),
    /// )
    /// .expect("valid configuration");
    /// assert_eq!(config.bytes_per_unit, 3);
    /// assert_eq!(config.manifest_name, "SKILL.md");
    /// ```
    pub fn from_toml_str(source: &str, origin: &Utf8Path) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| PackagerError::Config {
            path: origin.to_owned(),
            reason: e.message().to_owned(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Config`] if the file cannot be read or
    /// fails [`Self::from_toml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| PackagerError::Config {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source, path)
    }

    fn validate(&self, origin: &Utf8Path) -> Result<()> {
        let invalid = |reason: String| PackagerError::Config {
            path: origin.to_owned(),
            reason,
        };

        if self.bytes_per_unit == 0 {
            return Err(invalid("bytes_per_unit must be greater than zero".to_owned()));
        }

        let names = [
            ("manifest_name", &self.manifest_name),
            ("scripts_dir", &self.scripts_dir),
            ("resources_dir", &self.resources_dir),
            ("tree_report_name", &self.tree_report_name),
            ("overview_name", &self.overview_name),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(invalid(format!("{key} must not be empty")));
            }
            if value.contains(['/', '\\']) {
                return Err(invalid(format!(
                    "{key} must be a single path component, got \"{value}\""
                )));
            }
        }

        if self.overview_name == self.manifest_name {
            return Err(invalid("overview_name must differ from manifest_name".to_owned()));
        }
        let report = &self.tree_report_name;
        let clashes = [
            ("manifest_name", &self.manifest_name),
            ("overview_name", &self.overview_name),
        ];
        for (key, value) in clashes {
            if report == value {
                return Err(invalid(format!("tree_report_name must differ from {key}")));
            }
        }
        if is_overview_name(report) {
            return Err(invalid(format!(
                "tree_report_name \"{report}\" would be taken for the package overview"
            )));
        }
        Ok(())
    }
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            manifest_name: Self::DEFAULT_MANIFEST_NAME.to_owned(),
            scripts_dir: Self::DEFAULT_SCRIPTS_DIR.to_owned(),
            resources_dir: Self::DEFAULT_RESOURCES_DIR.to_owned(),
            bytes_per_unit: Self::DEFAULT_BYTES_PER_UNIT,
            tree_report_name: Self::DEFAULT_TREE_REPORT_NAME.to_owned(),
            overview_name: Self::DEFAULT_OVERVIEW_NAME.to_owned(),
        }
    }
}
