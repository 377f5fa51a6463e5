//! File classification by package layer.
//!
//! A skill package keeps its entry manifest at the root, helper scripts under
//! the scripts directory and deep-reference material under the resources
//! directory. [`classify`] maps any relative path onto that closed set of
//! tags and never fails.

use crate::config::PackagerConfig;
use camino::{Utf8Component, Utf8Path};
use std::fmt;

/// The layer a file belongs to, derived from where it sits in the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    /// A file directly in the package root (the manifest and its siblings).
    Manifest,
    /// A file under the scripts directory.
    Script,
    /// A file under the resources directory.
    Resource,
    /// Anything else.
    Other,
}

impl Classification {
    /// All classifications in report order.
    pub const ALL: [Self; 4] = [Self::Manifest, Self::Script, Self::Resource, Self::Other];

    /// Return the lowercase label used in generated documents.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::Script => "script",
            Self::Resource => "resource",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a path relative to the package root.
///
/// Single-component paths are root files. Otherwise the first component
/// decides: the configured scripts or resources directory, or other.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use skill_packager::classification::{Classification, classify};
/// use skill_packager::config::PackagerConfig;
///
/// let config = PackagerConfig::default();
/// assert_eq!(classify(Utf8Path::new("SKILL.md"), &config), Classification::Manifest);
/// assert_eq!(classify(Utf8Path::new("scripts/run.py"), &config), Classification::Script);
/// assert_eq!(classify(Utf8Path::new("assets/logo.png"), &config), Classification::Other);
/// ```
#[must_use]
pub fn classify(relative: &Utf8Path, config: &PackagerConfig) -> Classification {
    let mut components = relative
        .components()
        .filter(|c| !matches!(c, Utf8Component::CurDir));

    let Some(Utf8Component::Normal(first)) = components.next() else {
        return Classification::Other;
    };
    if components.next().is_none() {
        return Classification::Manifest;
    }

    if first == config.scripts_dir {
        Classification::Script
    } else if first == config.resources_dir {
        Classification::Resource
    } else {
        Classification::Other
    }
}
