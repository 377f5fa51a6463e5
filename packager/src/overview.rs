//! Fallback overview (README) detection and rendering.
//!
//! Detection and rendering are separate from writing so that the
//! skip-on-exists rule in [`crate::synthesizer`] can be tested on its own.

use crate::config::PackagerConfig;
use crate::created_on::CreatedOn;
use crate::error::{PackagerError, Result};
use crate::naming::ArchiveName;
use crate::scanner::TreeReport;
use crate::tree_report::draw_tree;
use camino::{Utf8Path, Utf8PathBuf};

/// Return `true` if `file_name` names a README-equivalent document.
///
/// Matches `README` and `README.<ext>` case-insensitively.
///
/// # Examples
///
/// ```
/// use skill_packager::overview::is_overview_name;
///
/// assert!(is_overview_name("README.md"));
/// assert!(is_overview_name("readme.txt"));
/// assert!(is_overview_name("README"));
/// assert!(!is_overview_name("READMEFIRST.md"));
/// ```
#[must_use]
pub fn is_overview_name(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower == "readme" || lower.starts_with("readme.")
}

/// Find an existing overview document directly in `root`.
///
/// The configured overview name always counts; other README-equivalents
/// count when they are regular files.
///
/// # Errors
///
/// Returns [`PackagerError::Scan`] if the root cannot be listed.
pub fn find_existing(root: &Utf8Path, config: &PackagerConfig) -> Result<Option<Utf8PathBuf>> {
    let configured = root.join(&config.overview_name);
    if configured.is_file() {
        return Ok(Some(configured));
    }

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|e| PackagerError::scan(root, e))? {
        let entry = entry.map_err(|e| PackagerError::scan(root, e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let path = root.join(name);
        if is_overview_name(name) && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Inputs for [`render_overview`].
#[derive(Debug, Clone, Copy)]
pub struct OverviewContext<'a> {
    /// Archive name, which also carries the package name and version.
    pub archive: &'a ArchiveName,
    /// Optional creation date.
    pub created_on: Option<&'a CreatedOn>,
    /// Names of the manifest and generated documents.
    pub config: &'a PackagerConfig,
}

/// Turn a package directory name into a display title.
///
/// Hyphens and underscores become spaces and each word is capitalised.
///
/// # Examples
///
/// ```
/// use skill_packager::overview::display_title;
///
/// assert_eq!(display_title("billing-migration"), "Billing Migration");
/// assert_eq!(display_title("pdf_TOOLS"), "Pdf Tools");
/// ```
#[must_use]
pub fn display_title(package_name: &str) -> String {
    package_name
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a minimal README for a package that has none.
///
/// The structure section lists file names with their classification only,
/// plus the two generated documents, so it matches the archive layout.
#[must_use]
pub fn render_overview(report: &TreeReport, context: &OverviewContext<'_>) -> String {
    let name = context.archive.package_name();
    let version = context.archive.version();
    let archive_file = context.archive.filename();
    let config = context.config;

    let mut files: Vec<(String, Option<&str>)> = report
        .entries()
        .iter()
        .map(|e| (e.slash_path(), Some(e.classification.label())))
        .collect();
    for generated in [&config.tree_report_name, &config.overview_name] {
        if !files.iter().any(|(path, _)| path == generated) {
            files.push((generated.clone(), Some("generated")));
        }
    }
    let tree = draw_tree(name, &files).join("\n");

    let created = context
        .created_on
        .map(|date| format!("**Created:** {date}  \n"))
        .unwrap_or_default();

    format!(
        concat!(
            "# {title}\n",
            "\n",
            "**Version:** {version}  \n",
            "{created}",
            "\n",
            "## Quick Deploy\n",
            "\n",
            "1. **Unzip**\n",
            "   ```bash\n",
            "   unzip {archive_file}\n",
            "   ```\n",
            "\n",
            "2. **Install in Claude Desktop**\n",
            "   - Open Claude Desktop → Settings → Capabilities → Skills\n",
            "   - Click \"Add Skill\" or \"Upload Skill\"\n",
            "   - Select the `{name}` folder\n",
            "\n",
            "3. **Verify**\n",
            "   - Skill appears in your skills list\n",
            "   - Available in all conversations\n",
            "\n",
            "## Alternative: Manual Installation\n",
            "\n",
            "```bash\n",
            "# macOS\n",
            "cp -r {name} ~/Library/Application\\ Support/Claude/skills/\n",
            "\n",
            "# Claude Code (personal skills)\n",
            "cp -r {name} ~/.claude/skills/\n",
            "\n",
            "# Windows\n",
            "xcopy /E /I {name} %APPDATA%\\Claude\\skills\\{name}\n",
            "```\n",
            "\n",
            "## Structure\n",
            "\n",
            "```text\n",
            "{tree}\n",
            "```\n",
            "\n",
            "See `{report_name}` for sizes and the token budget.\n",
            "\n",
            "## Usage\n",
            "\n",
            "See `{manifest}` for:\n",
            "- Quick start\n",
            "- Common scenarios\n",
            "- Error handling\n",
        ),
        title = display_title(name),
        version = version,
        created = created,
        archive_file = archive_file,
        name = name,
        tree = tree,
        report_name = config.tree_report_name,
        manifest = config.manifest_name,
    )
}

#[cfg(test)]
#[path = "overview_tests.rs"]
mod tests;
