//! Output formatting for the packager CLI.
//!
//! Everything here is plain text for stderr. The archive path itself is
//! printed by the binary on stdout.

use crate::pipeline::PackageOutput;
use crate::version::PackageVersion;

/// Steps printed after a successful run.
pub const DEPLOY_STEPS: &str = concat!(
    "To deploy:\n",
    "1. Unzip the package\n",
    "2. Claude Desktop → Settings → Capabilities → Skills → Add Skill\n",
    "3. Select the skill folder",
);

/// Format an archive size for display in KiB, rounded to one decimal.
///
/// # Examples
///
/// ```
/// use skill_packager::output::format_size;
///
/// assert_eq!(format_size(512), "0.5 KB");
/// assert_eq!(format_size(10_240), "10.0 KB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    let tenths = bytes.saturating_mul(10).saturating_add(512) / 1024;
    format!("{}.{} KB", tenths / 10, tenths % 10)
}

/// A summary of one packaging run.
#[derive(Debug)]
pub struct Summary<'a> {
    /// The completed run.
    pub output: &'a PackageOutput,
    /// The version that was packaged.
    pub version: &'a PackageVersion,
}

impl Summary<'_> {
    /// Format the summary for display.
    ///
    /// ```text
    /// Packaging: demo v1.0
    ///    Source: /skills/demo
    ///    5 files, 1402 bytes, ~351 tokens
    ///    Generated DIRECTORY_STRUCTURE.txt
    ///    Generated README.md
    ///    Created demo-v1.0.zip (1.1 KB)
    ///    SHA-256: 3f4c...
    /// ```
    #[must_use]
    pub fn display_text(&self) -> String {
        let output = self.output;
        let totals = output.report.totals();
        let files = if totals.files == 1 { "file" } else { "files" };
        let report_name = output.tree_report_path.file_name().unwrap_or_default();
        let overview_name = output.overview.path().file_name().unwrap_or_default();
        let overview_line = if output.overview.was_generated() {
            format!("Generated {overview_name}")
        } else {
            format!("Using existing {overview_name}")
        };
        let archive_name = output.archive_path.file_name().unwrap_or_default();

        [
            format!(
                "Packaging: {} v{}",
                output.report.package_name(),
                self.version
            ),
            format!("   Source: {}", output.package_root),
            format!(
                "   {} {files}, {} bytes, ~{} tokens",
                totals.files, totals.bytes, totals.units
            ),
            format!("   Generated {report_name}"),
            format!("   {overview_line}"),
            format!(
                "   Created {archive_name} ({})",
                format_size(output.archive_size)
            ),
            format!("   SHA-256: {}", output.sha256),
        ]
        .join("\n")
    }
}

/// Format the closing message naming the archive.
#[must_use]
pub fn ready_message(output: &PackageOutput) -> String {
    format!("Package ready: {}", output.archive_path)
}
