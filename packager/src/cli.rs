//! CLI argument definitions for the skill packager.
//!
//! Kept apart from the binary so that parsing can be unit tested and the
//! entrypoint stays focused on orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

/// Package a skill directory into a versioned ZIP archive.
#[derive(Parser, Debug)]
#[command(name = "skill-packager")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package a skill directory into a versioned ZIP archive.\n\n",
    "The directory must contain a SKILL.md manifest. The packager writes a ",
    "DIRECTORY_STRUCTURE.txt report with file sizes and estimated token counts, ",
    "adds a README.md if the package has none, and archives everything as ",
    "<name>-v<version>.zip with a single top-level <name>/ folder.\n\n",
    "The archive is written next to the package unless OUTPUT_DIR is given. ",
    "Its path is printed on stdout.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package into the parent directory:\n",
    "    $ skill-packager skills/billing-migration 1.0\n\n",
    "  Package into a release directory:\n",
    "    $ skill-packager skills/billing-migration 2.2 dist/\n\n",
    "  Stamp generated documents with a date:\n",
    "    $ skill-packager skills/billing-migration 2.2 --created 2026-10-18\n\n",
    "Set RUST_LOG=info to trace each stage.",
))]
pub struct Cli {
    /// Path to the skill package directory.
    #[arg(value_name = "PACKAGE_PATH")]
    pub package_path: Utf8PathBuf,

    /// Version label used in the archive name (for example 1.0).
    #[arg(value_name = "VERSION")]
    pub package_version: String,

    /// Directory to write the archive to [default: the package's parent].
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// TOML file overriding manifest, directory, and report names.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Stamp generated documents with this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub created: Option<String>,

    /// Print only the archive path.
    #[arg(short, long)]
    pub quiet: bool,
}
