//! Skill packager library.
//!
//! This crate turns a skill directory (a folder holding a `SKILL.md`
//! manifest plus optional `scripts/` and `resources/`) into a versioned,
//! distributable ZIP archive. Along the way it writes a
//! `DIRECTORY_STRUCTURE.txt` report with per-file sizes and estimated token
//! counts, and a minimal `README.md` when the package has none. It is used by
//! the `skill-packager` CLI binary and can be driven programmatically through
//! [`pipeline::package_skill`].
//!
//! # Modules
//!
//! - [`archiver`] - Atomic ZIP creation with member verification
//! - [`classification`] - File classification by top-level directory
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Fixed names and the unit divisor, loadable from TOML
//! - [`created_on`] - Optional date stamp for generated documents
//! - [`error`] - Error taxonomy for every pipeline stage
//! - [`naming`] - Archive file and member naming
//! - [`output`] - Summary and deployment text for the CLI
//! - [`overview`] - README detection and rendering
//! - [`pipeline`] - End-to-end packaging orchestration
//! - [`scanner`] - Deterministic tree walk and size estimates
//! - [`synthesizer`] - Writing generated documents into the package
//! - [`tree_report`] - Plain-text tree report rendering
//! - [`validator`] - Package root validation
//! - [`version`] - Package version labels

pub mod archiver;
pub mod classification;
pub mod cli;
pub mod config;
pub mod created_on;
pub mod error;
pub mod naming;
pub mod output;
pub mod overview;
pub mod pipeline;
pub mod scanner;
pub mod synthesizer;
pub mod tree_report;
pub mod validator;
pub mod version;
