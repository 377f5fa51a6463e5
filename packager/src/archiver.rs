//! ZIP archive creation for skill packages.
//!
//! The archiver walks the package root with the scanner, so member order is
//! the scanner's deterministic walk order, and writes every file under a
//! single top-level directory named after the package. The archive is
//! written to a temporary file next to its destination, re-read to confirm
//! the member list, and only then renamed into place. Member timestamps are
//! pinned to the ZIP epoch so identical inputs produce identical bytes.

use crate::config::PackagerConfig;
use crate::error::{PackagerError, Result};
use crate::naming::ArchiveName;
use crate::scanner::{TreeReport, scan_tree_excluding};
use crate::validator::PackageRoot;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Input parameters for [`create_archive`].
#[derive(Debug, Clone, Copy)]
pub struct ArchiveParams<'a> {
    /// The package to archive.
    pub root: &'a PackageRoot,
    /// Archive file name and member prefix.
    pub name: &'a ArchiveName,
    /// Directory the archive is written to; created if missing.
    pub output_dir: &'a Utf8Path,
    /// Scanner configuration.
    pub config: &'a PackagerConfig,
}

/// Output produced by [`create_archive`].
#[derive(Debug, Clone)]
pub struct ArchiveOutput {
    /// Path to the written archive.
    pub archive_path: Utf8PathBuf,
    /// The scan the member list was taken from.
    pub report: TreeReport,
    /// Size of the archive in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 digest of the archive.
    pub sha256: String,
}

/// Return where the archive for `name` lands inside `output_dir`, if that
/// directory already exists.
///
/// The path is canonical so it can be compared with scanner paths.
#[must_use]
pub fn existing_destination(output_dir: &Utf8Path, name: &ArchiveName) -> Option<Utf8PathBuf> {
    output_dir
        .canonicalize_utf8()
        .ok()
        .map(|dir| dir.join(name.filename()))
}

/// Package every file under the root into `<output_dir>/<name>-v<version>.zip`.
///
/// An existing archive at the destination is replaced. If the destination
/// lies inside the package root it is left out of the member list.
///
/// # Errors
///
/// Returns [`PackagerError::Scan`] if the package cannot be walked, or
/// [`PackagerError::Archive`] if the output directory cannot be created or
/// the archive cannot be written. No file is left at the destination or in
/// the output directory on failure.
pub fn create_archive(params: &ArchiveParams<'_>) -> Result<ArchiveOutput> {
    fs::create_dir_all(params.output_dir)
        .map_err(|e| PackagerError::archive(params.output_dir, e))?;
    let output_dir = params
        .output_dir
        .canonicalize_utf8()
        .map_err(|e| PackagerError::archive(params.output_dir, e))?;
    let archive_path = output_dir.join(params.name.filename());

    let report = scan_tree_excluding(
        params.root,
        params.config,
        std::slice::from_ref(&archive_path),
    )?;
    let members = plan_members(params.root, params.name, &report);

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{}.", params.name.filename()))
        .suffix(".tmp")
        .tempfile_in(&output_dir)
        .map_err(|e| PackagerError::archive(&archive_path, e))?;

    write_members(temp.as_file_mut(), &members)
        .map_err(|e| PackagerError::archive(&archive_path, e))?;
    verify_members(&temp, &members).map_err(|e| PackagerError::archive(&archive_path, e))?;
    let (size, sha256) =
        measure(&temp).map_err(|e| PackagerError::archive(&archive_path, e))?;

    // Dropping `temp` on any error above removes the partial file.
    temp.persist(&archive_path)
        .map_err(|e| PackagerError::archive(&archive_path, e.error))?;

    info!(
        "created {archive_path} ({} member(s), {size} bytes)",
        members.len()
    );
    Ok(ArchiveOutput {
        archive_path,
        report,
        size,
        sha256,
    })
}

/// A file to add: where to read it from and its in-archive name.
#[derive(Debug)]
struct Member {
    source: Utf8PathBuf,
    name: String,
}

fn plan_members(root: &PackageRoot, name: &ArchiveName, report: &TreeReport) -> Vec<Member> {
    report
        .entries()
        .iter()
        .map(|entry| Member {
            source: root.join(&entry.relative_path),
            name: name.member_path(&entry.slash_path()),
        })
        .collect()
}

/// Errors raised while writing or checking the temporary archive.
#[derive(Debug, thiserror::Error)]
enum WriteError {
    #[error("{path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
    #[error("archive members do not match the package: expected {expected}, found {found}")]
    MemberMismatch { expected: usize, found: usize },
}

fn write_members(file: &mut fs::File, members: &[Member]) -> std::result::Result<(), WriteError> {
    let mut writer = ZipWriter::new(file);
    for member in members {
        let mut source = fs::File::open(&member.source).map_err(|source| WriteError::Read {
            path: member.source.clone(),
            source,
        })?;
        let mode = member_mode(&source).map_err(|e| WriteError::Read {
            path: member.source.clone(),
            source: e,
        })?;
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(mode);

        debug!("adding {}", member.name);
        writer.start_file(member.name.as_str(), options)?;
        io::copy(&mut source, &mut writer).map_err(|source| WriteError::Read {
            path: member.source.clone(),
            source,
        })?;
    }
    writer.finish()?;
    Ok(())
}

#[cfg(unix)]
fn member_mode(file: &fs::File) -> io::Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(file.metadata()?.permissions().mode() & 0o7777)
}

/// Permission bits recorded for members on platforms without Unix modes.
#[cfg(not(unix))]
fn member_mode(_file: &fs::File) -> io::Result<u32> {
    Ok(0o644)
}

/// Re-read the temporary archive and compare its members with the plan.
fn verify_members(temp: &NamedTempFile, members: &[Member]) -> std::result::Result<(), WriteError> {
    let archive = ZipArchive::new(temp.reopen()?)?;
    let found: Vec<&str> = archive.file_names().collect();
    let matches = found.len() == members.len()
        && members.iter().all(|m| found.contains(&m.name.as_str()));
    if matches {
        Ok(())
    } else {
        Err(WriteError::MemberMismatch {
            expected: members.len(),
            found: found.len(),
        })
    }
}

/// Return the size and SHA-256 digest of the temporary archive.
fn measure(temp: &NamedTempFile) -> io::Result<(u64, String)> {
    let mut file = temp.reopen()?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    let mut size = 0u64;
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        size += bytes_read as u64;
    }
    Ok((size, format!("{:x}", hasher.finalize())))
}

#[cfg(test)]
#[path = "archiver_tests.rs"]
mod tests;
