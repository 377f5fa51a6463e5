//! Skill packager CLI entrypoint.
//!
//! Packages a skill directory and prints the archive path on stdout. Progress
//! and deployment hints go to stderr unless `--quiet` is given.

use clap::Parser;
use skill_packager::cli::Cli;
use skill_packager::config::PackagerConfig;
use skill_packager::created_on::CreatedOn;
use skill_packager::error::Result;
use skill_packager::output::{DEPLOY_STEPS, Summary, ready_message};
use skill_packager::pipeline::{PackageRequest, package_skill};
use skill_packager::version::PackageVersion;
use std::io::Write;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PackagerConfig::load(path)?,
        None => PackagerConfig::default(),
    };
    let request = build_request(cli)?;
    let output = package_skill(&request, &config)?;

    if !cli.quiet {
        let summary = Summary {
            output: &output,
            version: &request.version,
        };
        write_line(stderr, summary.display_text());
        write_line(stderr, "");
        write_line(stderr, ready_message(&output));
        write_line(stderr, "");
        write_line(stderr, DEPLOY_STEPS);
    }
    write_line(stdout, &output.archive_path);
    Ok(())
}

/// Validate the free-form arguments before anything touches the disk.
fn build_request(cli: &Cli) -> Result<PackageRequest> {
    let version = PackageVersion::try_from(cli.package_version.as_str())?;
    let mut request = PackageRequest::new(&cli.package_path, version);
    if let Some(dir) = &cli.output_dir {
        request = request.with_output_dir(dir);
    }
    if let Some(date) = &cli.created {
        request = request.with_created_on(CreatedOn::try_from(date.as_str())?);
    }
    Ok(request)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}

fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
