use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use dirsweep::cleaner;
use dirsweep::cli::args::{Cli, Settings};
use dirsweep::cli::output;
use dirsweep::common::config::{Config, OutputFormat};
use dirsweep::common::errors::SweepError;
use dirsweep::scanner;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("dirsweep=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cmd_sweep(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            match e.downcast_ref::<SweepError>() {
                Some(sweep_err) => ExitCode::from(sweep_err.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

// ─── Sweep ────────────────────────────────────────────────────────────────────

fn cmd_sweep(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let Settings {
        root,
        options,
        action,
        confirm,
        sample_limit,
        format,
    } = cli.settings(&config)?;

    let show_progress = matches!(format, OutputFormat::Human);
    let plan = scanner::run_scan(&root, &options, show_progress);

    if matches!(format, OutputFormat::Human) {
        output::print_plan(&plan, &action, sample_limit);
    }

    let report = cleaner::clean(&plan, &action, confirm, show_progress)?;

    match format {
        OutputFormat::Human => output::print_report(&report),
        OutputFormat::Json => output::print_json(&plan, &report)?,
        OutputFormat::Quiet => output::print_quiet(&plan, &report),
    }

    Ok(())
}
