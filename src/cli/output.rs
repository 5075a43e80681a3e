use colored::*;
use serde::Serialize;
use std::path::Path;

use crate::cleaner::{Action, CleanReport, Failure};
use crate::common::format;
use crate::scanner::{Candidate, Plan};

/// Print the plan summary in human-readable format
pub fn print_plan(plan: &Plan, action: &Action, sample_limit: usize) {
    println!();
    println!("{}", "== Plan ==".bold());
    format::print_kv("Root", &plan.root.display().to_string());
    format::print_kv("Action", &action_label(action).to_string());
    format::print_kv(
        "Matches",
        &format!(
            "{} ({})",
            format::format_count(plan.len()),
            format::format_size(plan.total_bytes()).bold()
        ),
    );
    format::print_kv("Scanned in", &format::format_duration(plan.duration_secs));

    for candidate in plan.sample(sample_limit) {
        println!("   - {}", candidate.path.display());
    }
    if plan.len() > sample_limit {
        println!(
            "   {}",
            format!("... and {} more", plan.len() - sample_limit).dimmed()
        );
    }

    if !plan.warnings.is_empty() {
        println!();
        println!(
            "  {} {}",
            "⚠".yellow(),
            format!("{} entries could not be read:", plan.warnings.len()).yellow()
        );
        for warning in &plan.warnings {
            println!("    {} {}", "→".dimmed(), warning.dimmed());
        }
    }
}

fn action_label(action: &Action) -> ColoredString {
    match action {
        Action::Delete => action.to_string().red().bold(),
        Action::Trash(_) => action.to_string().yellow(),
    }
}

/// Print the outcome of the run
pub fn print_report(report: &CleanReport) {
    println!();
    if !report.executed {
        println!(
            "{}",
            "Simulation only: nothing was changed. Add --confirm to execute.".yellow()
        );
        return;
    }

    print_failures(&report.failures);
    println!(
        "{} {} processed ({}).",
        "Done.".green().bold(),
        format::format_count(report.processed),
        format::format_size(report.bytes_processed)
    );
    if !report.failures.is_empty() {
        println!(
            "  {} {} could not be processed",
            "⚠".yellow(),
            format::format_count(report.failures.len())
        );
    }
}

/// Per-file errors always go to stderr
pub fn print_failures(failures: &[Failure]) {
    for failure in failures {
        eprintln!(
            "{} could not process {}: {}",
            "[error]".red(),
            failure.path.display(),
            failure.error
        );
    }
}

/// Single-line output: matched count and processed count
pub fn print_quiet(plan: &Plan, report: &CleanReport) {
    print_failures(&report.failures);
    println!("{} {}", plan.len(), report.processed);
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    root: &'a Path,
    action: &'a Action,
    matched: usize,
    total_bytes: u64,
    files: &'a [Candidate],
    warnings: &'a [String],
    executed: bool,
    processed: usize,
    bytes_processed: u64,
    failures: &'a [Failure],
}

/// One JSON document covering both the plan and the execution
pub fn print_json(plan: &Plan, report: &CleanReport) -> anyhow::Result<()> {
    print_failures(&report.failures);
    let output = JsonOutput {
        root: &plan.root,
        action: &report.action,
        matched: plan.len(),
        total_bytes: plan.total_bytes(),
        files: &plan.files,
        warnings: &plan.warnings,
        executed: report.executed,
        processed: report.processed,
        bytes_processed: report.bytes_processed,
        failures: &report.failures,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
