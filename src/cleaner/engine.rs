use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::staging;
use crate::common::errors::SweepError;
use crate::common::format;
use crate::scanner::Plan;

/// What happens to each planned file once the run is confirmed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Permanent removal, no undo
    Delete,
    /// Move under this trash root, mirroring the scanned tree
    Trash(PathBuf),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Delete => write!(f, "DELETE"),
            Action::Trash(root) => write!(f, "MOVE to trash ({})", root.display()),
        }
    }
}

/// A planned file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub error: String,
}

/// Report from a clean operation
#[derive(Debug, Serialize)]
pub struct CleanReport {
    pub action: Action,
    /// False for simulation runs
    pub executed: bool,
    pub processed: usize,
    pub bytes_processed: u64,
    pub failures: Vec<Failure>,
}

impl CleanReport {
    fn new(action: Action, executed: bool) -> Self {
        Self {
            action,
            executed,
            processed: 0,
            bytes_processed: 0,
            failures: Vec::new(),
        }
    }
}

/// Execute the plan.
///
/// Without confirmation nothing on disk changes, not even the trash root.
/// With confirmation every file is handled on its own; one failure never
/// stops the rest. Only an uncreatable trash root aborts the run, before any
/// file is touched.
pub fn clean(
    plan: &Plan,
    action: &Action,
    confirm: bool,
    show_progress: bool,
) -> Result<CleanReport, SweepError> {
    let mut report = CleanReport::new(action.clone(), confirm);
    if !confirm {
        return Ok(report);
    }

    if let Action::Trash(trash_root) = action {
        prepare_trash(trash_root)?;
    }

    let pb = if show_progress {
        let pb = ProgressBar::new(plan.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.red} [{bar:40.red/blue}] {pos}/{len} Processing... {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("━━░"),
        );
        Some(pb)
    } else {
        None
    };

    for candidate in &plan.files {
        if let Some(ref pb) = pb {
            pb.set_message(format::truncate_left(
                &format::format_path(&candidate.path),
                40,
            ));
        }

        let result = match action {
            Action::Delete => staging::delete_file(&candidate.path),
            Action::Trash(trash_root) => {
                staging::move_to_trash(&plan.root, trash_root, &candidate.path).map(|dest| {
                    tracing::debug!(
                        from = %candidate.path.display(),
                        to = %dest.display(),
                        "moved to trash"
                    );
                })
            }
        };

        match result {
            Ok(()) => {
                report.processed += 1;
                report.bytes_processed += candidate.size_bytes;
            }
            Err(e) => {
                tracing::warn!(path = %candidate.path.display(), error = %e, "file not processed");
                report.failures.push(Failure {
                    path: candidate.path.clone(),
                    error: format!("{:#}", e),
                });
            }
        }

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    Ok(report)
}

/// Create the trash root if it does not exist yet
pub fn prepare_trash(trash_root: &Path) -> Result<(), SweepError> {
    std::fs::create_dir_all(trash_root).map_err(|e| SweepError::Trash {
        path: trash_root.to_path_buf(),
        source: e,
    })
}
