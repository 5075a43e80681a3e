pub mod matcher;
pub mod plan;
pub mod walker;

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

pub use matcher::{AgeCutoff, ExclusionList, FilterSet};
pub use plan::{Candidate, Plan};
pub use walker::{build_plan, PlanOptions};

/// Plan orchestrator - runs the walk behind an optional spinner
pub fn run_scan(root: &Path, options: &PlanOptions, show_progress: bool) -> Plan {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Scanning {}...", root.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let plan = build_plan(root, options);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    plan
}
