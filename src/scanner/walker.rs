use std::cmp::{Ordering, Reverse};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::{DirEntry, WalkDir};

use super::matcher::{AgeCutoff, ExclusionList, FilterSet};
use super::plan::{Candidate, Plan};

/// Everything the walker needs to decide what goes into a plan
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub filters: FilterSet,
    pub cutoff: AgeCutoff,
    pub exclusions: ExclusionList,
    /// Newest matching files kept per directory; 0 keeps none
    pub keep: usize,
}

/// Walk `root` top-down and collect every file that should be acted on.
///
/// Only reads the filesystem. Unreadable entries become plan warnings.
pub fn build_plan(root: &Path, options: &PlanOptions) -> Plan {
    let start = Instant::now();
    let mut plan = Plan::new(root.to_path_buf());

    tracing::debug!(
        extensions = ?options.filters.extensions(),
        cutoff_active = options.cutoff.is_active(),
        keep = options.keep,
        "planning"
    );
    if !options.exclusions.is_empty() {
        for excluded in options.exclusions.resolved() {
            tracing::debug!(path = %excluded.display(), "exclusion");
        }
    }

    // Files sort ahead of directories so each directory's files arrive
    // together, right after the directory itself.
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| {
            if e.file_type().is_dir() && options.exclusions.is_excluded(e.path()) {
                tracing::debug!(dir = %e.path().display(), "excluded directory");
                return false;
            }
            true
        });

    let mut group: Vec<Candidate> = Vec::new();
    let mut group_dir: PathBuf = root.to_path_buf();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                plan.warnings.push(e.to_string());
                continue;
            }
        };

        if entry.file_type().is_dir() {
            flush_group(&group_dir, &mut group, options.keep, &mut plan.files);
            group_dir = entry.path().to_path_buf();
            continue;
        }

        if let Some(candidate) = evaluate(&entry, options, &mut plan.warnings) {
            group.push(candidate);
        }
    }
    flush_group(&group_dir, &mut group, options.keep, &mut plan.files);

    plan.duration_secs = start.elapsed().as_secs_f64();
    tracing::debug!(
        root = %root.display(),
        planned = plan.len(),
        "plan built"
    );
    plan
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
}

/// Apply exclusions, the matcher, and the age cutoff to a single file
fn evaluate(entry: &DirEntry, options: &PlanOptions, warnings: &mut Vec<String>) -> Option<Candidate> {
    let path = entry.path();

    // Symlinks count as files unless they point at a directory
    let metadata = match std::fs::metadata(path) {
        Ok(m) if m.is_dir() => return None,
        Ok(m) => m,
        Err(_) => match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot stat file");
                warnings.push(format!("{}: {}", path.display(), e));
                return None;
            }
        },
    };

    if options.exclusions.is_excluded(path) {
        tracing::debug!(path = %path.display(), "excluded file");
        return None;
    }

    if !options.filters.matches(path) {
        return None;
    }

    let modified = match metadata.modified() {
        Ok(t) => t,
        Err(e) => {
            warnings.push(format!("{}: {}", path.display(), e));
            return None;
        }
    };

    if !options.cutoff.admits(modified) {
        return None;
    }

    Some(Candidate {
        path: path.to_path_buf(),
        modified,
        size_bytes: metadata.len(),
    })
}

/// Apply the per-directory retention rule and move survivors into the plan
fn flush_group(dir: &Path, group: &mut Vec<Candidate>, keep: usize, out: &mut Vec<Candidate>) {
    if keep > 0 && group.len() > keep {
        group.sort_by_key(|c| Reverse(c.modified));
        tracing::debug!(
            dir = %dir.display(),
            kept = keep,
            trimmed = group.len() - keep,
            "retention applied"
        );
        out.extend(group.drain(..).skip(keep));
    } else if keep > 0 {
        tracing::debug!(dir = %dir.display(), matched = group.len(), "all matches retained");
        group.clear();
    } else {
        out.append(group);
    }
}
