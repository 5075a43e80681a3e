use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use dirsweep::common::format;
use dirsweep::common::safety;
use dirsweep::scanner::{build_plan, AgeCutoff, ExclusionList, FilterSet, Plan, PlanOptions};

fn touch(path: &Path, age_days: u64) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "data").unwrap();
    let mtime = SystemTime::now() - Duration::from_secs(age_days * 86400);
    std::fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

fn rel_names(plan: &Plan) -> Vec<String> {
    plan.paths()
        .map(|p| {
            p.strip_prefix(&plan.root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

// ─── Safety tests ─────────────────────────────────────────────────────────────

#[test]
fn test_dangerous_roots() {
    assert!(safety::is_dangerous(Path::new("/")));
    assert!(safety::is_dangerous(Path::new("C:\\")));
    assert!(safety::is_dangerous(Path::new("/etc")));
    assert!(!safety::is_dangerous(Path::new("/srv/app/logs")));
}

#[test]
fn test_resolve_missing_path_uses_parent() {
    let dir = TempDir::new().unwrap();
    let resolved = safety::resolve(&dir.path().join("missing.log"));
    assert_eq!(resolved, dir.path().canonicalize().unwrap().join("missing.log"));
}

// ─── Format tests ─────────────────────────────────────────────────────────────

#[test]
fn test_format_size_boundaries() {
    assert_eq!(format::format_size(0), "0 B");
    assert_eq!(format::format_size(1023), "1023 B");
    assert_eq!(format::format_size(1024), "1.0 KB");
    assert!(format::format_size(u64::MAX).ends_with(" GB"));
}

#[test]
fn test_format_path_without_home() {
    let formatted = format::format_path(Path::new("/srv/app/a.log"));
    assert_eq!(formatted, "/srv/app/a.log");
}

// ─── Planner tests ────────────────────────────────────────────────────────────

#[test]
fn test_combined_filters() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("app-old.log"), 20);
    touch(&dir.path().join("app-new.log"), 1);
    touch(&dir.path().join("web-old.log"), 20);
    touch(&dir.path().join("app-old.txt"), 20);

    let options = PlanOptions {
        filters: FilterSet::new(Some("log"), Some("app-*")).unwrap(),
        cutoff: AgeCutoff::from_days(7),
        ..Default::default()
    };
    let plan = build_plan(dir.path(), &options);
    assert_eq!(rel_names(&plan), vec!["app-old.log"]);
}

#[test]
fn test_keep_is_independent_of_age() {
    // The newest matching files are kept even when all of them are old
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("a.log"), 30);
    touch(&dir.path().join("b.log"), 20);
    touch(&dir.path().join("c.log"), 10);

    let options = PlanOptions {
        cutoff: AgeCutoff::from_days(5),
        keep: 1,
        ..Default::default()
    };
    let plan = build_plan(dir.path(), &options);
    assert_eq!(rel_names(&plan), vec!["b.log", "a.log"]);
}

#[test]
fn test_keep_counts_only_matching_files() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("a.log"), 3);
    touch(&dir.path().join("b.log"), 2);
    touch(&dir.path().join("fresh.txt"), 0);

    let options = PlanOptions {
        filters: FilterSet::new(Some(".log"), None).unwrap(),
        keep: 1,
        ..Default::default()
    };
    let plan = build_plan(dir.path(), &options);
    assert_eq!(rel_names(&plan), vec!["a.log"]);
}

#[test]
fn test_traversal_order_is_top_down() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("b/deep/x.log"), 0);
    touch(&dir.path().join("a/y.log"), 0);
    touch(&dir.path().join("z.log"), 0);
    touch(&dir.path().join("b/w.log"), 0);

    let plan = build_plan(dir.path(), &PlanOptions::default());
    assert_eq!(
        rel_names(&plan),
        vec!["z.log", "a/y.log", "b/w.log", "b/deep/x.log"]
    );
}

#[test]
fn test_excluded_file_never_planned() {
    let dir = TempDir::new().unwrap();
    let pinned = dir.path().join("pinned.log");
    touch(&pinned, 0);
    touch(&dir.path().join("other.log"), 0);

    let options = PlanOptions {
        exclusions: ExclusionList::new([&pinned]),
        ..Default::default()
    };
    let plan = build_plan(dir.path(), &options);
    assert_eq!(rel_names(&plan), vec!["other.log"]);
}

#[test]
fn test_excluded_root_yields_empty_plan() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("a.log"), 0);

    let options = PlanOptions {
        exclusions: ExclusionList::new([dir.path()]),
        ..Default::default()
    };
    let plan = build_plan(dir.path(), &options);
    assert!(plan.is_empty());
}

#[test]
fn test_planning_is_read_only() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("a.log"), 10);
    touch(&dir.path().join("sub/b.log"), 10);

    let options = PlanOptions {
        cutoff: AgeCutoff::from_days(1),
        keep: 1,
        ..Default::default()
    };
    let plan = build_plan(dir.path(), &options);

    assert!(plan.is_empty());
    assert!(dir.path().join("a.log").exists());
    assert!(dir.path().join("sub/b.log").exists());
}
