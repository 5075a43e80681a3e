use std::path::{Component, Path, PathBuf};

use super::errors::SweepError;

/// Roots that must NEVER be swept, regardless of platform.
/// The home directory is checked separately since it is only known at runtime.
const DANGEROUS_ROOTS: &[&str] = &["/", "C:\\"];

/// Anchored paths with this many components or fewer are refused.
/// The anchor (drive prefix plus root) counts as one component.
const MIN_SAFE_COMPONENTS: usize = 3;

/// Check if a resolved path must never be swept
pub fn is_dangerous(path: &Path) -> bool {
    if DANGEROUS_ROOTS.iter().any(|root| path == Path::new(root)) {
        return true;
    }

    if let Some(home) = dirs::home_dir() {
        if path == home {
            return true;
        }
        if let Ok(resolved_home) = home.canonicalize() {
            if path == resolved_home {
                return true;
            }
        }
    }

    is_near_root(path)
}

/// Heuristic for "too close to a root": `/tmp` and `C:\Users` are blocked,
/// `/tmp/build` is not.
pub fn is_near_root(path: &Path) -> bool {
    let mut anchored = false;
    let mut parts = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchored = true,
            Component::Normal(_) | Component::CurDir | Component::ParentDir => parts += 1,
        }
    }

    anchored && parts + 1 < MIN_SAFE_COMPONENTS
}

/// Expand a leading `~` to the home directory
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Resolve a path the way the walker compares paths: symlinks followed when
/// the path exists, otherwise the parent is resolved and the name re-attached.
pub fn resolve(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }

    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        if let Ok(parent) = parent.canonicalize() {
            return parent.join(name);
        }
    }

    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Validate the sweep target and return its resolved form.
///
/// Checks, in order: absolute after `~` expansion, exists as a directory,
/// not a dangerous root. Nothing on disk is modified.
pub fn validate_target(raw: &str) -> Result<PathBuf, SweepError> {
    let expanded = expand_home(raw);
    if !expanded.is_absolute() {
        return Err(SweepError::NotAbsolute { path: expanded });
    }

    let root = resolve(&expanded);
    if !root.is_dir() {
        return Err(SweepError::NotADirectory { path: root });
    }

    if is_dangerous(&root) {
        return Err(SweepError::BlockedPath { path: root });
    }

    tracing::debug!(root = %root.display(), "target validated");
    Ok(root)
}
