use chrono::{DateTime, Duration, Local};
use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::common::errors::SweepError;
use crate::common::safety;

/// Extension and name filters applied to every file
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    /// Lowercase extensions with a leading `.`; `None` means any extension
    extensions: Option<HashSet<String>>,
    pattern: Option<Pattern>,
}

impl FilterSet {
    /// Build filters from the raw `--extensions` list and `--pattern` glob
    pub fn new(extensions: Option<&str>, pattern: Option<&str>) -> Result<Self, SweepError> {
        let pattern = pattern
            .map(|p| {
                Pattern::new(p).map_err(|e| SweepError::InvalidPattern {
                    pattern: p.to_string(),
                    message: e.msg.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            extensions: extensions.and_then(normalize_extensions),
            pattern,
        })
    }

    pub fn extensions(&self) -> Option<&HashSet<String>> {
        self.extensions.as_ref()
    }

    /// True only if every supplied filter accepts the file
    pub fn matches(&self, path: &Path) -> bool {
        if let Some(exts) = &self.extensions {
            let suffix = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            if !exts.contains(&suffix) {
                return false;
            }
        }

        if let Some(pattern) = &self.pattern {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            if !pattern.matches(&name) {
                return false;
            }
        }

        true
    }
}

/// Normalize a comma list like `log, .TMP,,bak` into `{.log, .tmp, .bak}`.
/// Returns `None` when nothing usable remains.
pub fn normalize_extensions(raw: &str) -> Option<HashSet<String>> {
    let set: HashSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|e| {
            if e.starts_with('.') {
                e.to_lowercase()
            } else {
                format!(".{}", e.to_lowercase())
            }
        })
        .collect();

    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

/// Modification-time cutoff computed once per run
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeCutoff {
    limit: AgeLimit,
}

#[derive(Debug, Clone, Copy, Default)]
enum AgeLimit {
    #[default]
    Off,
    Before(DateTime<Local>),
    /// `now - days` falls outside the representable calendar; no file is that old
    Unreachable,
}

impl AgeCutoff {
    /// `days == 0` disables age filtering
    pub fn from_days(days: u32) -> Self {
        Self::at(Local::now(), days)
    }

    pub fn at(now: DateTime<Local>, days: u32) -> Self {
        if days == 0 {
            return Self::default();
        }
        let limit = Duration::try_days(i64::from(days))
            .and_then(|age| now.checked_sub_signed(age))
            .map_or(AgeLimit::Unreachable, AgeLimit::Before);
        Self { limit }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.limit, AgeLimit::Off)
    }

    /// Files modified after the cutoff are too new
    pub fn admits(&self, modified: SystemTime) -> bool {
        match self.limit {
            AgeLimit::Off => true,
            AgeLimit::Before(cutoff) => DateTime::<Local>::from(modified) <= cutoff,
            AgeLimit::Unreachable => false,
        }
    }
}

/// Resolved paths whose subtrees are never planned.
/// Matching is a plain string prefix test on the resolved path.
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    prefixes: Vec<String>,
}

impl ExclusionList {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut list = Self::default();
        for path in paths {
            list.push(path.as_ref());
        }
        list
    }

    pub fn push(&mut self, path: &Path) {
        let resolved = safety::resolve(path);
        self.prefixes.push(resolved.to_string_lossy().into_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn resolved(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.prefixes.iter().map(PathBuf::from)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.prefixes.is_empty() {
            return false;
        }
        let resolved = safety::resolve(path);
        let resolved = resolved.to_string_lossy();
        self.prefixes.iter().any(|p| resolved.starts_with(p.as_str()))
    }
}
