use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// ─── Core types ───────────────────────────────────────────────────────────────

/// A file that passed every filter in its directory
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    #[serde(serialize_with = "serialize_mtime")]
    pub modified: SystemTime,
    pub size_bytes: u64,
}

fn serialize_mtime<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let dt: chrono::DateTime<chrono::Local> = (*time).into();
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Ordered list of files selected for action, in tree-traversal order.
/// Built once by the walker and only read afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub root: PathBuf,
    pub files: Vec<Candidate>,
    pub duration_secs: f64,
    /// Directories or entries the walk could not read
    pub warnings: Vec<String>,
}

impl Plan {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            files: Vec::new(),
            duration_secs: 0.0,
            warnings: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|c| c.size_bytes).sum()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|c| c.path.as_path())
    }

    /// First `limit` planned paths, for previews
    pub fn sample(&self, limit: usize) -> &[Candidate] {
        &self.files[..self.files.len().min(limit)]
    }
}
