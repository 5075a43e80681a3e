use std::path::PathBuf;

/// Errors that stop a run before the filesystem is touched.
/// The binary reports these with `anyhow` and maps them to an exit code,
/// while per-file failures during execution stay inside the clean report.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// `--path` was given as a relative path
    #[error("--path must be absolute: {}", path.display())]
    NotAbsolute { path: PathBuf },

    /// Target is missing or is not a directory
    #[error("path does not exist or is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Target resolved to a root, the home directory, or too close to a root
    #[error("BLOCKED for safety: {}", path.display())]
    BlockedPath { path: PathBuf },

    /// Glob pattern could not be compiled
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration file is missing or malformed
    #[error("config error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Trash root could not be created
    #[error("cannot prepare trash directory '{}'", path.display())]
    Trash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SweepError {
    /// Every variant is a precondition failure.
    pub fn exit_code(&self) -> u8 {
        2
    }
}
