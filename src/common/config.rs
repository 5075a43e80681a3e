use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::SweepError;

/// Defaults read from `~/.dirsweep/config.toml`.
/// Command-line flags always win over these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Paths appended to every `--exclude` list
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Trash directory used when `--trash` is not given
    #[serde(default)]
    pub trash_dir: Option<String>,

    /// Age threshold in days used when `--older-than` is not given
    #[serde(default)]
    pub older_than_days: u32,

    /// Retention count used when `--keep` is not given
    #[serde(default)]
    pub keep: usize,

    /// Number of planned paths shown in the summary
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Output format preference
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Quiet,
}

fn default_sample_limit() -> usize {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_paths: Vec::new(),
            trash_dir: None,
            older_than_days: 0,
            keep: 0,
            sample_limit: default_sample_limit(),
            output_format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// Get the dirsweep data directory (~/.dirsweep)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".dirsweep")
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from an explicit file, or from the default location.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SweepError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from_file(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, SweepError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SweepError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| SweepError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sample_limit, 30);
        assert_eq!(config.keep, 0);
        assert_eq!(config.older_than_days, 0);
        assert!(config.trash_dir.is_none());
        assert_eq!(config.output_format, OutputFormat::Human);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "exclude_paths = [\"/srv/keep\"]\nkeep = 3\noutput_format = \"json\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.exclude_paths, vec!["/srv/keep".to_string()]);
        assert_eq!(config.keep, 3);
        assert_eq!(config.sample_limit, 30);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/dirsweep.toml")));
        assert!(matches!(result, Err(SweepError::Config { .. })));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "keep = \"lots\"").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
