use clap::Parser;
use std::path::PathBuf;

use crate::cleaner::Action;
use crate::common::config::{Config, OutputFormat};
use crate::common::errors::SweepError;
use crate::common::safety;
use crate::scanner::{AgeCutoff, ExclusionList, FilterSet, PlanOptions};

/// dirsweep: delete or trash old files by age, extension, and pattern
#[derive(Parser, Debug)]
#[command(
    name = "dirsweep",
    version,
    about = "Delete or trash files by age, extension, and pattern. Simulates by default.",
    long_about = "dirsweep walks a directory tree and deletes, or moves to a trash directory,\n\
                   the files matching the given filters. Nothing is touched without --confirm.",
    after_help = "EXAMPLES:\n  \
        dirsweep --path /srv/app/logs --extensions .log,.tmp --older-than 7\n  \
        dirsweep --path /srv/app/logs --pattern '*.bak' --keep 3 --confirm\n  \
        dirsweep --path /srv/app/cache --trash /srv/trash --confirm\n  \
        dirsweep --path /srv/app --exclude /srv/app/keep --format json"
)]
pub struct Cli {
    /// ABSOLUTE path of the directory to sweep
    #[arg(long, value_name = "DIR")]
    pub path: String,

    /// Comma-separated extensions, e.g. .log,.tmp
    #[arg(long, value_name = "LIST")]
    pub extensions: Option<String>,

    /// File name glob, e.g. '*.bak' (applied in addition to extensions)
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Only files older than N days (0 = ignore age)
    #[arg(long, value_name = "DAYS")]
    pub older_than: Option<u32>,

    /// Keep the N newest matching files in each directory (0 = keep none)
    #[arg(long, value_name = "N")]
    pub keep: Option<usize>,

    /// Absolute path to leave untouched (repeatable)
    #[arg(long, value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Move files here instead of deleting them (created if absent)
    #[arg(long, value_name = "DIR")]
    pub trash: Option<String>,

    /// Actually do it. Without this flag the run is only simulated
    #[arg(long)]
    pub confirm: bool,

    /// Config file (defaults to ~/.dirsweep/config.toml)
    #[arg(long, value_name = "FILE", env = "DIRSWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode: print only the matched and processed counts
    #[arg(long, short)]
    pub quiet: bool,
}

/// Fully resolved run parameters: command line merged over the config file
#[derive(Debug)]
pub struct Settings {
    pub root: PathBuf,
    pub options: PlanOptions,
    pub action: Action,
    pub confirm: bool,
    pub sample_limit: usize,
    pub format: OutputFormat,
}

impl Cli {
    /// Validate every precondition and build the run settings.
    /// Reads the filesystem only.
    pub fn settings(&self, config: &Config) -> Result<Settings, SweepError> {
        let root = safety::validate_target(&self.path)?;

        let filters = FilterSet::new(self.extensions.as_deref(), self.pattern.as_deref())?;
        let cutoff = AgeCutoff::from_days(self.older_than.unwrap_or(config.older_than_days));
        let keep = self.keep.unwrap_or(config.keep);

        let mut exclusions = ExclusionList::new(
            self.exclude
                .iter()
                .chain(config.exclude_paths.iter())
                .map(|p| safety::expand_home(p)),
        );

        let trash = self
            .trash
            .as_deref()
            .or(config.trash_dir.as_deref())
            .map(|t| safety::resolve(&safety::expand_home(t)));

        let action = match trash {
            Some(trash_root) => {
                // Never re-plan what an earlier run already trashed
                if trash_root.starts_with(&root) {
                    exclusions.push(&trash_root);
                }
                Action::Trash(trash_root)
            }
            None => Action::Delete,
        };

        let format = if self.quiet {
            OutputFormat::Quiet
        } else {
            self.format.unwrap_or(config.output_format)
        };

        Ok(Settings {
            root,
            options: PlanOptions {
                filters,
                cutoff,
                exclusions,
                keep,
            },
            action,
            confirm: self.confirm,
            sample_limit: config.sample_limit,
            format,
        })
    }
}
