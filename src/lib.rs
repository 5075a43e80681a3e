//! # dirsweep
//!
//! Walks a directory tree and deletes, or moves to a trash directory, the
//! files matching age, extension, and name filters.
//!
//! - **Dry-run by default**: nothing on disk changes without `--confirm`
//! - **Safety guard**: refuses filesystem roots, drive roots, the home
//!   directory, and paths too close to a root
//! - **Retention**: keep the N newest matching files in every directory
//! - **Trash mode**: mirror the scanned tree under a trash root instead of
//!   deleting

pub mod cli;
pub mod cleaner;
pub mod common;
pub mod scanner;
