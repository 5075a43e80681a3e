pub mod engine;
pub mod staging;

pub use engine::{clean, prepare_trash, Action, CleanReport, Failure};
pub use staging::{delete_file, move_to_trash, trash_destination};
