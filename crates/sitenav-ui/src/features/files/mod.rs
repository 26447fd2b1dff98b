//! Files list for one drive: search, toggling sorts and confirmed deletes.
pub mod controller;
pub mod rows;

pub use controller::{Confirmer, DeleteOutcome, FilesController};
