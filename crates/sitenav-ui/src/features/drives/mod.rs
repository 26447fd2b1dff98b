//! Drives list for one site, with per-drive file counts.
pub mod controller;
pub mod rows;

pub use controller::DrivesController;
