//! Sites list: search and on-demand per-site file totals.
pub mod controller;
pub mod rows;

pub use controller::SitesController;
