//! Feature slices for the three list views.
pub mod context;
pub mod drives;
pub mod files;
pub mod list;
pub mod sites;
