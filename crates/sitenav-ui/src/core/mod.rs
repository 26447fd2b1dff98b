//! Core, DOM-free primitives of the navigation engine.
pub mod breadcrumb;
pub mod config;
pub mod error;
pub mod http;
pub mod logic;
pub mod route;
pub mod router;
pub mod session;
pub mod store;
pub mod table;
pub mod templates;
