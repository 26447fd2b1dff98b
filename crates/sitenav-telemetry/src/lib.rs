#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Logging setup shared by the `SiteNav` front-end and its test harnesses.
//!
//! Layout: `init.rs` (subscriber installation + format selection),
//! `error.rs` (install failures), `console.rs` (browser console writer, wasm only).

#[cfg(target_arch = "wasm32")]
mod console;
pub mod error;
pub mod init;

pub use error::{TelemetryError, TelemetryResult};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
