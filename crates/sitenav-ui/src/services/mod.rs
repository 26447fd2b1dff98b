//! Service clients for the REST surface.
pub mod api;

#[cfg(target_arch = "wasm32")]
pub mod transport;
