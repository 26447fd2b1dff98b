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
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Sitenav hash-routed browser for sites, drives and files.
//! The navigation engine is platform neutral; the Yew shell binds it to the browser on wasm32.

pub mod core;
pub mod engine;
pub mod features;
pub mod i18n;
pub mod services;

pub use engine::{AppEngine, EngineParts};

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

#[cfg(test)]
mod tests {
    use crate::core::route::Route;
    use crate::i18n::{LocaleCode, TranslationBundle};

    #[test]
    fn translation_fallbacks_work() {
        let bundle = TranslationBundle::new(LocaleCode::Da);
        assert_eq!(bundle.text("table.empty", "x"), "Ingen resultater");
        assert_eq!(bundle.text("nav.missing_key", "Default"), "Default");
    }

    #[test]
    fn unknown_fragments_route_to_not_found() {
        assert_eq!(
            Route::parse("#/nowhere"),
            Route::NotFound {
                path: "/nowhere".into()
            }
        );
    }
}
