//! Persistence and environment helpers for the app shell.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;

use crate::core::config::{AppConfig, ConfigError, normalize_api_url};
use crate::core::session::TokenStorage;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};

pub(crate) const LOCALE_KEY: &str = "sitenav.locale";

/// Token persistence in `window.localStorage`, stored as plain strings.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserTokenStorage;

impl TokenStorage for BrowserTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            console::error!("failed to persist", key);
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::raw().remove_item(key).ok();
    }
}

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY)
        && let Some(locale) = LocaleCode::from_lang_tag(&value)
    {
        return locale;
    }
    if let Some(nav) = window().navigator().language()
        && let Some(locale) = LocaleCode::from_lang_tag(&nav)
    {
        return locale;
    }
    DEFAULT_LOCALE
}

/// Build-time configuration, falling back to the serving origin when no API
/// URL was embedded.
pub(crate) fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::from_build_env()?;
    if !AppConfig::api_url_embedded()
        && let Ok(origin) = window().location().origin()
    {
        config.api_url = normalize_api_url(&format!("{origin}/api"))?;
    }
    Ok(config)
}

pub(crate) fn current_fragment() -> String {
    window().location().hash().unwrap_or_default()
}
