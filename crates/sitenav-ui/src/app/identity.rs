//! Bridge to the page's identity-provider script.
//!
//! The hosting page exposes `window.sitenavAuth` with three promise-returning
//! functions. A rejection whose `errorCode` or `name` mentions
//! `interaction_required` asks for the interactive flow.

use async_trait::async_trait;
use js_sys::Reflect;
use wasm_bindgen::prelude::*;

use crate::core::session::{IdentityProvider, ProviderError};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = sitenavAuth, js_name = acquireTokenSilent)]
    async fn acquire_token_silent() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = sitenavAuth, js_name = acquireTokenPopup)]
    async fn acquire_token_popup() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = sitenavAuth, js_name = logout)]
    async fn logout_account() -> Result<JsValue, JsValue>;
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserIdentity;

#[async_trait(?Send)]
impl IdentityProvider for BrowserIdentity {
    async fn acquire_token(&self) -> Result<String, ProviderError> {
        token_from(acquire_token_silent().await)
    }

    async fn acquire_token_interactive(&self) -> Result<String, ProviderError> {
        token_from(acquire_token_popup().await)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        logout_account().await.map(|_| ()).map_err(classify)
    }
}

fn token_from(result: Result<JsValue, JsValue>) -> Result<String, ProviderError> {
    let value = result.map_err(classify)?;
    value
        .as_string()
        .or_else(|| property(&value, "accessToken"))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ProviderError::Failed("identity provider returned no token".to_string()))
}

fn classify(error: JsValue) -> ProviderError {
    let code = property(&error, "errorCode").unwrap_or_default();
    let name = property(&error, "name").unwrap_or_default();
    if code.contains("interaction_required") || name.contains("InteractionRequired") {
        return ProviderError::InteractionRequired;
    }
    let message = property(&error, "message")
        .or_else(|| error.as_string())
        .unwrap_or_else(|| "identity provider failure".to_string());
    ProviderError::Failed(message)
}

fn property(value: &JsValue, key: &str) -> Option<String> {
    if !value.is_object() {
        return None;
    }
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|field| field.as_string())
}
