//! Bearer-token session backed by pluggable persistent storage.
//!
//! # Design
//! - The token lives in one storage slot; every authenticated request reads it
//!   fresh so logout is visible to the very next request.
//! - Identity-provider and storage access sit behind traits so the wasm shell
//!   plugs in `localStorage` and the JS bridge while tests use fakes.
//! - A development token (see [`crate::core::config::AppConfig`]) shadows the
//!   stored token without ever being persisted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::error::{UiError, UiResult};

/// Storage key for the persisted bearer token.
pub const TOKEN_STORAGE_KEY: &str = "accessToken";

/// Persistent key-value storage for the session token.
pub trait TokenStorage {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&self, key: &str, value: &str);
    /// Remove a value; removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// In-memory [`TokenStorage`] used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    values: RefCell<HashMap<String, String>>,
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Failure reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The silent flow cannot complete without user interaction.
    InteractionRequired,
    /// Any other provider failure.
    Failed(String),
}

impl From<ProviderError> for UiError {
    fn from(value: ProviderError) -> Self {
        match value {
            ProviderError::InteractionRequired => Self::InteractionRequired,
            ProviderError::Failed(message) => Self::Provider { message },
        }
    }
}

/// Opaque identity provider yielding bearer tokens.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Acquire a token without user interaction.
    async fn acquire_token(&self) -> Result<String, ProviderError>;
    /// Acquire a token through the interactive flow.
    async fn acquire_token_interactive(&self) -> Result<String, ProviderError>;
    /// Sign the current account out.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}

/// Process-wide session holding the current bearer token.
pub struct SessionStore {
    storage: Rc<dyn TokenStorage>,
    provider: Rc<dyn IdentityProvider>,
    test_token: Option<String>,
}

impl SessionStore {
    /// Build a session over the given storage and provider.
    #[must_use]
    pub fn new(
        storage: Rc<dyn TokenStorage>,
        provider: Rc<dyn IdentityProvider>,
        test_token: Option<String>,
    ) -> Self {
        Self {
            storage,
            provider,
            test_token,
        }
    }

    /// Current bearer token; the development override wins over storage.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.test_token
            .clone()
            .or_else(|| self.storage.get(TOKEN_STORAGE_KEY))
            .filter(|token| !token.trim().is_empty())
    }

    /// Whether a token is currently available.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Acquire and persist a token, retrying interactively once when required.
    ///
    /// # Errors
    /// Propagates the provider failure when both attempts fail, or
    /// immediately for failures other than interaction-required.
    pub async fn login(&self) -> UiResult<String> {
        let token = match self.provider.acquire_token().await {
            Ok(token) => token,
            Err(ProviderError::InteractionRequired) => {
                info!("identity provider requested interaction; retrying interactively");
                self.provider.acquire_token_interactive().await?
            }
            Err(other) => return Err(other.into()),
        };
        self.storage.set(TOKEN_STORAGE_KEY, &token);
        info!("session token stored");
        Ok(token)
    }

    /// Sign out and clear the persisted token, even when sign-out fails.
    pub async fn logout(&self) {
        if let Err(err) = self.provider.sign_out().await {
            warn!(error = ?err, "identity provider sign-out failed");
        }
        self.storage.remove(TOKEN_STORAGE_KEY);
        info!("session token cleared");
    }
}
