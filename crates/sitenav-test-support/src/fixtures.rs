//! Payload builders and an engine harness wired to the fakes.

use std::rc::Rc;

use sitenav_api_models::{Drive, DriveFile, Site};
use sitenav_ui::core::config::{AppConfig, BuildProfile};
use sitenav_ui::core::router::NavigationHook;
use sitenav_ui::core::session::{MemoryTokenStorage, TOKEN_STORAGE_KEY, TokenStorage};
use sitenav_ui::i18n::LocaleCode;
use sitenav_ui::{AppEngine, EngineParts};

use crate::mocks::{FakeConfirmer, FakeIdentityProvider, MockTransport};

/// Base URL every harness engine talks to.
pub const API_BASE: &str = "http://api.test";

/// Token stored by [`TestApp::signed_in`].
pub const TEST_TOKEN: &str = "test-token";

/// Absolute URL for an API path.
#[must_use]
pub fn api_url(path: &str) -> String {
    format!("{API_BASE}{path}")
}

/// Site payload.
#[must_use]
pub fn site(id: &str, display_name: &str) -> Site {
    Site {
        id: id.to_string(),
        display_name: display_name.to_string(),
        web_url: format!("https://sites.example/{id}"),
    }
}

/// Drive payload belonging to a site.
#[must_use]
pub fn drive(id: &str, name: &str, site_id: &str, site_name: &str) -> Drive {
    Drive {
        id: id.to_string(),
        name: name.to_string(),
        web_url: format!("https://drives.example/{id}"),
        last_modified_date_time: Some("2024-01-02T10:00:00Z".to_string()),
        site_id: Some(site_id.to_string()),
        site_name: Some(site_name.to_string()),
    }
}

/// File payload.
#[must_use]
pub fn file(id: &str, name: &str, size: Option<u64>, modified: Option<&str>) -> DriveFile {
    DriveFile {
        id: id.to_string(),
        name: name.to_string(),
        web_url: format!("https://files.example/{id}"),
        size,
        last_modified_date_time: modified.map(ToString::to_string),
        last_modified_by_display_name: Some("Ada".to_string()),
    }
}

/// Engine plus handles to every fake behind it.
pub struct TestApp {
    /// Engine under test.
    pub engine: AppEngine,
    /// Recording transport.
    pub transport: Rc<MockTransport>,
    /// Token storage.
    pub storage: Rc<MemoryTokenStorage>,
    /// Identity provider.
    pub identity: Rc<FakeIdentityProvider>,
    /// Delete confirmation dialog.
    pub confirmer: Rc<FakeConfirmer>,
}

impl TestApp {
    /// Harness with a stored bearer token.
    #[must_use]
    pub fn signed_in() -> Self {
        Self::build(Some(TEST_TOKEN), FakeIdentityProvider::default(), Vec::new())
    }

    /// Harness without any token.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::build(None, FakeIdentityProvider::default(), Vec::new())
    }

    /// Harness without a token and with a scripted identity provider.
    #[must_use]
    pub fn with_identity(identity: FakeIdentityProvider) -> Self {
        Self::build(None, identity, Vec::new())
    }

    /// Signed-in harness with extra before-hooks.
    #[must_use]
    pub fn with_hooks(hooks: Vec<Box<dyn NavigationHook>>) -> Self {
        Self::build(Some(TEST_TOKEN), FakeIdentityProvider::default(), hooks)
    }

    fn build(
        token: Option<&str>,
        identity: FakeIdentityProvider,
        hooks: Vec<Box<dyn NavigationHook>>,
    ) -> Self {
        let transport = Rc::new(MockTransport::default());
        let storage = Rc::new(MemoryTokenStorage::default());
        if let Some(token) = token {
            storage.set(TOKEN_STORAGE_KEY, token);
        }
        let identity = Rc::new(identity);
        let confirmer = Rc::new(FakeConfirmer::default());
        let config = AppConfig {
            api_url: API_BASE.to_string(),
            test_token: None,
            profile: BuildProfile::Development,
        };
        let engine = AppEngine::with_hooks(
            EngineParts {
                config,
                transport: transport.clone(),
                storage: storage.clone(),
                provider: identity.clone(),
                confirmer: confirmer.clone(),
                locale: LocaleCode::En,
            },
            hooks,
        );
        Self {
            engine,
            transport,
            storage,
            identity,
            confirmer,
        }
    }

    /// Sanitised markup of the active table body.
    #[must_use]
    pub fn table_markup(&self) -> String {
        self.engine.store().read(|state| state.table.markup())
    }

    /// Text of the page error region.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.engine.store().read(|state| state.page.error.clone())
    }
}
