//! Collaborators shared by every list controller.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::breadcrumb::TabSynchronizer;
use crate::core::error::UiError;
use crate::core::route::NavigationTicket;
use crate::core::store::SharedStore;
use crate::core::table::TableRenderer;
use crate::core::templates::ContentView;
use crate::i18n::TranslationBundle;
use crate::services::api::ApiClient;

/// Handles injected into each controller.
#[derive(Clone)]
pub struct ControllerContext {
    /// Shared store.
    pub store: SharedStore,
    /// REST client.
    pub api: ApiClient,
    /// Breadcrumb owner.
    pub tabs: TabSynchronizer,
    /// Table body renderer.
    pub table: TableRenderer,
    /// Active translations.
    pub bundle: Rc<TranslationBundle>,
}

impl ControllerContext {
    /// Surface a controller failure for the view issued under `ticket`.
    ///
    /// Failures for superseded views are only logged. Auth failures also
    /// switch the content region to the logged-out prompt.
    pub fn fail(&self, ticket: NavigationTicket, view: &'static str, err: &UiError) {
        let message = err.user_message();
        let auth_failure = err.is_auth_failure();
        let applied = self.store.reduce_if_current(ticket, |store| {
            store.page.error = Some(message);
            if auth_failure {
                store.page.view = ContentView::LoggedOut;
                store.table.activate(None);
                store.session.authenticated = false;
            }
        });
        if applied.is_some() {
            warn!(view, ticket = ticket.generation(), error = ?err, "list controller failed");
        } else {
            debug!(view, ticket = ticket.generation(), error = ?err, "ignoring failure of superseded view");
        }
    }

    /// Translated text with an inline default.
    #[must_use]
    pub fn text(&self, key: &str, default: &str) -> String {
        self.bundle.text(key, default)
    }
}

/// Log that a result arrived after its view was abandoned.
pub fn discard_stale(ticket: NavigationTicket, view: &'static str) {
    debug!(view, ticket = ticket.generation(), "discarding stale result");
}
