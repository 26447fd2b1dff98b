//! Composition root wiring store, session, API, router and controllers.
//!
//! # Design
//! - Everything platform-specific comes in through [`EngineParts`]; the wasm
//!   shell passes browser implementations, tests pass fakes.
//! - User intents (search, sort, delete, count, login) are routed to the
//!   controller owning the active view.

use std::rc::Rc;

use tracing::{info, warn};

use crate::core::breadcrumb::TabSynchronizer;
use crate::core::config::AppConfig;
use crate::core::error::UiResult;
use crate::core::http::Transport;
use crate::core::route::NavigationTicket;
use crate::core::router::{BreadcrumbHook, ControllerSet, MenuHook, NavigationHook, Router};
use crate::core::session::{IdentityProvider, SessionStore, TokenStorage};
use crate::core::store::SharedStore;
use crate::core::table::TableRenderer;
use crate::core::templates::{ContentView, TemplateSet, ViewKind};
use crate::features::context::ControllerContext;
use crate::features::drives::DrivesController;
use crate::features::files::{Confirmer, DeleteOutcome, FilesController};
use crate::features::list::{SortColumn, TableAction};
use crate::features::sites::SitesController;
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::services::api::ApiClient;

/// Platform collaborators needed to build an engine.
pub struct EngineParts {
    /// Resolved configuration.
    pub config: AppConfig,
    /// Network boundary.
    pub transport: Rc<dyn Transport>,
    /// Token persistence.
    pub storage: Rc<dyn TokenStorage>,
    /// Identity provider.
    pub provider: Rc<dyn IdentityProvider>,
    /// Delete confirmation prompt.
    pub confirmer: Rc<dyn Confirmer>,
    /// UI locale.
    pub locale: LocaleCode,
}

/// The navigation engine.
pub struct AppEngine {
    store: SharedStore,
    session: Rc<SessionStore>,
    router: Router,
    sites: Rc<SitesController>,
    drives: Rc<DrivesController>,
    files: Rc<FilesController>,
    bundle: Rc<TranslationBundle>,
}

impl AppEngine {
    /// Build an engine with the standard before-hooks.
    #[must_use]
    pub fn new(parts: EngineParts) -> Self {
        Self::with_hooks(parts, Vec::new())
    }

    /// Build an engine with extra before-hooks appended after the standard ones.
    #[must_use]
    pub fn with_hooks(parts: EngineParts, extra_hooks: Vec<Box<dyn NavigationHook>>) -> Self {
        let store = SharedStore::default();
        let bundle = Rc::new(TranslationBundle::new(parts.locale));
        let session = Rc::new(SessionStore::new(
            parts.storage,
            parts.provider,
            parts.config.test_token.clone(),
        ));
        let api = ApiClient::new(parts.config.api_url.clone(), parts.transport, session.clone());
        let tabs = TabSynchronizer::new(store.clone());
        let ctx = ControllerContext {
            store: store.clone(),
            api,
            tabs: tabs.clone(),
            table: TableRenderer::new(store.clone(), bundle.text("table.empty", "No results found")),
            bundle: bundle.clone(),
        };
        let sites = Rc::new(SitesController::new(ctx.clone()));
        let drives = Rc::new(DrivesController::new(ctx.clone()));
        let files = Rc::new(FilesController::new(ctx, parts.confirmer));
        let controllers = ControllerSet {
            sites: sites.clone(),
            drives: drives.clone(),
            files: files.clone(),
        };
        let mut router = Router::new(store.clone(), TemplateSet::standard(), controllers)
            .with_hook(MenuHook::new(store.clone()))
            .with_hook(BreadcrumbHook::new(tabs));
        for hook in extra_hooks {
            router = router.with_boxed_hook(hook);
        }
        let authenticated = session.is_authenticated();
        store.reduce_mut(|state| state.session.authenticated = authenticated);
        info!(api_url = %parts.config.api_url, locale = parts.locale.code(), "engine ready");
        Self {
            store,
            session,
            router,
            sites,
            drives,
            files,
            bundle,
        }
    }

    /// Shared store handle.
    #[must_use]
    pub const fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Active translations.
    #[must_use]
    pub fn bundle(&self) -> Rc<TranslationBundle> {
        self.bundle.clone()
    }

    /// Navigate to a hash fragment.
    pub async fn navigate(&self, fragment: &str) -> NavigationTicket {
        self.router.navigate(fragment).await
    }

    /// Sign in, then re-run the active route.
    ///
    /// # Errors
    /// Propagates the identity-provider failure after writing the error region.
    pub async fn login(&self) -> UiResult<()> {
        if let Err(err) = self.session.login().await {
            warn!(error = ?err, "login failed");
            self.store
                .show_error(self.bundle.text("logged_out.failed", "Failed to log in. Please try again."));
            return Err(err);
        }
        self.refresh_session();
        self.router.redispatch().await;
        Ok(())
    }

    /// Sign out, then re-run the active route.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.refresh_session();
        self.router.redispatch().await;
    }

    fn refresh_session(&self) {
        let authenticated = self.session.is_authenticated();
        self.store
            .reduce_mut(|state| state.session.authenticated = authenticated);
    }

    fn active_list(&self) -> Option<ViewKind> {
        self.store.read(|state| match &state.page.view {
            ContentView::List(template) => Some(template.kind),
            _ => None,
        })
    }

    /// Apply a search term to the active list view.
    pub fn search(&self, term: &str) {
        let result = match self.active_list() {
            Some(ViewKind::Sites) => self.sites.search(term),
            Some(ViewKind::Drives) => self.drives.search(term),
            Some(ViewKind::Files) => self.files.search(term),
            None => Ok(()),
        };
        self.report(result);
    }

    /// Toggle a files-table sort.
    pub fn sort(&self, column: SortColumn) {
        if self.active_list() == Some(ViewKind::Files) {
            self.report(self.files.sort_by(column).map(|_| ()));
        }
    }

    /// Delete a file in the active files view.
    pub async fn delete_file(&self, file_id: &str) -> DeleteOutcome {
        self.files.delete_file(file_id).await
    }

    /// Compute a site's file total in the sites view.
    pub async fn count_site_files(&self, site_id: &str) {
        self.sites.count_site_files(site_id).await;
    }

    /// Run a delegated table click.
    pub async fn handle_action(&self, action: TableAction) {
        match action {
            TableAction::Delete(file_id) => {
                self.delete_file(&file_id).await;
            }
            TableAction::CountFiles(site_id) => self.count_site_files(&site_id).await,
            TableAction::Sort(column) => self.sort(column),
        }
    }

    /// Drop a notice.
    pub fn dismiss_notice(&self, id: u64) {
        self.store.reduce_mut(|state| state.page.dismiss_notice(id));
    }

    fn report(&self, result: UiResult<()>) {
        if let Err(err) = result {
            warn!(error = ?err, "view action failed");
            self.store.show_error(err.user_message());
        }
    }
}
