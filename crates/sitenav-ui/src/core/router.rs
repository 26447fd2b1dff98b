//! Hash router: before-hooks, template swap, controller dispatch.
//!
//! # Design
//! - Every navigation takes a fresh [`NavigationTicket`] first; anything a
//!   previous navigation resolves later is discarded against it.
//! - Before-hooks run synchronously and complete before the template swap so
//!   the provisional breadcrumb is in place when the view appears.
//! - A failing hook is logged and surfaced in the error region; navigation
//!   still completes.
//! - Controllers never return errors here; they report through the store.

use std::rc::Rc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::core::breadcrumb::TabSynchronizer;
use crate::core::error::{UiError, UiResult};
use crate::core::route::{NavigationTicket, Route};
use crate::core::store::SharedStore;
use crate::core::templates::TemplateSet;

/// Function run before a route's view is activated.
pub trait NavigationHook {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Prepare chrome for `route`.
    ///
    /// # Errors
    /// Any error is reported as a non-fatal navigation banner.
    fn before(&self, route: &Route) -> UiResult<()>;
}

/// Highlights the menu entry owning the route.
pub struct MenuHook {
    store: SharedStore,
}

impl MenuHook {
    /// Bind to the store.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl NavigationHook for MenuHook {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn before(&self, route: &Route) -> UiResult<()> {
        let section = route.menu_section();
        self.store.reduce_mut(|store| store.page.menu = section);
        Ok(())
    }
}

/// Writes the provisional breadcrumb from cached names.
pub struct BreadcrumbHook {
    tabs: TabSynchronizer,
}

impl BreadcrumbHook {
    /// Bind to the tab synchronizer.
    #[must_use]
    pub const fn new(tabs: TabSynchronizer) -> Self {
        Self { tabs }
    }
}

impl NavigationHook for BreadcrumbHook {
    fn name(&self) -> &'static str {
        "breadcrumb"
    }

    fn before(&self, route: &Route) -> UiResult<()> {
        self.tabs.provisional(route);
        Ok(())
    }
}

/// Per-resource list orchestration invoked after the template swap.
#[async_trait(?Send)]
pub trait ListController {
    /// Load and render the view issued under `ticket`.
    async fn init(&self, ticket: NavigationTicket, parent_id: Option<&str>);
}

/// Controllers for the three list routes.
#[derive(Clone)]
pub struct ControllerSet {
    /// `/sites`.
    pub sites: Rc<dyn ListController>,
    /// `/drives/:siteId`.
    pub drives: Rc<dyn ListController>,
    /// `/files/:driveId`.
    pub files: Rc<dyn ListController>,
}

/// Maps routes to template activation plus a controller run.
pub struct Router {
    store: SharedStore,
    templates: TemplateSet,
    hooks: Vec<Box<dyn NavigationHook>>,
    controllers: ControllerSet,
}

impl Router {
    /// Build a router without hooks.
    #[must_use]
    pub fn new(store: SharedStore, templates: TemplateSet, controllers: ControllerSet) -> Self {
        Self {
            store,
            templates,
            hooks: Vec::new(),
            controllers,
        }
    }

    /// Append a before-hook; hooks run in registration order.
    #[must_use]
    pub fn with_hook(self, hook: impl NavigationHook + 'static) -> Self {
        self.with_boxed_hook(Box::new(hook))
    }

    /// Append an already boxed before-hook.
    #[must_use]
    pub fn with_boxed_hook(mut self, hook: Box<dyn NavigationHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Navigate to a hash fragment and run the matching controller.
    pub async fn navigate(&self, fragment: &str) -> NavigationTicket {
        let route = Route::parse(fragment);
        let ticket = self.store.begin_navigation(route.clone());
        info!(
            route = route.name(),
            path = %route,
            ticket = ticket.generation(),
            "navigating"
        );
        self.run_hooks(&route);
        self.activate_template(&route);
        match &route {
            Route::Sites => self.controllers.sites.init(ticket, None).await,
            Route::Drives { site_id } => self.controllers.drives.init(ticket, Some(site_id)).await,
            Route::Files { drive_id } => self.controllers.files.init(ticket, Some(drive_id)).await,
            Route::Home | Route::NoNavigo | Route::NotFound { .. } => {}
        }
        ticket
    }

    /// Re-run the active route, e.g. after the session changed.
    pub async fn redispatch(&self) -> NavigationTicket {
        let path = self.store.read(|store| store.route.current.path());
        self.navigate(&path).await
    }

    fn run_hooks(&self, route: &Route) {
        for hook in &self.hooks {
            if let Err(err) = hook.before(route) {
                let err = match err {
                    hook_err @ UiError::NavigationHook { .. } => hook_err,
                    other => UiError::NavigationHook {
                        message: other.to_string(),
                    },
                };
                error!(hook = hook.name(), route = route.name(), error = ?err, "before-hook failed");
                self.store.show_error(err.user_message());
            }
        }
    }

    fn activate_template(&self, route: &Route) {
        let view = self.templates.view_for(route);
        self.store.reduce_mut(|store| {
            store.table.activate(view.table_columns());
            store.page.view = view;
            store.sites.reset();
            store.drives.reset();
            store.files.reset();
        });
    }
}
