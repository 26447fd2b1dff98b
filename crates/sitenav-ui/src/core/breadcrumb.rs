//! Breadcrumb tabs for the current site and drive.
//!
//! # Design
//! - Two tabs at most: the site tab shows on drives and files views, the
//!   drive tab only on files views.
//! - Each navigation writes the tabs twice: a provisional pass from the
//!   before-hook (cached names only, keyed by the exact id in the URL) and an
//!   authoritative pass once the owning controller has fetched the parent.
//! - Authoritative writes carry the [`NavigationTicket`] they were issued
//!   under; a superseded ticket is discarded so an abandoned route can never
//!   label the new one.

use std::collections::HashMap;

use tracing::debug;

use crate::core::route::{NavigationTicket, Route};
use crate::core::store::SharedStore;

/// Fallback link for a site tab whose site id is not known yet.
pub const SITES_HREF: &str = "#/sites";

/// Breadcrumb tab identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TabId {
    /// Current site tab.
    Site,
    /// Current drive tab.
    Drive,
}

impl TabId {
    /// DOM id used by the shell.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Site => "current-site-tab",
            Self::Drive => "current-drive-tab",
        }
    }
}

/// State of one breadcrumb tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tab {
    /// Whether the tab is shown.
    pub visible: bool,
    /// Resolved display name; `None` while still loading.
    pub label: Option<String>,
    /// Link target.
    pub href: String,
}

/// Both breadcrumb tabs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreadcrumbState {
    /// Current site tab.
    pub site: Tab,
    /// Current drive tab.
    pub drive: Tab,
}

impl BreadcrumbState {
    /// Read one tab.
    #[must_use]
    pub const fn tab(&self, id: TabId) -> &Tab {
        match id {
            TabId::Site => &self.site,
            TabId::Drive => &self.drive,
        }
    }

    fn tab_mut(&mut self, id: TabId) -> &mut Tab {
        match id {
            TabId::Site => &mut self.site,
            TabId::Drive => &mut self.drive,
        }
    }

    /// Show a tab with the given label and link.
    pub fn update_tab(&mut self, id: TabId, label: Option<String>, href: String) {
        *self.tab_mut(id) = Tab {
            visible: true,
            label,
            href,
        };
    }

    /// Hide every tab that is not relevant to `route`.
    pub fn reset_for(&mut self, route: &Route) {
        let (site_visible, drive_visible) = tab_visibility(route);
        if !site_visible {
            self.site = Tab::default();
        }
        if !drive_visible {
            self.drive = Tab::default();
        }
    }
}

/// Which tabs a route may show, as `(site, drive)`.
#[must_use]
pub const fn tab_visibility(route: &Route) -> (bool, bool) {
    match route {
        Route::Drives { .. } => (true, false),
        Route::Files { .. } => (true, true),
        _ => (false, false),
    }
}

/// Link target for a site's drive listing.
#[must_use]
pub fn site_href(site_id: &str) -> String {
    Route::Drives {
        site_id: site_id.to_string(),
    }
    .href()
}

/// Link target for a drive's file listing.
#[must_use]
pub fn drive_href(drive_id: &str) -> String {
    Route::Files {
        drive_id: drive_id.to_string(),
    }
    .href()
}

/// Cached facts about a drive learned from earlier responses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriveName {
    /// Drive display name.
    pub name: String,
    /// Owning site id, when reported.
    pub site_id: Option<String>,
    /// Owning site name, when reported.
    pub site_name: Option<String>,
}

/// Display names learned from list and lookup responses, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameCache {
    sites: HashMap<String, String>,
    drives: HashMap<String, DriveName>,
}

impl NameCache {
    /// Record a site name.
    pub fn remember_site(&mut self, id: &str, name: &str) {
        self.sites.insert(id.to_string(), name.to_string());
    }

    /// Record drive facts; a known site name is cached for the site too.
    pub fn remember_drive(&mut self, id: &str, drive: DriveName) {
        if let (Some(site_id), Some(site_name)) = (&drive.site_id, &drive.site_name) {
            self.sites.insert(site_id.clone(), site_name.clone());
        }
        self.drives.insert(id.to_string(), drive);
    }

    /// Cached site name.
    #[must_use]
    pub fn site_name(&self, id: &str) -> Option<&str> {
        self.sites.get(id).map(String::as_str)
    }

    /// Cached drive facts.
    #[must_use]
    pub fn drive(&self, id: &str) -> Option<&DriveName> {
        self.drives.get(id)
    }
}

/// Compute the provisional breadcrumb for `route` from cached names only.
pub fn apply_provisional(state: &mut BreadcrumbState, names: &NameCache, route: &Route) {
    state.reset_for(route);
    match route {
        Route::Drives { site_id } => {
            state.update_tab(
                TabId::Site,
                names.site_name(site_id).map(ToString::to_string),
                site_href(site_id),
            );
        }
        Route::Files { drive_id } => {
            let cached = names.drive(drive_id);
            state.update_tab(
                TabId::Drive,
                cached.map(|drive| drive.name.clone()),
                drive_href(drive_id),
            );
            let site_id = cached.and_then(|drive| drive.site_id.as_deref());
            let site_label = site_id
                .and_then(|id| names.site_name(id))
                .or_else(|| cached.and_then(|drive| drive.site_name.as_deref()))
                .map(ToString::to_string);
            let href = site_id.map_or_else(|| SITES_HREF.to_string(), site_href);
            state.update_tab(TabId::Site, site_label, href);
        }
        _ => {}
    }
}

/// Owner of the breadcrumb slice; all tab mutation goes through here.
#[derive(Clone)]
pub struct TabSynchronizer {
    store: SharedStore,
}

impl TabSynchronizer {
    /// Bind to the shared store.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Show a tab with a label and link target.
    pub fn update_tab(&self, id: TabId, label: Option<String>, href: String) {
        self.store
            .reduce_mut(|store| store.breadcrumb.update_tab(id, label, href));
    }

    /// Hide tabs not relevant to `route`.
    pub fn reset_tabs(&self, route: &Route) {
        self.store
            .reduce_mut(|store| store.breadcrumb.reset_for(route));
    }

    /// Best-effort breadcrumb written before any network call.
    pub fn provisional(&self, route: &Route) {
        self.store.reduce_mut(|store| {
            let names = store.names.clone();
            apply_provisional(&mut store.breadcrumb, &names, route);
        });
    }

    /// Authoritative write; dropped when `ticket` has been superseded.
    ///
    /// Returns whether the write was applied.
    pub fn resolve(&self, ticket: NavigationTicket, id: TabId, label: String, href: String) -> bool {
        let applied = self
            .store
            .reduce_if_current(ticket, |store| {
                store.breadcrumb.update_tab(id, Some(label), href);
            })
            .is_some();
        if !applied {
            debug!(
                ticket = ticket.generation(),
                tab = id.element_id(),
                "discarding stale breadcrumb resolution"
            );
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drives(id: &str) -> Route {
        Route::Drives {
            site_id: id.to_string(),
        }
    }

    fn files(id: &str) -> Route {
        Route::Files {
            drive_id: id.to_string(),
        }
    }

    #[test]
    fn visibility_follows_route() {
        let mut state = BreadcrumbState::default();
        state.update_tab(TabId::Site, Some("Legal".into()), site_href("S1"));
        state.update_tab(TabId::Drive, Some("Contracts".into()), drive_href("D1"));

        state.reset_for(&files("D1"));
        assert!(state.site.visible && state.drive.visible);

        state.reset_for(&drives("S1"));
        assert!(state.site.visible);
        assert!(!state.drive.visible);
        assert!(state.drive.label.is_none());

        state.reset_for(&Route::Sites);
        assert_eq!(state, BreadcrumbState::default());
    }

    #[test]
    fn provisional_uses_cache_only_for_matching_ids() {
        let mut names = NameCache::default();
        names.remember_site("S1", "Legal");
        let mut state = BreadcrumbState::default();

        apply_provisional(&mut state, &names, &drives("S1"));
        assert_eq!(state.site.label.as_deref(), Some("Legal"));
        assert_eq!(state.site.href, "#/drives/S1");

        apply_provisional(&mut state, &names, &drives("S2"));
        assert!(state.site.visible);
        assert!(state.site.label.is_none());
        assert_eq!(state.site.href, "#/drives/S2");
    }

    #[test]
    fn provisional_files_falls_back_to_sites_link() {
        let names = NameCache::default();
        let mut state = BreadcrumbState::default();
        apply_provisional(&mut state, &names, &files("D9"));
        assert_eq!(state.drive.href, "#/files/D9");
        assert!(state.drive.label.is_none());
        assert_eq!(state.site.href, SITES_HREF);
    }

    #[test]
    fn cached_drive_supplies_site_tab() {
        let mut names = NameCache::default();
        names.remember_drive(
            "D1",
            DriveName {
                name: "Contracts".into(),
                site_id: Some("S1".into()),
                site_name: Some("Legal".into()),
            },
        );
        let mut state = BreadcrumbState::default();
        apply_provisional(&mut state, &names, &files("D1"));
        assert_eq!(state.drive.label.as_deref(), Some("Contracts"));
        assert_eq!(state.site.label.as_deref(), Some("Legal"));
        assert_eq!(state.site.href, "#/drives/S1");
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let store = SharedStore::default();
        let sync = TabSynchronizer::new(store.clone());
        let first = store.begin_navigation(drives("S1"));
        let _second = store.begin_navigation(drives("S2"));
        assert!(!sync.resolve(first, TabId::Site, "Legal".into(), site_href("S1")));
        assert!(store.read(|s| s.breadcrumb.site.label.is_none()));
    }
}
