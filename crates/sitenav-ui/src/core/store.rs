//! App-wide store slices and the shared handle the engine mutates.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Use small, focused slices so reducers stay predictable.
//! - The engine owns a [`SharedStore`]; the wasm shell mirrors every snapshot
//!   into the yewdux [`AppStore`] so components re-render from one source.
//! - Post-await writes go through [`SharedStore::reduce_if_current`] so a
//!   superseded navigation cannot touch the new view.

use std::cell::RefCell;
use std::rc::Rc;

use sitenav_api_models::{Drive, DriveFile, Site};
#[cfg(target_arch = "wasm32")]
use yewdux::store::Store;

use crate::core::breadcrumb::{BreadcrumbState, NameCache};
use crate::core::route::{MenuSection, NavigationTicket, Route};
use crate::core::table::TableState;
use crate::core::templates::ContentView;
use crate::features::list::ListSlice;

/// Most notices kept on screen at once.
pub const MAX_NOTICES: usize = 4;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(target_arch = "wasm32", derive(Store))]
pub struct AppStore {
    /// Session presence as last observed.
    pub session: SessionSlice,
    /// Active route and its staleness tag.
    pub route: RouteSlice,
    /// Breadcrumb tabs.
    pub breadcrumb: BreadcrumbState,
    /// Names learned from responses, keyed by id.
    pub names: NameCache,
    /// Content region, error region, busy indicator and notices.
    pub page: PageSlice,
    /// Active table body.
    pub table: TableState,
    /// Sites list state.
    pub sites: ListSlice<Site>,
    /// Drives list state.
    pub drives: ListSlice<Drive>,
    /// Files list state.
    pub files: ListSlice<DriveFile>,
}

/// Session presence flag used by the shell's login/logout controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSlice {
    /// Whether a bearer token is available.
    pub authenticated: bool,
}

/// Route currently owned by the router.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteSlice {
    /// Active route.
    pub current: Route,
    /// Ticket of the active navigation.
    pub ticket: NavigationTicket,
}

/// Severity of a transient notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational notice.
    Info,
    /// Success notice.
    Success,
    /// Error notice.
    Error,
}

/// Transient notice payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Monotonic notice identifier.
    pub id: u64,
    /// Display message.
    pub message: String,
    /// Severity classification.
    pub kind: NoticeKind,
}

/// Page-level chrome state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSlice {
    /// What the content region shows.
    pub view: ContentView,
    /// Page-level error region text; `None` hides the region.
    pub error: Option<String>,
    /// Outstanding busy scopes; the spinner shows while non-zero.
    pub busy: u32,
    /// Highlighted menu entry.
    pub menu: Option<MenuSection>,
    /// Transient notices, oldest first.
    pub notices: Vec<Notice>,
    next_notice_id: u64,
}

impl PageSlice {
    /// Whether the busy indicator is shown.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy > 0
    }

    /// Append a notice, keeping at most [`MAX_NOTICES`].
    pub fn push_notice(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.notices.push(Notice {
            id,
            message: message.into(),
            kind,
        });
        if self.notices.len() > MAX_NOTICES {
            let drain = self.notices.len() - MAX_NOTICES;
            self.notices.drain(0..drain);
        }
        id
    }

    /// Drop a notice by id.
    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }
}

type Listener = Rc<dyn Fn(&AppStore)>;

/// Shared, single-threaded handle over the [`AppStore`].
#[derive(Clone, Default)]
pub struct SharedStore {
    state: Rc<RefCell<AppStore>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl SharedStore {
    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppStore {
        self.state.borrow().clone()
    }

    /// Read from the current state without cloning.
    pub fn read<R>(&self, f: impl FnOnce(&AppStore) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Mutate the state and notify listeners once the borrow is released.
    pub fn reduce_mut<R>(&self, f: impl FnOnce(&mut AppStore) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.notify();
        result
    }

    /// Mutate only while `ticket` is still the active navigation.
    pub fn reduce_if_current<R>(
        &self,
        ticket: NavigationTicket,
        f: impl FnOnce(&mut AppStore) -> R,
    ) -> Option<R> {
        if self.is_current(ticket) {
            Some(self.reduce_mut(f))
        } else {
            None
        }
    }

    /// Register a change listener.
    pub fn subscribe(&self, listener: impl Fn(&AppStore) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Start a navigation to `route`, superseding any in flight.
    pub fn begin_navigation(&self, route: Route) -> NavigationTicket {
        self.reduce_mut(|store| {
            let ticket = store.route.ticket.next();
            store.route = RouteSlice {
                current: route,
                ticket,
            };
            store.page.error = None;
            ticket
        })
    }

    /// Whether `ticket` belongs to the active navigation.
    #[must_use]
    pub fn is_current(&self, ticket: NavigationTicket) -> bool {
        self.state.borrow().route.ticket == ticket
    }

    /// Ticket of the active navigation.
    #[must_use]
    pub fn current_ticket(&self) -> NavigationTicket {
        self.state.borrow().route.ticket
    }

    /// Write the page-level error region.
    pub fn show_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.reduce_mut(|store| store.page.error = Some(message));
    }

    /// Enter a busy scope; the indicator hides when every guard is dropped.
    #[must_use]
    pub fn busy(&self) -> BusyGuard {
        self.reduce_mut(|store| store.page.busy += 1);
        BusyGuard {
            store: self.clone(),
        }
    }

    fn notify(&self) {
        let listeners = self.listeners.borrow().clone();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Scoped busy indicator; decrements on every exit path.
pub struct BusyGuard {
    store: SharedStore,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.store
            .reduce_mut(|store| store.page.busy = store.page.busy.saturating_sub(1));
    }
}
