//! Yew shell binding the navigation engine to the browser.
//!
//! # Design
//! - The engine owns all state; the shell mirrors every store change into
//!   yewdux and renders from that snapshot.
//! - `hashchange` drives navigation; links are plain `#/...` anchors.
//! - Engine futures run on `spawn_local`; their failures already surface
//!   through the error region, so results are not inspected here.

mod dialogs;
mod identity;
mod preferences;

use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::utils::window;
use sitenav_telemetry::{LoggingConfig, init_logging};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_store};

use crate::components::auth::LoggedOutPrompt;
use crate::components::breadcrumbs::BreadcrumbTabs;
use crate::components::pages::{NotFoundPage, StaticPage};
use crate::components::shell::AppShell;
use crate::components::status::StatusRegion;
use crate::components::table::ListView;
use crate::components::toast::NoticeHost;
use crate::core::config::AppConfig;
use crate::core::store::AppStore;
use crate::core::templates::{ContentView, ViewKind, table_markup};
use crate::engine::{AppEngine, EngineParts};
use crate::features::list::{SortState, TableAction};
use crate::i18n::TranslationBundle;
use crate::services::transport::GlooTransport;
use dialogs::BrowserConfirmer;
use identity::BrowserIdentity;
use preferences::{BrowserTokenStorage, current_fragment, load_config, load_locale};

fn build_engine() -> AppEngine {
    let config = load_config().unwrap_or_else(|err| {
        console::error!(format!("invalid build configuration: {err}"));
        AppConfig::default()
    });
    let engine = AppEngine::new(EngineParts {
        config,
        transport: Rc::new(GlooTransport),
        storage: Rc::new(BrowserTokenStorage),
        provider: Rc::new(BrowserIdentity),
        confirmer: Rc::new(BrowserConfirmer),
        locale: load_locale(),
    });
    let dispatch = Dispatch::<AppStore>::new();
    dispatch.set(engine.store().snapshot());
    engine
        .store()
        .subscribe(move |state| dispatch.set(state.clone()));
    engine
}

fn navigate_to_current(engine: Rc<AppEngine>) {
    spawn_local(async move {
        engine.navigate(&current_fragment()).await;
    });
}

#[function_component(SitenavApp)]
pub(crate) fn sitenav_app() -> Html {
    let engine = use_memo(|()| build_engine(), ());
    let (state, _) = use_store::<AppStore>();
    let bundle = (*engine.bundle()).clone();

    {
        let engine = engine.clone();
        use_effect_with_deps(
            move |()| {
                let listener = {
                    let engine = engine.clone();
                    EventListener::new(&window(), "hashchange", move |_| {
                        navigate_to_current(engine.clone());
                    })
                };
                navigate_to_current(engine);
                move || drop(listener)
            },
            (),
        );
    }

    let on_login = {
        let engine = engine.clone();
        Callback::from(move |()| {
            let engine = engine.clone();
            spawn_local(async move {
                engine.login().await.ok();
            });
        })
    };
    let on_logout = {
        let engine = engine.clone();
        Callback::from(move |()| {
            let engine = engine.clone();
            spawn_local(async move { engine.logout().await });
        })
    };
    let on_search = {
        let engine = engine.clone();
        Callback::from(move |term: String| engine.search(&term))
    };
    let on_action = {
        let engine = engine.clone();
        Callback::from(move |action: TableAction| {
            let engine = engine.clone();
            spawn_local(async move { engine.handle_action(action).await });
        })
    };
    let on_dismiss = {
        let engine = engine.clone();
        Callback::from(move |id: u64| engine.dismiss_notice(id))
    };

    let content = match &state.page.view {
        ContentView::Blank => html! {},
        ContentView::Home => html! { <StaticPage section="home" /> },
        ContentView::NoNavigo => html! { <StaticPage section="no_navigo" /> },
        ContentView::NotFound { path } => html! { <NotFoundPage path={path.clone()} /> },
        ContentView::LoggedOut => html! { <LoggedOutPrompt on_login={on_login.clone()} /> },
        ContentView::List(template) => {
            let (search, sort) = list_controls(&state, template.kind);
            let body = state.table.markup();
            html! {
                <ListView
                    title={bundle.text(template.title_key, template.title_key)}
                    table_html={AttrValue::from(table_markup(template, &bundle, &sort, &body))}
                    {search}
                    {on_search}
                    {on_action}
                />
            }
        }
    };
    let loading_label = bundle.text("table.loading", "Loading…");

    html! {
        <ContextProvider<TranslationBundle> context={bundle}>
            <AppShell
                menu={state.page.menu}
                authenticated={state.session.authenticated}
                on_login={on_login}
                on_logout={on_logout}
            >
                <BreadcrumbTabs state={state.breadcrumb.clone()} />
                <StatusRegion busy={state.page.is_busy()} error={state.page.error.clone()} {loading_label} />
                {content}
            </AppShell>
            <NoticeHost notices={state.page.notices.clone()} {on_dismiss} />
        </ContextProvider<TranslationBundle>>
    }
}

fn list_controls(state: &AppStore, kind: ViewKind) -> (String, SortState) {
    match kind {
        ViewKind::Sites => (state.sites.search.clone(), SortState::default()),
        ViewKind::Drives => (state.drives.search.clone(), SortState::default()),
        ViewKind::Files => (state.files.search.clone(), state.files.sort.clone()),
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(&LoggingConfig::default()) {
        console::error!(format!("logging unavailable: {err}"));
    }
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<SitenavApp>::with_root(root).render();
    } else {
        yew::Renderer::<SitenavApp>::new().render();
    }
}
