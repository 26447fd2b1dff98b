use yew::prelude::*;

use crate::core::breadcrumb::{BreadcrumbState, SITES_HREF, Tab, TabId};
use crate::i18n::TranslationBundle;

#[derive(Properties, PartialEq)]
pub(crate) struct BreadcrumbProps {
    pub state: BreadcrumbState,
}

#[function_component(BreadcrumbTabs)]
pub(crate) fn breadcrumb_tabs(props: &BreadcrumbProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_default();
    if !props.state.site.visible && !props.state.drive.visible {
        return html! {};
    }
    html! {
        <nav class="breadcrumbs" aria-label="breadcrumb">
            <a class="tab" href={SITES_HREF}>{bundle.text("nav.sites", "Sites")}</a>
            {render_tab(TabId::Site, props.state.tab(TabId::Site), &bundle.text("tabs.site_loading", "Loading site…"))}
            {render_tab(TabId::Drive, props.state.tab(TabId::Drive), &bundle.text("tabs.drive_loading", "Loading drive…"))}
        </nav>
    }
}

fn render_tab(id: TabId, tab: &Tab, loading: &str) -> Html {
    if !tab.visible {
        return html! {};
    }
    let (label, class) = tab.label.as_ref().map_or_else(
        || (loading.to_string(), classes!("tab", "loading")),
        |label| (label.clone(), classes!("tab")),
    );
    html! {
        <a id={id.element_id()} class={class} href={tab.href.clone()}>{label}</a>
    }
}
