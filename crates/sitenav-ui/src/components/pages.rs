//! Static content views.

use yew::prelude::*;

use crate::i18n::TranslationBundle;

#[derive(Properties, PartialEq)]
pub(crate) struct StaticPageProps {
    pub section: &'static str,
}

/// Title plus body paragraph read from one translation section.
#[function_component(StaticPage)]
pub(crate) fn static_page(props: &StaticPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_default();
    let title = bundle.text(&format!("{}.title", props.section), "");
    let body = bundle.text(&format!("{}.body", props.section), "");
    html! {
        <section class={classes!("page", props.section)}>
            <h1>{title}</h1>
            <p>{body}</p>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct NotFoundProps {
    pub path: String,
}

#[function_component(NotFoundPage)]
pub(crate) fn not_found_page(props: &NotFoundProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_default();
    html! {
        <section class="page not-found">
            <h1>{bundle.text("not_found.title", "404 - Page not found")}</h1>
            <code>{props.path.clone()}</code>
        </section>
    }
}
