//! List view: heading, search box and the rendered table.
//!
//! Row and header markup arrives as one sanitised string; clicks bubble to a
//! single listener that reads `data-action`/`data-id` from the closest marked
//! element.

use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

use crate::features::list::TableAction;
use crate::i18n::TranslationBundle;

#[derive(Properties, PartialEq)]
pub(crate) struct ListViewProps {
    pub title: String,
    pub table_html: AttrValue,
    pub search: String,
    pub on_search: Callback<String>,
    pub on_action: Callback<TableAction>,
}

#[function_component(ListView)]
pub(crate) fn list_view(props: &ListViewProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_default();
    let oninput = {
        let on_search = props.on_search.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_search.emit(input.value());
        })
    };
    let onclick = {
        let on_action = props.on_action.clone();
        Callback::from(move |event: MouseEvent| {
            if let Some(action) = delegated_action(&event) {
                event.prevent_default();
                on_action.emit(action);
            }
        })
    };

    html! {
        <section class="list-view">
            <header class="list-header">
                <h1>{props.title.clone()}</h1>
                <input
                    id="search-input"
                    type="search"
                    placeholder={bundle.text("table.search", "Search…")}
                    value={props.search.clone()}
                    {oninput}
                />
            </header>
            <div class="table-container" {onclick}>
                {Html::from_html_unchecked(props.table_html.clone())}
            </div>
        </section>
    }
}

fn delegated_action(event: &MouseEvent) -> Option<TableAction> {
    let target = event.target_dyn_into::<Element>()?;
    let marked = target.closest("[data-action]").ok()??;
    let action = marked.get_attribute("data-action")?;
    let id = marked.get_attribute("data-id")?;
    TableAction::parse(&action, &id)
}
