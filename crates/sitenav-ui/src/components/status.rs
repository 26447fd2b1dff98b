use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct StatusProps {
    pub busy: bool,
    pub error: Option<String>,
    pub loading_label: String,
}

/// Spinner plus the page-level error region.
#[function_component(StatusRegion)]
pub(crate) fn status_region(props: &StatusProps) -> Html {
    html! {
        <>
            if props.busy {
                <div id="loading-indicator" class="spinner" role="status" aria-live="polite">
                    {props.loading_label.clone()}
                </div>
            }
            if let Some(message) = props.error.clone() {
                <div id="error-message" class="alert error" role="alert">{message}</div>
            }
        </>
    }
}
