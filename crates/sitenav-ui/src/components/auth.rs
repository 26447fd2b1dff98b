use yew::prelude::*;

use crate::i18n::TranslationBundle;

#[derive(Properties, PartialEq)]
pub(crate) struct LoggedOutProps {
    pub on_login: Callback<()>,
}

#[function_component(LoggedOutPrompt)]
pub(crate) fn logged_out_prompt(props: &LoggedOutProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_default();
    let on_login = props.on_login.clone();
    html! {
        <section class="logged-out">
            <h2>{bundle.text("logged_out.title", "You are not logged in")}</h2>
            <button id="login-prompt-button" class="primary" onclick={Callback::from(move |_| on_login.emit(()))}>
                {bundle.text("logged_out.login", "Log In")}
            </button>
        </section>
    }
}
