use yew::prelude::*;

use crate::core::route::MenuSection;
use crate::i18n::TranslationBundle;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
    pub menu: Option<MenuSection>,
    pub authenticated: bool,
    pub on_login: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_default();
    let session_button = if props.authenticated {
        let on_logout = props.on_logout.clone();
        html! {
            <button id="logout-button" class="ghost" onclick={Callback::from(move |_| on_logout.emit(()))}>
                {bundle.text("nav.logout", "Log out")}
            </button>
        }
    } else {
        let on_login = props.on_login.clone();
        html! {
            <button id="login-button" class="primary" onclick={Callback::from(move |_| on_login.emit(()))}>
                {bundle.text("nav.login", "Log in")}
            </button>
        }
    };

    html! {
        <div class="app-shell">
            <header class="topbar">
                <strong class="brand">{"Sitenav"}</strong>
                <nav class="menu">
                    {for MenuSection::all().into_iter().map(|section| menu_item(section, props.menu, &bundle))}
                </nav>
                <div class="session">{session_button}</div>
            </header>
            <main class="content">
                {for props.children.iter()}
            </main>
        </div>
    }
}

fn menu_item(section: MenuSection, active: Option<MenuSection>, bundle: &TranslationBundle) -> Html {
    let class = classes!("menu-item", (active == Some(section)).then_some("active"));
    html! {
        <a class={class} href={section.route().href()}>
            {bundle.text(section.label_key(), section.label_key())}
        </a>
    }
}
