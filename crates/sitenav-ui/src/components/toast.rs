use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::core::store::{Notice, NoticeKind};
use crate::i18n::TranslationBundle;

const AUTO_DISMISS_MS: u32 = 4000;

#[derive(Properties, PartialEq)]
pub(crate) struct NoticeHostProps {
    pub notices: Vec<Notice>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(NoticeHost)]
pub(crate) fn notice_host(props: &NoticeHostProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_default();
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Vec<Notice>| {
                let handles: Vec<Timeout> = list
                    .iter()
                    .map(|notice| {
                        let on_dismiss = on_dismiss.clone();
                        let id = notice.id;
                        Timeout::new(AUTO_DISMISS_MS, move || on_dismiss.emit(id))
                    })
                    .collect();
                move || drop(handles)
            },
            props.notices.clone(),
        );
    }
    let dismiss_label = bundle.text("notices.dismiss", "Dismiss");

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for props.notices.iter().map(|notice| render_notice(notice, props.on_dismiss.clone(), &dismiss_label))}
        </div>
    }
}

fn render_notice(notice: &Notice, on_dismiss: Callback<u64>, dismiss_label: &str) -> Html {
    let class = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Success => "success",
        NoticeKind::Error => "error",
    };
    let id = notice.id;
    html! {
        <div class={classes!("toast", class)} role="status">
            <span>{notice.message.clone()}</span>
            <button class="ghost" aria-label={dismiss_label.to_string()} onclick={Callback::from(move |_| on_dismiss.emit(id))}>{"✕"}</button>
        </div>
    }
}
