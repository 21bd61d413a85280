use crate::features::torrents::actions::confirm_armed;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ConfirmModalProps {
    pub open: bool,
    pub title: String,
    pub body: String,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

/// Typed-challenge confirmation gate for destructive actions.
///
/// The confirm control stays disabled until the operator types the literal
/// token; the challenge resets every time the modal opens.
#[function_component(ConfirmModal)]
pub(crate) fn confirm_modal(props: &ConfirmModalProps) -> Html {
    let text = use_state(String::new);

    {
        let text = text.clone();
        use_effect_with_deps(
            move |_| {
                text.set(String::new());
                || ()
            },
            props.open,
        );
    }

    let on_input = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                text.set(input.value());
            }
        })
    };
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| on_confirm.emit(()))
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    if !props.open {
        return html! {};
    }

    html! {
        <div class="modal-overlay" role="dialog" aria-modal="true">
            <div class="card modal-card">
                <h2>{&props.title}</h2>
                <p class="muted">{&props.body}</p>
                <input
                    placeholder="Type CONFIRM"
                    value={(*text).clone()}
                    oninput={on_input}
                />
                <div class="actions">
                    <button class="ghost" onclick={on_close}>{"Cancel"}</button>
                    <button
                        class="danger"
                        disabled={!confirm_armed(&text)}
                        onclick={on_confirm}
                    >
                        {"Confirm"}
                    </button>
                </div>
            </div>
        </div>
    }
}
