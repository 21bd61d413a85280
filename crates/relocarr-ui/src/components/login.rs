use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LoginPanelProps {
    pub error: Option<String>,
    pub busy: bool,
    pub on_submit: Callback<(String, String)>,
}

#[function_component(LoginPanel)]
pub(crate) fn login_panel(props: &LoginPanelProps) -> Html {
    let username = use_state(|| "admin".to_string());
    let password = use_state(|| "admin".to_string());

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                username.set(input.value());
            }
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };
    let submit = {
        let username = username.clone();
        let password = password.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_| {
            on_submit.emit(((*username).clone(), (*password).clone()));
        })
    };

    html! {
        <div class="login-screen">
            <div class="card login-card">
                <h1>{"Login"}</h1>
                {if let Some(err) = &props.error {
                    html! { <p class="error-text">{err}</p> }
                } else { html! {} }}
                <label class="stack">
                    <span>{"Username"}</span>
                    <input
                        placeholder="Username"
                        value={(*username).clone()}
                        oninput={on_username}
                    />
                </label>
                <label class="stack">
                    <span>{"Password"}</span>
                    <input
                        type="password"
                        placeholder="Password"
                        value={(*password).clone()}
                        oninput={on_password}
                    />
                </label>
                <button class="solid" disabled={props.busy} onclick={submit}>
                    {if props.busy { "..." } else { "Login" }}
                </button>
            </div>
        </div>
    }
}
