use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct HeaderProps {
    pub dry_run: bool,
    pub on_toggle_dry_run: Callback<bool>,
    pub on_reload: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub(crate) fn header(props: &HeaderProps) -> Html {
    let on_dry_run = {
        let on_toggle_dry_run = props.on_toggle_dry_run.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_toggle_dry_run.emit(input.checked());
            }
        })
    };
    let on_reload = {
        let on_reload = props.on_reload.clone();
        Callback::from(move |_| on_reload.emit(()))
    };
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <header class="console-header">
            <h1>{"Relocarr"}</h1>
            <div class="actions">
                <label class="dry-run">
                    <input type="checkbox" checked={props.dry_run} onchange={on_dry_run} />
                    {"Dry-Run"}
                </label>
                <button onclick={on_reload}>{"Refresh"}</button>
                <button class="ghost" onclick={on_logout}>{"Logout"}</button>
            </div>
        </header>
    }
}
