//! Live log panel view.
//!
//! # Design
//! - Pure presentation over the bounded log slice; ingest and eviction live
//!   in the state module.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LogPanelProps {
    pub lines: Vec<String>,
    pub on_clear: Callback<()>,
}

#[function_component(LogPanel)]
pub(crate) fn log_panel(props: &LogPanelProps) -> Html {
    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_| on_clear.emit(()))
    };

    html! {
        <aside class="log-panel">
            <div class="log-header">
                <h3>{"Live log"}</h3>
                <button class="ghost" onclick={on_clear}>{"clear"}</button>
            </div>
            <div class="log-body">
                {if props.lines.is_empty() {
                    html! { <div class="muted">{"No activity yet…"}</div> }
                } else {
                    html! {
                        <>
                            {for props.lines.iter().map(|line| html! { <div>{line}</div> })}
                        </>
                    }
                }}
            </div>
        </aside>
    }
}
