use crate::features::torrents::state::Tab;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct TabStripProps {
    pub active: Tab,
    /// Partition sizes in [`Tab::all`] order.
    pub counts: [usize; 3],
    pub on_select: Callback<Tab>,
}

#[function_component(TabStrip)]
pub(crate) fn tab_strip(props: &TabStripProps) -> Html {
    html! {
        <div class="tab-strip">
            {for Tab::all().iter().zip(props.counts.iter()).map(|(tab, count)| {
                let tab = *tab;
                let onclick = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_| on_select.emit(tab))
                };
                let class = if props.active == tab { "tab active" } else { "tab" };
                html! {
                    <button {class} {onclick}>
                        {format!("{} ({count})", tab.label())}
                    </button>
                }
            })}
        </div>
    }
}
