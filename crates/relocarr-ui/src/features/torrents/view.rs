//! Torrent table view: search, sortable columns, selection, bulk actions.
//!
//! # Design
//! - The table receives already-derived rows; every click is routed back up
//!   as a callback so the store stays the single owner of view state.
//! - The header checkbox is view-scoped on purpose: it emits exactly the
//!   rendered hash set, while per-row toggles address the global selection.

use crate::features::torrents::state::{SortDir, SortKey, SortSpec, format_bytes, format_progress};
use relocarr_api_models::Torrent;
use std::collections::BTreeSet;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct TorrentTableProps {
    pub rows: Vec<Torrent>,
    pub selected: BTreeSet<String>,
    pub sort: SortSpec,
    pub query: String,
    pub allow_migrate: bool,
    pub dry_run: bool,
    pub busy: bool,
    pub on_query: Callback<String>,
    pub on_sort: Callback<SortKey>,
    pub on_toggle_row: Callback<String>,
    pub on_select_visible: Callback<(Vec<String>, bool)>,
    pub on_migrate: Callback<bool>,
    pub on_fix_metadata: Callback<()>,
    pub on_reload: Callback<()>,
}

#[function_component(TorrentTable)]
pub(crate) fn torrent_table(props: &TorrentTableProps) -> Html {
    let on_search = {
        let on_query = props.on_query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_query.emit(input.value());
            }
        })
    };
    let on_select_all = {
        let on_select_visible = props.on_select_visible.clone();
        let hashes: Vec<String> = props.rows.iter().map(|t| t.hash.clone()).collect();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_select_visible.emit((hashes.clone(), input.checked()));
            }
        })
    };
    let all_selected =
        !props.rows.is_empty() && props.rows.iter().all(|t| props.selected.contains(&t.hash));

    html! {
        <div class="torrent-pane">
            <div class="toolbar">
                <input
                    class="search"
                    placeholder="Search by name or hash..."
                    value={props.query.clone()}
                    oninput={on_search}
                />
                <div class="actions">
                    {if props.allow_migrate {
                        html! {
                            <>
                                <button disabled={props.busy} onclick={migrate_click(props, false)}>
                                    {if props.dry_run { "Migrate Selected (dry-run)" } else { "Migrate Selected" }}
                                </button>
                                <button class="danger" disabled={props.busy} onclick={migrate_click(props, true)}>
                                    {"Migrate + Delete Old"}
                                </button>
                            </>
                        }
                    } else { html! {} }}
                    <button disabled={props.busy} onclick={{
                        let on_fix_metadata = props.on_fix_metadata.clone();
                        Callback::from(move |_| on_fix_metadata.emit(()))
                    }}>{"Fix Metadata"}</button>
                    <button onclick={{
                        let on_reload = props.on_reload.clone();
                        Callback::from(move |_| on_reload.emit(()))
                    }}>{"Reload"}</button>
                </div>
            </div>
            <div class="table-frame">
                <table class="torrent-table">
                    <thead>
                        <tr>
                            <th>
                                <input type="checkbox" checked={all_selected} onchange={on_select_all} />
                            </th>
                            <th>{sort_button(props, SortKey::Name, "Name")}</th>
                            <th>{sort_button(props, SortKey::Hash, "Hash")}</th>
                            <th>{sort_button(props, SortKey::State, "State")}</th>
                            <th>{sort_button(props, SortKey::Progress, "Progress")}</th>
                            <th>{sort_button(props, SortKey::Size, "Size")}</th>
                            <th>{sort_button(props, SortKey::SavePath, "Save path")}</th>
                            <th>{sort_button(props, SortKey::Misplaced, "Misplaced")}</th>
                            <th>{sort_button(props, SortKey::SuggestedTarget, "Suggested")}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for props.rows.iter().map(|torrent| render_row(torrent, props))}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

fn migrate_click(props: &TorrentTableProps, delete_old: bool) -> Callback<MouseEvent> {
    let on_migrate = props.on_migrate.clone();
    Callback::from(move |_| on_migrate.emit(delete_old))
}

fn sort_button(props: &TorrentTableProps, key: SortKey, label: &'static str) -> Html {
    let active = props.sort.key == key;
    let arrow = if active {
        match props.sort.dir {
            SortDir::Asc => "▲",
            SortDir::Desc => "▼",
        }
    } else {
        "⇅"
    };
    let onclick = {
        let on_sort = props.on_sort.clone();
        Callback::from(move |_| on_sort.emit(key))
    };
    html! {
        <button class="sort" title="Click to sort" {onclick}>
            <span>{label}</span>
            <span class="arrow">{arrow}</span>
        </button>
    }
}

fn render_row(torrent: &Torrent, props: &TorrentTableProps) -> Html {
    let hash = torrent.hash.clone();
    let on_toggle = {
        let on_toggle_row = props.on_toggle_row.clone();
        let hash = hash.clone();
        Callback::from(move |_: Event| on_toggle_row.emit(hash.clone()))
    };

    html! {
        <tr key={hash.clone()}>
            <td>
                <input
                    type="checkbox"
                    checked={props.selected.contains(&torrent.hash)}
                    onchange={on_toggle}
                />
            </td>
            <td class="wrap">{&torrent.name}</td>
            <td class="mono" title={torrent.hash.clone()}>{&torrent.hash}</td>
            <td>{&torrent.state}</td>
            <td class="nowrap">{format_progress(torrent.progress)}</td>
            <td class="nowrap">{format_bytes(torrent.size)}</td>
            <td class="wrap" title={torrent.save_path.clone()}>{&torrent.save_path}</td>
            <td>{if torrent.misplaced { "yes" } else { "no" }}</td>
            <td class="wrap">{torrent.suggested_target.clone().unwrap_or_default()}</td>
        </tr>
    }
}
