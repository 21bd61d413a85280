//! Application shell wiring the store, transports, and chrome together.
//!
//! # Design
//! - One root component owns transport lifecycles; feature views stay pure
//!   and receive derived data plus callbacks.
//! - Remote work runs in `spawn_local`; completions land in the store via
//!   the reducer helpers, never by mutating slices directly.
//! - Bulk actions refresh the snapshot when they settle, success or not.

use crate::app::stream::{EventStreamHandle, connect_events};
use crate::components::confirm::ConfirmModal;
use crate::components::header::Header;
use crate::components::login::LoginPanel;
use crate::components::tabs::TabStrip;
use crate::components::toast::{Toast, ToastHost, ToastKind};
use crate::core::session::{SessionPhase, establish, invalidate};
use crate::core::store::AppStore;
use crate::features::logs::view::LogPanel;
use crate::features::torrents::actions::{
    ActionPlan, BulkAction, Workflow, migration_allowed, plan,
};
use crate::features::torrents::state::{
    SortKey, Tab, partition, selected_hashes, set_selection, set_snapshot, toggle_selection,
    visible_rows,
};
use crate::features::torrents::view::TorrentTable;
use crate::services::api::ApiClient;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

mod stream;

#[function_component(RelocarrApp)]
fn relocarr_app() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let phase = use_selector(|store: &AppStore| store.session.phase);
    let session_error = use_selector(|store: &AppStore| store.session.error.clone());
    let torrents = use_selector(|store: &AppStore| store.torrents.clone());
    let activity = use_selector(|store: &AppStore| store.activity.clone());

    let workflow = use_state(Workflow::default);
    let dry_run = use_state(|| true);
    let login_busy = use_state(|| false);
    let toasts = use_state(Vec::<Toast>::new);
    let toast_seq = use_state(|| 0u64);
    let stream_handle = use_mut_ref(|| None as Option<EventStreamHandle>);

    let notify = {
        let toasts = toasts.clone();
        let toast_seq = toast_seq.clone();
        Callback::from(move |(kind, message): (ToastKind, String)| {
            push_toast(&toasts, &toast_seq, kind, message);
        })
    };

    let load = {
        let dispatch = dispatch.clone();
        let notify = notify.clone();
        Callback::from(move |_: ()| {
            let dispatch = dispatch.clone();
            let notify = notify.clone();
            let mut id = 0;
            dispatch.reduce_mut(|store| id = store.torrents.loads.begin());
            yew::platform::spawn_local(async move {
                match ApiClient.fetch_torrents().await {
                    Ok(items) => dispatch.reduce_mut(|store| {
                        if store.torrents.loads.accept(id) {
                            set_snapshot(&mut store.torrents, items);
                        }
                    }),
                    Err(err) => notify.emit((ToastKind::Error, format!("Load failed: {err}"))),
                }
            });
        })
    };

    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                yew::platform::spawn_local(async move {
                    match ApiClient.fetch_config().await {
                        Ok(config) => {
                            dispatch.reduce_mut(|store| establish(&mut store.session, config));
                        }
                        Err(_) => {
                            dispatch.reduce_mut(|store| invalidate(&mut store.session, None));
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    {
        let load = load.clone();
        let dispatch = dispatch.clone();
        let stream_handle = stream_handle.clone();
        let cleanup_handle = stream_handle.clone();
        use_effect_with_deps(
            move |phase| {
                if let Some(handle) = stream_handle.borrow_mut().take() {
                    handle.close();
                }
                if **phase == SessionPhase::Authenticated {
                    load.emit(());
                    let on_frame = Callback::from(move |data: String| {
                        dispatch.reduce_mut(|store| store.activity.ingest(&data));
                    });
                    *stream_handle.borrow_mut() = connect_events(on_frame);
                }
                move || {
                    if let Some(handle) = cleanup_handle.borrow_mut().take() {
                        handle.close();
                    }
                }
            },
            phase.clone(),
        );
    }

    let on_login = {
        let dispatch = dispatch.clone();
        let login_busy = login_busy.clone();
        Callback::from(move |(username, password): (String, String)| {
            let dispatch = dispatch.clone();
            let login_busy = login_busy.clone();
            login_busy.set(true);
            yew::platform::spawn_local(async move {
                let outcome = ApiClient.login(&username, &password).await;
                match outcome {
                    Ok(()) => match ApiClient.fetch_config().await {
                        Ok(config) => {
                            dispatch.reduce_mut(|store| establish(&mut store.session, config));
                        }
                        Err(err) => dispatch.reduce_mut(|store| {
                            invalidate(&mut store.session, Some(err.to_string()));
                        }),
                    },
                    Err(err) => dispatch.reduce_mut(|store| {
                        invalidate(&mut store.session, Some(err.to_string()));
                    }),
                }
                login_busy.set(false);
            });
        })
    };

    let on_logout = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            let dispatch = dispatch.clone();
            yew::platform::spawn_local(async move {
                let _ = ApiClient.logout().await;
                dispatch.reduce_mut(|store| invalidate(&mut store.session, None));
            });
        })
    };

    let execute = {
        let dispatch = dispatch.clone();
        let workflow = workflow.clone();
        let load = load.clone();
        let notify = notify.clone();
        let dry_run = dry_run.clone();
        Callback::from(move |action: BulkAction| {
            let hashes = selected_hashes(&dispatch.get().torrents.selected);
            let workflow = workflow.clone();
            let load = load.clone();
            let notify = notify.clone();
            let dry = *dry_run;
            workflow.set(Workflow::Executing);
            yew::platform::spawn_local(async move {
                let outcome = match action {
                    BulkAction::Migrate { delete_old } => ApiClient
                        .migrate(hashes, dry, delete_old)
                        .await
                        .map(|_| "Migrate task started"),
                    BulkAction::FixMetadata => ApiClient
                        .fix_metadata(hashes)
                        .await
                        .map(|()| "Fix-metadata request sent"),
                };
                match outcome {
                    Ok(message) => notify.emit((ToastKind::Info, message.to_string())),
                    Err(err) => notify.emit((ToastKind::Error, format!("Action failed: {err}"))),
                }
                load.emit(());
                workflow.set(Workflow::Idle);
            });
        })
    };

    let on_migrate = {
        let dispatch = dispatch.clone();
        let workflow = workflow.clone();
        let execute = execute.clone();
        Callback::from(move |delete_old: bool| {
            let store = dispatch.get();
            let action = BulkAction::Migrate { delete_old };
            match plan(action, store.torrents.tab, store.torrents.selected.len()) {
                ActionPlan::Ignore => {}
                ActionPlan::Confirm => workflow.set(Workflow::Confirming),
                ActionPlan::Dispatch => execute.emit(action),
            }
        })
    };

    let on_fix_metadata = {
        let dispatch = dispatch.clone();
        let execute = execute.clone();
        Callback::from(move |()| {
            let store = dispatch.get();
            let action = BulkAction::FixMetadata;
            if plan(action, store.torrents.tab, store.torrents.selected.len())
                == ActionPlan::Dispatch
            {
                execute.emit(action);
            }
        })
    };

    let on_confirm_delete = {
        let execute = execute.clone();
        Callback::from(move |()| execute.emit(BulkAction::Migrate { delete_old: true }))
    };
    let on_cancel_confirm = {
        let workflow = workflow.clone();
        Callback::from(move |()| workflow.set(Workflow::Idle))
    };

    let on_toggle_dry_run = {
        let dry_run = dry_run.clone();
        Callback::from(move |value: bool| dry_run.set(value))
    };
    let on_tab = {
        let dispatch = dispatch.clone();
        Callback::from(move |tab: Tab| dispatch.reduce_mut(|store| store.torrents.tab = tab))
    };
    let on_query = {
        let dispatch = dispatch.clone();
        Callback::from(move |query: String| {
            dispatch.reduce_mut(|store| store.torrents.query = query);
        })
    };
    let on_sort = {
        let dispatch = dispatch.clone();
        Callback::from(move |key: SortKey| {
            dispatch.reduce_mut(|store| store.torrents.sort = store.torrents.sort.toggled(key));
        })
    };
    let on_toggle_row = {
        let dispatch = dispatch.clone();
        Callback::from(move |hash: String| {
            dispatch.reduce_mut(|store| toggle_selection(&mut store.torrents.selected, &hash));
        })
    };
    let on_select_visible = {
        let dispatch = dispatch.clone();
        Callback::from(move |(hashes, value): (Vec<String>, bool)| {
            dispatch.reduce_mut(|store| set_selection(&mut store.torrents.selected, &hashes, value));
        })
    };
    let on_clear_log = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(|store| store.activity.clear()))
    };
    let dismiss_toast = {
        let toasts = toasts.clone();
        Callback::from(move |id: u64| {
            toasts.set(
                (*toasts)
                    .iter()
                    .filter(|toast| toast.id != id)
                    .cloned()
                    .collect(),
            );
        })
    };

    let counts = [
        partition(&torrents.items, Tab::Misplaced).len(),
        partition(&torrents.items, Tab::Ok).len(),
        partition(&torrents.items, Tab::Stuck).len(),
    ];
    let rows = visible_rows(&torrents.items, torrents.tab, &torrents.query, torrents.sort);
    let lines: Vec<String> = activity.lines().map(str::to_string).collect();

    match *phase {
        SessionPhase::Unknown => html! { <div class="boot">{"Loading…"}</div> },
        SessionPhase::Unauthenticated => html! {
            <>
                <LoginPanel
                    error={(*session_error).clone()}
                    busy={*login_busy}
                    on_submit={on_login}
                />
                <ToastHost toasts={(*toasts).clone()} on_dismiss={dismiss_toast} />
            </>
        },
        SessionPhase::Authenticated => html! {
            <div class="console">
                <Header
                    dry_run={*dry_run}
                    on_toggle_dry_run={on_toggle_dry_run}
                    on_reload={load.clone()}
                    on_logout={on_logout}
                />
                <TabStrip active={torrents.tab} counts={counts} on_select={on_tab} />
                <div class="console-body">
                    <TorrentTable
                        rows={rows}
                        selected={torrents.selected.clone()}
                        sort={torrents.sort}
                        query={torrents.query.clone()}
                        allow_migrate={migration_allowed(torrents.tab)}
                        dry_run={*dry_run}
                        busy={*workflow == Workflow::Executing}
                        on_query={on_query}
                        on_sort={on_sort}
                        on_toggle_row={on_toggle_row}
                        on_select_visible={on_select_visible}
                        on_migrate={on_migrate}
                        on_fix_metadata={on_fix_metadata}
                        on_reload={load}
                    />
                    <LogPanel lines={lines} on_clear={on_clear_log} />
                </div>
                <ConfirmModal
                    open={*workflow == Workflow::Confirming}
                    title={"Confirm deletion of old files"}
                    body={"This will delete the ORIGINAL source directory after a migration. Type CONFIRM to proceed."}
                    on_confirm={on_confirm_delete}
                    on_close={on_cancel_confirm}
                />
                <ToastHost toasts={(*toasts).clone()} on_dismiss={dismiss_toast} />
            </div>
        },
    }
}

fn push_toast(
    toasts: &UseStateHandle<Vec<Toast>>,
    next_id: &UseStateHandle<u64>,
    kind: ToastKind,
    message: String,
) {
    let id = **next_id + 1;
    next_id.set(id);
    let mut list = (**toasts).clone();
    list.push(Toast { id, message, kind });
    if list.len() > 4 {
        let drain = list.len() - 4;
        list.drain(0..drain);
    }
    toasts.set(list);
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<RelocarrApp>::with_root(root).render();
    } else {
        yew::Renderer::<RelocarrApp>::new().render();
    }
}
