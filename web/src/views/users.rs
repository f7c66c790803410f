use dioxus::prelude::*;
use types::roster::{
    DeactivatePhase, Roster, RosterBackend, RosterList, fetch_roster, is_desktop, should_fetch,
};
use types::{Error, Result, Uid, UserRecord};
use ui::{RoleTags, use_toaster};

use crate::viewport::use_viewport_width;
use crate::{redirect_if_signed_out, use_current_user};

/// Roster calls routed through the server functions.
struct ServerRoster;

impl RosterBackend for ServerRoster {
    async fn active_users(&self) -> Result<Vec<UserRecord>> {
        api::list_active_users()
            .await
            .map_err(|e| Error::from_server_error(&e))
    }

    async fn deactivate_user(&self, uid: &Uid) -> Result<()> {
        api::deactivate_user(uid.clone())
            .await
            .map_err(|e| Error::from_server_error(&e))
    }
}

#[component]
pub fn ManageUsers() -> Element {
    let user = use_current_user();
    let viewport = use_viewport_width();
    let mut roster = use_signal(Roster::new);
    let mut requested = use_signal(|| false);
    let mut toaster = use_toaster();

    let is_admin = user.read().as_ref().is_some_and(|u| u.is_admin());

    use_effect(move || {
        let is_admin = user.read().as_ref().is_some_and(|u| u.is_admin());
        if !should_fetch(viewport(), *requested.peek(), is_admin) {
            return;
        }
        requested.set(true);

        spawn(async move {
            let result = fetch_roster(&ServerRoster).await;
            if let Err(error) = &result {
                tracing::warn!(%error, "failed to load users");
                redirect_if_signed_out(error);
            }
            if let Some(notice) = roster.write().apply_fetch(result) {
                toaster.show(notice);
            }
        });
    });

    let on_confirm = move |_: ()| {
        let Some(target) = roster.write().confirm() else {
            return;
        };
        spawn(async move {
            let result = ServerRoster.deactivate_user(&target.uid).await;
            match &result {
                Ok(()) => tracing::info!(uid = %target.uid, "user deactivated"),
                Err(error) => {
                    tracing::warn!(%error, uid = %target.uid, "failed to deactivate user");
                    redirect_if_signed_out(error);
                }
            }
            let notice = roster.write().finish_deactivate(&target.uid, result);
            toaster.show(notice);
        });
    };

    let header = rsx! {
        div { class: "page-header",
            div { class: "page-header-content",
                h1 { class: "page-title", "Manage Users" }
                p { class: "page-subtitle", "Search the roster and deactivate accounts." }
            }
        }
    };

    if !is_admin {
        return rsx! {
            div {
                {header}
                div { class: "empty-state", "Administrator access is required to manage users." }
            }
        };
    }

    match viewport() {
        None => {
            return rsx! {
                div {
                    {header}
                    div { class: "loading", "Loading..." }
                }
            };
        }
        Some(width) if !is_desktop(width) => {
            return rsx! {
                div {
                    {header}
                    DesktopRequired {}
                }
            };
        }
        Some(_) => {}
    }

    if roster.read().is_loading() {
        return rsx! {
            div {
                {header}
                div { class: "loading", "Loading users..." }
            }
        };
    }

    let modal = match roster.read().phase() {
        DeactivatePhase::Idle => None,
        DeactivatePhase::Confirming(u) => Some((u.username.clone(), false)),
        DeactivatePhase::Deactivating(u) => Some((u.username.clone(), true)),
    };
    let has_inactive = !roster.read().inactive().is_empty();

    rsx! {
        div {
            {header}

            RosterSection {
                title: "Active Users",
                list: RosterList::Active,
                roster,
                empty_message: "No active users found.",
                on_deactivate: move |uid: Uid| {
                    roster.write().select(&uid);
                },
            }

            if has_inactive {
                RosterSection {
                    title: "Inactive Users",
                    list: RosterList::Inactive,
                    roster,
                    empty_message: "No inactive users found.",
                }
            }

            if let Some((username, deactivating)) = modal {
                DeactivateConfirmModal {
                    username,
                    deactivating,
                    on_close: move |_| roster.write().cancel(),
                    on_confirm,
                }
            }
        }
    }
}

#[component]
fn DesktopRequired() -> Element {
    rsx! {
        div { class: "card desktop-required",
            h2 { class: "card-title", "Desktop Access Required" }
            p { class: "text-muted",
                "User management needs a wider screen. Open this page on a desktop browser to continue."
            }
        }
    }
}

/// One searchable roster table.
///
/// Rows only get a Deactivate action when `on_deactivate` is set.
#[component]
fn RosterSection(
    title: &'static str,
    list: RosterList,
    roster: Signal<Roster>,
    empty_message: &'static str,
    on_deactivate: Option<EventHandler<Uid>>,
) -> Element {
    let state = roster.read();
    let term = state.search_term(list).to_string();
    let users: Vec<UserRecord> = state.filtered(list).into_iter().cloned().collect();
    let empty = if term.trim().is_empty() {
        empty_message
    } else {
        "No users match your search."
    };
    let in_flight: Vec<bool> = users.iter().map(|u| state.is_in_flight(&u.uid)).collect();
    drop(state);

    rsx! {
        div { class: "card roster-section",
            div { class: "card-header",
                h2 { class: "card-title", "{title}" }
                input {
                    class: "form-input search-input",
                    r#type: "search",
                    placeholder: "Search by username or email",
                    value: "{term}",
                    oninput: move |e| roster.write().set_search(list, e.value()),
                }
            }
            if users.is_empty() {
                div { class: "empty-state", "{empty}" }
            } else {
                div { class: "table-container",
                    table {
                        thead {
                            tr {
                                th { "Username" }
                                th { "Email" }
                                th { "Roles" }
                                if on_deactivate.is_some() {
                                    th { class: "table-actions", "Actions" }
                                }
                            }
                        }
                        tbody {
                            for (user, busy) in users.into_iter().zip(in_flight) {
                                {
                                    let uid = user.uid.clone();
                                    rsx! {
                                        tr { key: "{user.uid}",
                                            td { "{user.username}" }
                                            td { "{user.email}" }
                                            td { RoleTags { roles: user.roles.clone() } }
                                            if let Some(handler) = on_deactivate {
                                                td { class: "table-actions",
                                                    button {
                                                        class: "btn btn-danger btn-sm",
                                                        disabled: busy,
                                                        onclick: move |_| handler.call(uid.clone()),
                                                        if busy { "Processing..." } else { "Deactivate" }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DeactivateConfirmModal(
    username: String,
    deactivating: bool,
    on_close: EventHandler<()>,
    on_confirm: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div { class: "modal modal-sm",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "Deactivate User" }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal-body",
                    p { "Are you sure you want to deactivate " strong { "{username}" } "?" }
                    p { class: "text-muted", "They will no longer be able to sign in." }
                }
                div { class: "modal-footer",
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: deactivating,
                        onclick: move |_| on_confirm.call(()),
                        if deactivating { "Processing..." } else { "Yes, Deactivate" }
                    }
                }
            }
        }
    }
}
