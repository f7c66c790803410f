use dioxus::prelude::*;
use types::CurrentUser;
use types::access::{Access, SessionState, evaluate_access, should_redirect_to_login};
use ui::{ToastHost, use_toaster_provider};

mod viewport;
mod views;

use views::{Dashboard, EditProfile, Login, ManageUsers, Profile};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login?:error")]
    Login { error: Option<String> },
    #[layout(AuthenticatedLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/profile")]
        Profile {},
        #[route("/profile/edit")]
        EditProfile {},
        #[route("/users")]
        ManageUsers {},
}

impl Route {
    pub fn users() -> Self {
        Route::ManageUsers {}
    }

    pub fn login_expired() -> Self {
        Route::Login {
            error: Some("Your session has expired. Please sign in again.".to_string()),
        }
    }
}

fn main() {
    #[cfg(feature = "server")]
    {
        server::init_tracing();
        dioxus::serve(|| async move {
            let routes = server::init()?;

            Ok(dioxus::server::router(App).merge(routes))
        });
    }

    #[cfg(all(feature = "web", not(feature = "server")))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "PhanTask" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = matches!(
        (&current_route, &to),
        (Route::Dashboard {}, Route::Dashboard {})
            | (Route::Profile {}, Route::Profile {})
            | (Route::EditProfile {}, Route::Profile {})
            | (Route::ManageUsers {}, Route::ManageUsers {})
    );

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

/// The signed-in user, as resolved by the session gate.
///
/// `None` only when the page was opened through the test override.
pub fn use_current_user() -> Memo<Option<CurrentUser>> {
    use_context::<Memo<Option<CurrentUser>>>()
}

/// Send the visitor back to the login page when the backend reports the session is gone.
///
/// Visitors without a session (the test override) stay put. Returns `true` if
/// a redirect was issued.
pub fn redirect_if_signed_out(error: &types::Error) -> bool {
    let has_session = try_consume_context::<Memo<Option<CurrentUser>>>()
        .is_some_and(|user| user.peek().is_some());

    if should_redirect_to_login(error, has_session) {
        navigator().replace(Route::login_expired());
        true
    } else {
        false
    }
}

/// Read the session gate override from `sessionStorage["testToken"]`.
///
/// The outer `None` means the value has not been read yet.
#[cfg(feature = "test-override")]
fn use_override_token() -> Option<Option<String>> {
    let token = use_resource(|| async {
        document::eval("return sessionStorage.getItem('testToken');")
            .join::<Option<String>>()
            .await
            .ok()
            .flatten()
    });

    token.read().clone()
}

#[cfg(not(feature = "test-override"))]
fn use_override_token() -> Option<Option<String>> {
    Some(None)
}

#[component]
fn AuthenticatedLayout() -> Element {
    let user = use_server_future(api::get_current_user)?;
    let override_token = use_override_token();
    use_toaster_provider();

    let current_user = use_memo(move || match &*user.read() {
        Some(Ok(Some(person))) => Some(person.clone()),
        _ => None,
    });
    use_context_provider(|| current_user);

    let session = match (&*user.read(), &override_token) {
        (_, None) | (None, _) => SessionState::CHECKING,
        (Some(Ok(Some(_))), _) => SessionState::resolved(true),
        (Some(Ok(None)) | Some(Err(_)), _) => SessionState::resolved(false),
    };

    match evaluate_access(session, override_token.flatten().as_deref()) {
        Access::Grant => {
            let person = current_user();
            let name = person
                .as_ref()
                .map_or_else(|| "Guest".to_string(), |p| p.username.clone());
            let role = person
                .as_ref()
                .map_or("Visitor", |p| p.primary_role())
                .to_string();
            let is_admin = person.as_ref().is_some_and(|p| p.is_admin());
            let initial = name
                .chars()
                .next()
                .unwrap_or('?')
                .to_uppercase()
                .to_string();

            rsx! {
                div { class: "app-layout",
                    aside { class: "sidebar",
                        div { class: "sidebar-header",
                            span { class: "sidebar-logo", "PhanTask" }
                        }
                        nav { class: "sidebar-nav",
                            NavLink { to: Route::Dashboard {}, "Dashboard" }
                            NavLink { to: Route::Profile {}, "Profile" }
                            if is_admin {
                                NavLink { to: Route::users(), "Manage Users" }
                            }
                        }
                        div { class: "sidebar-footer",
                            div { class: "sidebar-user",
                                div { class: "sidebar-avatar", "{initial}" }
                                div { class: "sidebar-user-info",
                                    div { class: "sidebar-user-name", "{name}" }
                                    div { class: "sidebar-user-role", "{role}" }
                                }
                            }
                            a { href: "/auth/logout", rel: "external", class: "sidebar-logout", "Sign out" }
                        }
                    }
                    main { class: "main-content",
                        Outlet::<Route> {}
                    }
                    ToastHost {}
                }
            }
        }
        Access::Deny => {
            navigator().replace(Route::Login { error: None });
            rsx! {
                div { class: "loading", "Redirecting to login..." }
            }
        }
        Access::Pending => {
            rsx! {
                div { class: "loading", "Checking session..." }
            }
        }
    }
}
