mod auth_routes;
mod config;
mod phantask;
pub mod session;

use std::sync::OnceLock;

use anyhow::Context;
use axum::Router;
use axum::http::HeaderMap;
use dioxus::fullstack::FullstackContext;
use tracing_subscriber::EnvFilter;
use types::{CurrentUser, Error, Result, SESSION_COOKIE_NAME, UserSession, err};

use crate::auth_routes::auth_router;
pub use crate::config::Config;
pub use crate::phantask::{LoginResponse, PhanTaskClient};
use crate::session::{find_cookie, verify_session};

pub struct AppState {
    pub config: Config,
    pub client: PhanTaskClient,
}

static STATE: OnceLock<AppState> = OnceLock::new();

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load configuration and build the `/auth/*` routes.
pub fn init() -> anyhow::Result<Router> {
    let state = match STATE.get() {
        Some(state) => state,
        None => {
            let config = Config::load().context("failed to load configuration")?;
            let client = PhanTaskClient::new(config.backend_url.clone())
                .context("failed to build the backend HTTP client")?;
            tracing::info!(backend = %config.backend_url, "server configured");
            STATE.get_or_init(|| AppState { config, client })
        }
    };

    Ok(auth_router(state))
}

pub fn state() -> Result<&'static AppState> {
    STATE.get().ok_or_else(|| err!("server state is not initialised"))
}

/// Extract the user session from the request cookie.
pub async fn get_session_from_cookie() -> Result<UserSession> {
    let state = state()?;
    let headers: HeaderMap = FullstackContext::extract()
        .await
        .map_err(|e| err!("failed to read request headers: {e}"))?;

    let value = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| find_cookie(cookies, SESSION_COOKIE_NAME))
        .ok_or_else(|| Error::unauthorized("not signed in"))?;

    verify_session(value, &state.config.session_secret, state.config.session_ttl())
}

/// Require an authenticated admin session, returning the session if valid.
pub async fn require_admin_session() -> Result<UserSession> {
    let session = get_session_from_cookie().await?;

    if !session.is_admin() {
        tracing::warn!(username = %session.username, "non-admin attempted an admin action");
        return Err(Error::forbidden(format!(
            "access denied: user '{}' is not an administrator",
            session.username
        )));
    }

    Ok(session)
}

/// The identity check behind the session gate.
///
/// `None` when there is no usable session or the backend no longer accepts its token.
pub async fn current_user() -> Result<Option<CurrentUser>> {
    let session = match get_session_from_cookie().await {
        Ok(session) => session,
        Err(e) if e.is_unauthorized() => return Ok(None),
        Err(e) => return Err(e),
    };

    match state()?.client.me(&session.access_token).await {
        Ok(user) => Ok(Some(user)),
        Err(e) if e.is_unauthorized() => {
            tracing::info!(username = %session.username, "backend rejected session token");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
