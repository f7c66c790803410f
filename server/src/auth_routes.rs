use axum::{
    Form, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use cookie::{Cookie, SameSite};
use serde::Deserialize;
use types::{Error, Result, SESSION_COOKIE_NAME, UserSession};

use crate::{AppState, LoginResponse, session::sign_session};

pub fn auth_router(state: &'static AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
        .with_state(state)
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(State(state): State<&'static AppState>, Form(form): Form<LoginForm>) -> Response {
    match login_inner(state, form).await {
        Ok(cookie) => redirect_with_cookie("/", cookie),
        Err(error) => {
            tracing::info!(%error, "login rejected");
            Redirect::to(&login_error_url(&error.message)).into_response()
        }
    }
}

async fn login_inner(state: &AppState, form: LoginForm) -> Result<Cookie<'static>> {
    tracing::info!(username = %form.username, "login attempt");

    let response = state.client.login(&form.username, &form.password).await?;
    let session = session_from_login(form.username, response)?;
    let value = sign_session(&session, &state.config.session_secret)?;

    let max_age = cookie::time::Duration::hours(state.config.session_ttl_hours.into());
    Ok(Cookie::build((SESSION_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.secure_cookies)
        .max_age(max_age)
        .build())
}

fn session_from_login(username: String, response: LoginResponse) -> Result<UserSession> {
    if response.require_password_change {
        return Err(Error::forbidden(response.message.unwrap_or_else(|| {
            "Password change required before login".to_string()
        })));
    }

    let token = response
        .token
        .ok_or_else(|| types::err!("login response carried no token"))?;

    Ok(UserSession::new(username, response.roles, token.into())
        .with_refresh_token(response.refresh_token.map(Into::into)))
}

async fn logout() -> Response {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::ZERO)
        .build();

    redirect_with_cookie("/login", cookie)
}

fn redirect_with_cookie(to: &str, cookie: Cookie<'_>) -> Response {
    let Ok(value) = HeaderValue::from_str(&cookie.to_string()) else {
        tracing::error!("session cookie is not a valid header value");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Session error").into_response();
    };

    let mut response = Redirect::to(to).into_response();
    response.headers_mut().append(SET_COOKIE, value);
    response
}

fn login_error_url(message: &str) -> String {
    // byte_serialize escapes literal '+', so any remaining '+' was a space.
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("/login?error={}", encoded.replace('+', "%20"))
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use types::ErrorKind;

    use super::*;

    fn response(token: Option<&str>, refresh: Option<&str>) -> LoginResponse {
        LoginResponse {
            token: token.map(String::from),
            refresh_token: refresh.map(String::from),
            roles: vec!["STUDENT".into()],
            require_password_change: false,
            message: None,
        }
    }

    #[test]
    fn login_session_keeps_both_tokens() {
        let session =
            session_from_login("user1".into(), response(Some("jwt"), Some("refresh"))).unwrap();

        assert_eq!(session.username, "user1");
        assert_eq!(session.roles, vec!["STUDENT"]);
        assert_eq!(session.access_token.expose_secret(), "jwt");
        assert_eq!(
            session.refresh_token.as_ref().map(|t| t.expose_secret()),
            Some("refresh")
        );
    }

    #[test]
    fn login_without_token_is_rejected() {
        let err = session_from_login("user1".into(), response(None, None)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }

    #[test]
    fn password_change_blocks_login() {
        let mut pending = response(Some("jwt"), None);
        pending.require_password_change = true;
        pending.message = Some("Please change your password".into());

        let err = session_from_login("user1".into(), pending).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.message, "Please change your password");
    }

    #[test]
    fn login_error_is_query_encoded() {
        assert_eq!(
            login_error_url("Invalid username or password"),
            "/login?error=Invalid%20username%20or%20password"
        );
        assert_eq!(login_error_url("a+b&c"), "/login?error=a%2Bb%26c");
    }
}
