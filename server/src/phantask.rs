use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use types::{CurrentUser, Error, ErrorKind, Profile, ProfileUpdate, Result, Uid, UserRecord};

trait ReqwestExt {
    async fn checked(self) -> Result<Response>;

    async fn try_send<T: DeserializeOwned>(self) -> Result<T>
    where
        Self: Sized,
    {
        let body = self.checked().await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn try_send_text(self) -> Result<String>
    where
        Self: Sized,
    {
        Ok(self.checked().await?.text().await?)
    }

    async fn try_send_empty(self) -> Result<()>
    where
        Self: Sized,
    {
        self.checked().await.map(drop)
    }
}

impl ReqwestExt for RequestBuilder {
    async fn checked(self) -> Result<Response> {
        let response = self.send().await.map_err(|error| {
            tracing::warn!(%error, "backend request failed");
            Error::new(ErrorKind::Network, "could not reach the PhanTask server")
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%status, "backend returned an error");
        Err(Error::new(
            ErrorKind::from_status(status.as_u16()),
            error_message(&body).unwrap_or_else(|| status.to_string()),
        ))
    }
}

/// The backend reports errors as `{"message": ..}`, `{"error": ..}` or plain text.
fn error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return ["message", "error"]
            .iter()
            .find_map(|key| value.get(key)?.as_str())
            .map(String::from);
    }

    let body = body.trim();
    (!body.is_empty()).then(|| body.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(default, rename = "role")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub require_password_change: bool,
    pub message: Option<String>,
}

/// Client for the PhanTask REST API.
#[derive(Clone)]
pub struct PhanTaskClient {
    client: Client,
    base_url: Url,
}

impl PhanTaskClient {
    pub fn new(base_url: Url) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("phantask-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        Ok(self.client.request(method, url))
    }

    fn authed(&self, method: Method, path: &str, token: &SecretString) -> Result<RequestBuilder> {
        Ok(self
            .request(method, path)?
            .bearer_auth(token.expose_secret()))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.request(Method::POST, "/api/auth/login")?
            .json(&json!({ "username": username, "password": password }))
            .try_send()
            .await
    }

    /// Resolve the identity behind an access token.
    pub async fn me(&self, token: &SecretString) -> Result<CurrentUser> {
        self.authed(Method::GET, "/api/auth/me", token)?
            .try_send()
            .await
    }

    pub async fn profile(&self, token: &SecretString) -> Result<Profile> {
        self.authed(Method::GET, "/api/users/profile", token)?
            .try_send()
            .await
    }

    pub async fn update_profile(&self, token: &SecretString, update: &ProfileUpdate) -> Result<()> {
        self.authed(Method::POST, "/api/users/update-profile", token)?
            .json(update)
            .try_send_empty()
            .await
    }

    /// Create a student account. Returns the backend's confirmation message.
    pub async fn create_student(
        &self,
        token: &SecretString,
        username: &str,
        email: &str,
    ) -> Result<String> {
        self.authed(Method::POST, "/api/users/create-student", token)?
            .json(&json!({ "username": username, "email": email }))
            .try_send_text()
            .await
    }

    pub async fn list_active_users(&self, token: &SecretString) -> Result<Vec<UserRecord>> {
        self.authed(Method::GET, "/api/admin/users/active", token)?
            .try_send()
            .await
    }

    pub async fn deactivate_user(&self, token: &SecretString, uid: &Uid) -> Result<()> {
        self.authed(
            Method::PUT,
            &format!("/api/admin/users/{uid}/deactivate"),
            token,
        )?
        .try_send_empty()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_sources() {
        assert_eq!(
            error_message(r#"{"message": "Token expired"}"#).as_deref(),
            Some("Token expired")
        );
        assert_eq!(
            error_message(r#"{"error": "Invalid username or password"}"#).as_deref(),
            Some("Invalid username or password")
        );
        assert_eq!(
            error_message("Username already exists").as_deref(),
            Some("Username already exists")
        );
        assert_eq!(error_message("   "), None);
        assert_eq!(error_message(r#"{"code": 3}"#), None);
    }

    #[test]
    fn login_response_shapes() {
        let ok: LoginResponse = serde_json::from_str(
            r#"{"token": "t", "refreshToken": "r", "role": ["ADMIN"], "requirePasswordChange": false}"#,
        )
        .unwrap();
        assert_eq!(ok.token.as_deref(), Some("t"));
        assert_eq!(ok.roles, vec!["ADMIN"]);

        let first: LoginResponse = serde_json::from_str(
            r#"{"requirePasswordChange": true, "message": "Password change required before login"}"#,
        )
        .unwrap();
        assert!(first.require_password_change);
        assert_eq!(first.token, None);
    }
}
