use base64::Engine;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use jiff::{SignedDuration, Timestamp};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{ADMIN_ROLE, CurrentUser, Result, WrapErr};

pub const SESSION_COOKIE_NAME: &str = "phantask_session";

/// Everything the server keeps about a signed-in user, stored in the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub username: String,
    pub roles: Vec<String>,
    #[serde(with = "secret_string")]
    pub access_token: SecretString,
    #[serde(default, with = "optional_secret_string")]
    pub refresh_token: Option<SecretString>,
    pub issued_at: Timestamp,
}

impl UserSession {
    pub fn new(username: String, roles: Vec<String>, access_token: SecretString) -> Self {
        Self {
            username,
            roles,
            access_token,
            refresh_token: None,
            issued_at: Timestamp::now(),
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: Option<SecretString>) -> Self {
        self.refresh_token = refresh_token;
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    pub fn is_expired(&self, ttl: SignedDuration) -> bool {
        Timestamp::now() >= self.issued_at + ttl
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            username: self.username.clone(),
            roles: self.roles.clone(),
        }
    }
}

mod secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use secrecy::ExposeSecret;
        serializer.serialize_str(secret.expose_secret())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.into())
    }
}

mod optional_secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match secret {
            Some(secret) => serializer.serialize_some(secret.expose_secret()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.map(Into::into))
    }
}

pub fn encode_session(session: &UserSession) -> Result<String> {
    let json = serde_json::to_string(session).wrap_err("failed to serialize session")?;
    Ok(BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

pub fn decode_session(encoded: &str) -> Result<UserSession> {
    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(encoded)
        .wrap_err("failed to decode base64")?;
    let json = String::from_utf8(bytes).wrap_err("invalid UTF-8 in session")?;
    serde_json::from_str(&json).wrap_err("failed to parse session JSON")
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn session() -> UserSession {
        UserSession::new(
            "admin1".into(),
            vec!["ADMIN".into()],
            "jwt-token".to_string().into(),
        )
    }

    #[test]
    fn encoded_session_decodes() {
        let encoded = encode_session(&session()).unwrap();
        let decoded = decode_session(&encoded).unwrap();

        assert_eq!(decoded.username, "admin1");
        assert_eq!(decoded.access_token.expose_secret(), "jwt-token");
        assert!(decoded.is_admin());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_session("not base64!").is_err());
        assert!(decode_session(&BASE64_URL_SAFE_NO_PAD.encode(b"{}")).is_err());
    }

    #[test]
    fn decode_errors_say_which_step_failed() {
        let err = decode_session("not base64!").unwrap_err();
        assert!(err.message.starts_with("failed to decode base64: "), "{}", err.message);

        let err = decode_session(&BASE64_URL_SAFE_NO_PAD.encode([0xff, 0xfe])).unwrap_err();
        assert!(err.message.starts_with("invalid UTF-8 in session: "), "{}", err.message);

        let err = decode_session(&BASE64_URL_SAFE_NO_PAD.encode(b"{}")).unwrap_err();
        assert!(err.message.starts_with("failed to parse session JSON: "), "{}", err.message);
    }

    #[test]
    fn refresh_token_survives_the_cookie() {
        let with_refresh =
            session().with_refresh_token(Some("refresh-abc".to_string().into()));
        let decoded = decode_session(&encode_session(&with_refresh).unwrap()).unwrap();
        assert_eq!(
            decoded.refresh_token.as_ref().map(|t| t.expose_secret()),
            Some("refresh-abc")
        );

        let decoded = decode_session(&encode_session(&session()).unwrap()).unwrap();
        assert!(decoded.refresh_token.is_none());
    }

    #[test]
    fn cookies_without_refresh_field_still_decode() {
        let json = serde_json::json!({
            "username": "user1",
            "roles": [],
            "access_token": "jwt",
            "issued_at": Timestamp::now(),
        });
        let encoded = BASE64_URL_SAFE_NO_PAD.encode(json.to_string());

        let decoded = decode_session(&encoded).unwrap();
        assert!(decoded.refresh_token.is_none());
    }

    #[test]
    fn expiry_follows_issue_time() {
        let mut s = session();
        assert!(!s.is_expired(SignedDuration::from_hours(1)));

        s.issued_at = Timestamp::now() - SignedDuration::from_hours(2);
        assert!(s.is_expired(SignedDuration::from_hours(1)));
    }
}
