//! Signed session cookies.
//!
//! The cookie value is `payload.signature`, where `payload` is the base64url
//! encoded session and `signature` an HMAC-SHA256 of the payload.

use base64::prelude::*;
use hmac::{Hmac, Mac};
use jiff::SignedDuration;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use types::{Error, Result, UserSession, decode_session, encode_session};

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &SecretString, payload: &str) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| types::err!("invalid session secret"))?;
    mac.update(payload.as_bytes());
    Ok(mac)
}

pub fn sign_session(session: &UserSession, secret: &SecretString) -> Result<String> {
    let payload = encode_session(session)?;
    let signature = BASE64_URL_SAFE_NO_PAD.encode(mac(secret, &payload)?.finalize().into_bytes());

    Ok(format!("{payload}.{signature}"))
}

pub fn verify_session(
    value: &str,
    secret: &SecretString,
    ttl: SignedDuration,
) -> Result<UserSession> {
    let (payload, signature) = value
        .split_once('.')
        .ok_or_else(|| Error::unauthorized("malformed session cookie"))?;

    let signature = BASE64_URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| Error::unauthorized("malformed session cookie"))?;
    mac(secret, payload)?
        .verify_slice(&signature)
        .map_err(|_| Error::unauthorized("invalid session signature"))?;

    let session =
        decode_session(payload).map_err(|_| Error::unauthorized("malformed session cookie"))?;
    if session.is_expired(ttl) {
        return Err(Error::unauthorized("session expired"));
    }

    Ok(session)
}

/// Pull the session cookie value out of a `Cookie` header.
pub fn find_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use types::{ErrorKind, SESSION_COOKIE_NAME};

    use super::*;

    fn secret() -> SecretString {
        "test-secret".to_string().into()
    }

    fn session() -> UserSession {
        UserSession::new(
            "user2".into(),
            vec!["STUDENT".into()],
            "jwt".to_string().into(),
        )
    }

    fn ttl() -> SignedDuration {
        SignedDuration::from_hours(1)
    }

    #[test]
    fn signed_session_verifies() {
        let value = sign_session(&session(), &secret()).unwrap();
        let verified = verify_session(&value, &secret(), ttl()).unwrap();
        assert_eq!(verified.username, "user2");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let value = sign_session(&session(), &secret()).unwrap();
        let err = verify_session(&value, &"other".to_string().into(), ttl()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let value = sign_session(&session(), &secret()).unwrap();
        let (_, signature) = value.split_once('.').unwrap();

        let mut forged = session();
        forged.roles = vec!["ADMIN".into()];
        let forged = format!("{}.{signature}", encode_session(&forged).unwrap());

        assert!(verify_session(&forged, &secret(), ttl()).is_err());
        assert!(verify_session("no-dot", &secret(), ttl()).is_err());
    }

    #[test]
    fn expired_session_is_rejected() {
        let mut old = session();
        old.issued_at = Timestamp::now() - SignedDuration::from_hours(2);
        let value = sign_session(&old, &secret()).unwrap();

        let err = verify_session(&value, &secret(), ttl()).unwrap_err();
        assert_eq!(err.message, "session expired");
    }

    #[test]
    fn finds_cookie_among_others() {
        let header = format!("theme=dark; {SESSION_COOKIE_NAME}=abc.def; other=1");
        assert_eq!(find_cookie(&header, SESSION_COOKIE_NAME), Some("abc.def"));
        assert_eq!(find_cookie("theme=dark", SESSION_COOKIE_NAME), None);
        assert_eq!(
            find_cookie(&format!("{SESSION_COOKIE_NAME}_old=x"), SESSION_COOKIE_NAME),
            None
        );
    }
}
