use dioxus::prelude::ServerFnError;
use serde::{Deserialize, Serialize};

/// Broad classification of a failure, mapped to and from HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    /// The request never produced a response.
    Network,
    Invalid,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Invalid => 400,
            ErrorKind::Network => 502,
            ErrorKind::Internal => 500,
        }
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            502..=504 => ErrorKind::Network,
            400..=499 => ErrorKind::Invalid,
            _ => ErrorKind::Internal,
        }
    }
}

/// A serializable error for client rendering.
///
/// Deliberately not a `std::error::Error` so that every third-party error can
/// be converted into it with `?`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// Recover the error a server function produced on the other side of the wire.
    pub fn from_server_error(err: &ServerFnError) -> Self {
        match err {
            ServerFnError::ServerError {
                message,
                code,
                details,
            } => {
                let kind = details
                    .as_ref()
                    .and_then(|d| d.get("kind"))
                    .and_then(|k| serde_json::from_value(k.clone()).ok())
                    .unwrap_or_else(|| ErrorKind::from_status(*code));
                Self::new(kind, message.clone())
            }
            other => Self::new(ErrorKind::Network, other.to_string()),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl<E> From<E> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::internal(error.to_string())
    }
}

/// Attach a context message to a third-party error, like `eyre::WrapErr`.
pub trait WrapErr<T> {
    fn wrap_err(self, context: &str) -> Result<T>;
}

impl<T, E> WrapErr<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn wrap_err(self, context: &str) -> Result<T> {
        self.map_err(|error| Error::internal(format!("{context}: {error}")))
    }
}

impl From<Error> for ServerFnError {
    fn from(error: Error) -> Self {
        ServerFnError::ServerError {
            message: error.message,
            code: error.kind.status_code(),
            details: Some(serde_json::json!({ "kind": error.kind })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_the_source_message() {
        let parsed: Result<u8> = "300".parse::<u8>().wrap_err("bad year of study");
        let err = parsed.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "bad year of study: number too large to fit in target type");
    }

    #[test]
    fn status_codes_round_trip_for_client_kinds() {
        for kind in [
            ErrorKind::Unauthorized,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
            ErrorKind::Invalid,
            ErrorKind::Internal,
        ] {
            assert_eq!(ErrorKind::from_status(kind.status_code()), kind);
        }
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Invalid);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Network);
    }

    #[test]
    fn server_fn_error_keeps_kind() {
        let original = Error::new(ErrorKind::NotFound, "no such user");
        let wire: ServerFnError = original.clone().into();
        assert_eq!(Error::from_server_error(&wire), original);
    }

    #[test]
    fn std_errors_become_internal() {
        let parse: Error = "x".parse::<u32>().unwrap_err().into();
        assert_eq!(parse.kind, ErrorKind::Internal);
    }
}
