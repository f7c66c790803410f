//! Route guarding for pages that require a signed-in user.

use crate::Error;

/// Override token value that unlocks every protected page.
///
/// This is a testing backdoor. Callers must only ever pass an override token
/// from a build that explicitly opted into it.
pub const OVERRIDE_OPEN: &str = "open";

/// What the identity check currently knows about the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub loading: bool,
}

impl SessionState {
    /// The identity check has not resolved yet.
    pub const CHECKING: Self = Self {
        is_authenticated: false,
        loading: true,
    };

    pub fn resolved(is_authenticated: bool) -> Self {
        Self {
            is_authenticated,
            loading: false,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::CHECKING
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the protected content.
    Grant,
    /// Show an interstitial while the session is checked.
    Pending,
    /// Send the visitor to the login page.
    Deny,
}

/// Decide whether protected content renders.
pub fn evaluate_access(session: SessionState, override_token: Option<&str>) -> Access {
    if override_token == Some(OVERRIDE_OPEN) {
        return Access::Grant;
    }

    if session.loading {
        return Access::Pending;
    }

    if session.is_authenticated {
        Access::Grant
    } else {
        Access::Deny
    }
}

/// Whether a failed call should send the visitor back to the login page.
///
/// Only a real session can expire. Visitors let in by the override token have
/// none, so an unauthorized response leaves them where they are.
pub fn should_redirect_to_login(error: &Error, has_session: bool) -> bool {
    has_session && error.is_unauthorized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn expired_sessions_go_back_to_login() {
        assert!(should_redirect_to_login(&Error::unauthorized("expired"), true));
        assert!(!should_redirect_to_login(&Error::forbidden("not admin"), true));
        assert!(!should_redirect_to_login(
            &Error::new(ErrorKind::Network, "down"),
            true
        ));
    }

    #[test]
    fn override_visitors_are_not_redirected() {
        assert!(!should_redirect_to_login(&Error::unauthorized("no cookie"), false));
    }

    const ALL_SESSIONS: [SessionState; 4] = [
        SessionState {
            is_authenticated: false,
            loading: false,
        },
        SessionState {
            is_authenticated: true,
            loading: false,
        },
        SessionState {
            is_authenticated: false,
            loading: true,
        },
        SessionState {
            is_authenticated: true,
            loading: true,
        },
    ];

    #[test]
    fn loading_without_override_is_pending() {
        for session in ALL_SESSIONS.into_iter().filter(|s| s.loading) {
            assert_eq!(evaluate_access(session, None), Access::Pending);
            assert_eq!(evaluate_access(session, Some("closed")), Access::Pending);
        }
    }

    #[test]
    fn open_override_always_grants() {
        for session in ALL_SESSIONS {
            assert_eq!(evaluate_access(session, Some(OVERRIDE_OPEN)), Access::Grant);
        }
    }

    #[test]
    fn resolved_sessions() {
        assert_eq!(
            evaluate_access(SessionState::resolved(true), None),
            Access::Grant
        );
        assert_eq!(
            evaluate_access(SessionState::resolved(false), None),
            Access::Deny
        );
        // Override must match exactly.
        assert_eq!(
            evaluate_access(SessionState::resolved(false), Some("OPEN")),
            Access::Deny
        );
    }

    #[test]
    fn default_is_checking() {
        assert_eq!(SessionState::default(), SessionState::CHECKING);
    }
}
