pub mod access;
mod error;
mod notice;
pub mod roster;
mod session;
mod user;

pub use error::{Error, ErrorKind, Result, WrapErr};
pub use notice::{Notice, NoticeKind};
pub use session::{SESSION_COOKIE_NAME, UserSession, decode_session, encode_session};
pub use user::{
    ADMIN_ROLE, CurrentUser, NO_ROLE_TAG, Profile, ProfileUpdate, Uid, UserRecord, role_tags,
};

/// Build an internal [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::internal(format!($($arg)*))
    };
}
