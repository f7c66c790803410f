//! User roster management: ordering, searching and the deactivate workflow.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::{Notice, Result, Uid, UserRecord};

/// Viewports narrower than this get a "desktop required" notice instead of the roster.
pub const DESKTOP_MIN_WIDTH: u32 = 990;

pub const LOAD_FAILED: &str = "Failed to load users";
pub const DEACTIVATED: &str = "User deactivated successfully";
pub const DEACTIVATE_FAILED: &str = "Failed to deactivate user";

pub fn is_desktop(viewport_width: u32) -> bool {
    viewport_width >= DESKTOP_MIN_WIDTH
}

/// Whether the roster page should start its single fetch.
///
/// `width` stays `None` until the browser reports one. Only administrators
/// fetch, and never from a narrow viewport.
pub fn should_fetch(width: Option<u32>, already_requested: bool, is_admin: bool) -> bool {
    is_admin && !already_requested && width.is_some_and(is_desktop)
}

/// Split a username into its alphabetic prefix and numeric suffix.
///
/// Only names made of ASCII letters followed by optional ASCII digits are
/// split; anything else is returned whole with an empty suffix.
fn split_username(name: &str) -> (&str, &str) {
    let letters = name
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(name.len());
    let (prefix, digits) = name.split_at(letters);

    if letters > 0 && digits.bytes().all(|b| b.is_ascii_digit()) {
        (prefix, digits)
    } else {
        (name, "")
    }
}

/// Compare two digit strings by numeric value. Empty counts as zero.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Lowercase with accents stripped: "Émile" becomes "emile".
fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collation-style comparison: base letters first, then accents, then case
/// (lowercase before uppercase).
fn locale_cmp(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Natural ordering of usernames: "user2" sorts before "user10".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (prefix_a, digits_a) = split_username(a);
    let (prefix_b, digits_b) = split_username(b);

    locale_cmp(prefix_a, prefix_b).then_with(|| cmp_digits(digits_a, digits_b))
}

/// Drop administrators and put the rest in natural username order.
pub fn prepare_roster(mut users: Vec<UserRecord>) -> Vec<UserRecord> {
    users.retain(|u| !u.is_admin());
    users.sort_by(|a, b| natural_cmp(&a.username, &b.username));
    users
}

/// Case-insensitive substring match against username or email.
pub fn matches_search(user: &UserRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    user.username.to_lowercase().contains(&term) || user.email.to_lowercase().contains(&term)
}

pub fn search<'a>(users: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    users.iter().filter(|u| matches_search(u, term)).collect()
}

/// The remote operations the roster depends on.
#[allow(async_fn_in_trait)]
pub trait RosterBackend {
    async fn active_users(&self) -> Result<Vec<UserRecord>>;
    async fn deactivate_user(&self, uid: &Uid) -> Result<()>;
}

/// Fetch the active users, ready to hand to [`Roster::apply_fetch`].
pub async fn fetch_roster<B: RosterBackend>(backend: &B) -> Result<Vec<UserRecord>> {
    backend.active_users().await.map(prepare_roster)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterList {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivatePhase<'a> {
    Idle,
    Confirming(&'a UserRecord),
    Deactivating(&'a UserRecord),
}

/// State of the user-management page.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    active: Vec<UserRecord>,
    // No backend listing for inactive users exists yet; this stays empty.
    inactive: Vec<UserRecord>,
    search_active: String,
    search_inactive: String,
    selected: Option<UserRecord>,
    in_flight: Option<Uid>,
    loaded: bool,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            inactive: Vec::new(),
            search_active: String::new(),
            search_inactive: String::new(),
            selected: None,
            in_flight: None,
            loaded: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn active(&self) -> &[UserRecord] {
        &self.active
    }

    pub fn inactive(&self) -> &[UserRecord] {
        &self.inactive
    }

    fn list(&self, list: RosterList) -> &[UserRecord] {
        match list {
            RosterList::Active => &self.active,
            RosterList::Inactive => &self.inactive,
        }
    }

    /// Store the outcome of [`fetch_roster`], which has already dropped admins
    /// and sorted the list. Returns a notice on failure.
    pub fn apply_fetch(&mut self, result: Result<Vec<UserRecord>>) -> Option<Notice> {
        self.loaded = true;
        self.inactive.clear();

        match result {
            Ok(users) => {
                self.active = users;
                None
            }
            Err(_) => {
                self.active.clear();
                Some(Notice::error(LOAD_FAILED))
            }
        }
    }

    pub fn search_term(&self, list: RosterList) -> &str {
        match list {
            RosterList::Active => &self.search_active,
            RosterList::Inactive => &self.search_inactive,
        }
    }

    pub fn set_search(&mut self, list: RosterList, term: impl Into<String>) {
        match list {
            RosterList::Active => self.search_active = term.into(),
            RosterList::Inactive => self.search_inactive = term.into(),
        }
    }

    /// The list filtered by its own search term.
    pub fn filtered(&self, list: RosterList) -> Vec<&UserRecord> {
        search(self.list(list), self.search_term(list))
    }

    pub fn selected(&self) -> Option<&UserRecord> {
        self.selected.as_ref()
    }

    pub fn is_in_flight(&self, uid: &Uid) -> bool {
        self.in_flight.as_ref() == Some(uid)
    }

    pub fn phase(&self) -> DeactivatePhase<'_> {
        match &self.selected {
            None => DeactivatePhase::Idle,
            Some(user) if self.is_in_flight(&user.uid) => DeactivatePhase::Deactivating(user),
            Some(user) => DeactivatePhase::Confirming(user),
        }
    }

    /// Open the confirmation prompt for an active user.
    pub fn select(&mut self, uid: &Uid) -> bool {
        match self.active.iter().find(|u| &u.uid == uid) {
            Some(user) => {
                self.selected = Some(user.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.selected = None;
    }

    /// Mark the selected user as in flight and hand it back for the remote call.
    ///
    /// Returns `None` when nothing is selected or the call is already running.
    pub fn confirm(&mut self) -> Option<UserRecord> {
        let user = self.selected.as_ref()?;
        if self.is_in_flight(&user.uid) {
            return None;
        }
        self.in_flight = Some(user.uid.clone());
        Some(user.clone())
    }

    /// Apply the outcome of a deactivate call for `uid`.
    pub fn finish_deactivate(&mut self, uid: &Uid, result: Result<()>) -> Notice {
        let notice = match result {
            Ok(()) => {
                self.active.retain(|u| &u.uid != uid);
                Notice::success(DEACTIVATED)
            }
            Err(_) => Notice::error(DEACTIVATE_FAILED),
        };

        if self.is_in_flight(uid) {
            self.in_flight = None;
        }
        if self.selected.as_ref().is_some_and(|u| &u.uid == uid) {
            self.selected = None;
        }

        notice
    }
}
