use serde::{Deserialize, Deserializer, Serialize};

/// Role marker carried by administrator accounts.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Tag shown in place of an empty role list.
pub const NO_ROLE_TAG: &str = "N/A";

/// Unique identifier of a user account.
///
/// The backend emits numeric ids; they are kept as strings on this side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Uid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawUid {
            Number(u64),
            Text(String),
        }

        Ok(match RawUid::deserialize(deserializer)? {
            RawUid::Number(n) => Self(n.to_string()),
            RawUid::Text(s) => Self(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uid: Uid,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }
}

/// Roles as displayed in a table cell: the role list, or a single "N/A" tag.
pub fn role_tags(roles: &[String]) -> Vec<&str> {
    if roles.is_empty() {
        vec![NO_ROLE_TAG]
    } else {
        roles.iter().map(String::as_str).collect()
    }
}

/// The identity behind a valid session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }

    pub fn primary_role(&self) -> &str {
        self.roles.first().map(String::as_str).unwrap_or(NO_ROLE_TAG)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub year_of_study: Option<String>,
    pub photo_url: Option<String>,
}

/// Editable subset of a [`Profile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: String,
    pub department: String,
    pub phone: String,
    pub year_of_study: String,
    pub photo_url: Option<String>,
}

impl From<&Profile> for ProfileUpdate {
    fn from(profile: &Profile) -> Self {
        Self {
            full_name: profile.full_name.clone().unwrap_or_default(),
            department: profile.department.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
            year_of_study: profile.year_of_study.clone().unwrap_or_default(),
            photo_url: profile.photo_url.clone(),
        }
    }
}
