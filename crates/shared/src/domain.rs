use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);

const REDACTED: &str = "<redacted>";

/// A user as stored by the remote collection. The id is always server-assigned.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Servers that never return credentials leave this empty.
    #[serde(default)]
    pub password: String,
    pub birthday: String,
    #[serde(default)]
    pub img_url: Option<String>,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Avatar URL, if one was set to something other than an empty string.
    pub fn avatar(&self) -> Option<&str> {
        self.img_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("birthday", &self.birthday)
            .field("img_url", &self.img_url)
            .finish()
    }
}

/// Form contents for a user that has not been persisted yet (or is being edited).
///
/// `img_url` is sent as-is, including the empty string the form starts with.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub birthday: String,
    #[serde(default)]
    pub img_url: String,
}

impl FormDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::Password => &self.password,
            DraftField::Birthday => &self.birthday,
            DraftField::ImgUrl => &self.img_url,
        }
    }

    pub fn value_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Email => &mut self.email,
            DraftField::Password => &mut self.password,
            DraftField::Birthday => &mut self.birthday,
            DraftField::ImgUrl => &mut self.img_url,
        }
    }
}

impl From<&UserRecord> for FormDraft {
    /// Copies every editable value, password included: the form demands a
    /// password on each submit, so an edit resends the stored one unless changed.
    fn from(record: &UserRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            password: record.password.clone(),
            birthday: record.birthday.clone(),
            img_url: record.img_url.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Debug for FormDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("birthday", &self.birthday)
            .field("img_url", &self.img_url)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
    Password,
    Birthday,
    ImgUrl,
}

impl DraftField {
    pub const ALL: [DraftField; 6] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Email,
        DraftField::Password,
        DraftField::Birthday,
        DraftField::ImgUrl,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DraftField::FirstName => "first_name",
            DraftField::LastName => "last_name",
            DraftField::Email => "email",
            DraftField::Password => "password",
            DraftField::Birthday => "birthday",
            DraftField::ImgUrl => "img_url",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::FirstName => "First Name",
            DraftField::LastName => "Last Name",
            DraftField::Email => "Email",
            DraftField::Password => "Password",
            DraftField::Birthday => "Birthday",
            DraftField::ImgUrl => "Image URL",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarStyle {
    Boy,
    Girl,
}

const AVATAR_BASE_URL: &str = "https://avatar.iran.liara.run/public";

/// Placeholder avatar URL; the stamp defeats image caching between picks.
pub fn avatar_url(style: AvatarStyle, stamp_millis: i64) -> String {
    let kind = match style {
        AvatarStyle::Boy => "boy",
        AvatarStyle::Girl => "girl",
    };
    format!("{AVATAR_BASE_URL}/{kind}?t={stamp_millis}")
}
