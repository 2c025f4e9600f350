use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Language Learner";
pub const DEFAULT_AVATAR: &str = "🌟";

/// Avatars a learner can pick from.
pub const AVATAR_OPTIONS: [&str; 10] = ["🌟", "📚", "🎯", "🏆", "🚀", "💡", "🎨", "🌈", "⭐", "🔥"];

/// Learner identity and streak bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub join_date: DateTime<Utc>,
    pub avatar: String,
    #[serde(rename = "totalStudyTime", default)]
    pub total_study_minutes: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_study_date: Option<DateTime<Utc>>,
}

impl Profile {
    /// A fresh profile for a learner joining at `joined_at`.
    #[must_use]
    pub fn new(joined_at: DateTime<Utc>) -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            join_date: joined_at,
            avatar: DEFAULT_AVATAR.to_owned(),
            total_study_minutes: 0,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
        }
    }

    /// Shallow-merge the supplied fields into this profile.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            let name = name.trim();
            self.name = if name.is_empty() {
                DEFAULT_NAME.to_owned()
            } else {
                name.to_owned()
            };
        }
        if let Some(avatar) = update.avatar {
            let avatar = avatar.trim();
            if !avatar.is_empty() {
                avatar.clone_into(&mut self.avatar);
            }
        }
    }
}

/// Partial profile edit; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}
