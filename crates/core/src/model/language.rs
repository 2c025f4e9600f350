use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MAX_CODE_LEN: usize = 32;

/// Best score at or above which a language counts as completed.
pub const COMPLETION_THRESHOLD: u32 = 80;

//
// ─── LANGUAGE CODE ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LanguageCodeError {
    #[error("language code cannot be empty")]
    Empty,

    #[error("language code is too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("language code contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Key of a language in the progress record, e.g. `hindi`.
///
/// Codes are trimmed and lower-cased; only ASCII letters, digits, `-` and `_`
/// are accepted.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a new `LanguageCode`.
    ///
    /// # Errors
    ///
    /// Returns `LanguageCodeError` if the code is empty, too long, or contains
    /// characters outside `[a-z0-9_-]`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LanguageCodeError> {
        let code = raw.as_ref().trim().to_ascii_lowercase();
        if code.is_empty() {
            return Err(LanguageCodeError::Empty);
        }
        let len = code.chars().count();
        if len > MAX_CODE_LEN {
            return Err(LanguageCodeError::TooLong {
                len,
                max: MAX_CODE_LEN,
            });
        }
        if let Some(bad) = code
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(LanguageCodeError::InvalidChar(bad));
        }
        Ok(Self(code))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LanguageCode({})", self.0)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = LanguageCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LanguageCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// A language offered for study.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLanguage {
    pub code: &'static str,
    pub label: &'static str,
}

/// Languages offered by the app, in display order.
pub const LANGUAGE_CATALOG: [CatalogLanguage; 14] = [
    CatalogLanguage { code: "hindi", label: "हिंदी (Hindi)" },
    CatalogLanguage { code: "bengali", label: "বাংলা (Bengali)" },
    CatalogLanguage { code: "gujarati", label: "ગુજરાતી (Gujarati)" },
    CatalogLanguage { code: "marathi", label: "मराठी (Marathi)" },
    CatalogLanguage { code: "punjabi", label: "ਪੰਜਾਬੀ (Punjabi)" },
    CatalogLanguage { code: "kannada", label: "ಕನ್ನಡ (Kannada)" },
    CatalogLanguage { code: "tamil", label: "தமிழ் (Tamil)" },
    CatalogLanguage { code: "telugu", label: "తెలుగు (Telugu)" },
    CatalogLanguage { code: "malayalam", label: "മലയാളം (Malayalam)" },
    CatalogLanguage { code: "odia", label: "ଓଡ଼ିଆ (Odia)" },
    CatalogLanguage { code: "assamese", label: "অসমীয়া (Assamese)" },
    CatalogLanguage { code: "urdu", label: "اردو (Urdu)" },
    CatalogLanguage { code: "sanskrit", label: "संस्कृत (Sanskrit)" },
    CatalogLanguage { code: "nepali", label: "नेपाली (Nepali)" },
];

/// Looks up a catalog entry by code.
#[must_use]
pub fn catalog_entry(code: &LanguageCode) -> Option<&'static CatalogLanguage> {
    LANGUAGE_CATALOG.iter().find(|lang| lang.code == code.as_str())
}

//
// ─── LANGUAGE RECORD ───────────────────────────────────────────────────────────
//

/// Whether a language shows up as finished or merely practiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageActivity {
    Completed,
    Studied,
}

/// Per-language progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRecord {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub best_score: u32,
    #[serde(default)]
    pub attempts: u32,
    pub last_studied: DateTime<Utc>,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub correct_answers: u32,
}

impl LanguageRecord {
    /// A language seen for the first time at `now`.
    #[must_use]
    pub fn started(now: DateTime<Utc>) -> Self {
        Self {
            completed: false,
            best_score: 0,
            attempts: 0,
            last_studied: now,
            total_questions: 0,
            correct_answers: 0,
        }
    }

    /// Rough course progress shown in the course list: 5% per quiz attempt.
    #[must_use]
    pub fn course_progress(&self) -> u32 {
        self.attempts.saturating_mul(5).min(100)
    }

    #[must_use]
    pub fn activity(&self) -> LanguageActivity {
        if self.completed {
            LanguageActivity::Completed
        } else {
            LanguageActivity::Studied
        }
    }
}
