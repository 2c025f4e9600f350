use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VocabError {
    #[error("vocabulary word cannot be empty")]
    EmptyWord,

    #[error("vocabulary meaning cannot be empty")]
    EmptyMeaning,
}

/// One word of a language's vocabulary list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawVocabEntry")]
pub struct VocabEntry {
    word: String,
    meaning: String,
    pronunciation: String,
}

#[derive(Deserialize)]
struct RawVocabEntry {
    word: String,
    meaning: String,
    #[serde(default)]
    pronunciation: String,
}

impl TryFrom<RawVocabEntry> for VocabEntry {
    type Error = VocabError;

    fn try_from(raw: RawVocabEntry) -> Result<Self, Self::Error> {
        Self::new(raw.word, raw.meaning, raw.pronunciation)
    }
}

impl VocabEntry {
    /// Creates a vocabulary entry; surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `VocabError` if `word` or `meaning` is empty.
    pub fn new(
        word: impl Into<String>,
        meaning: impl Into<String>,
        pronunciation: impl Into<String>,
    ) -> Result<Self, VocabError> {
        let word = word.into().trim().to_owned();
        let meaning = meaning.into().trim().to_owned();
        if word.is_empty() {
            return Err(VocabError::EmptyWord);
        }
        if meaning.is_empty() {
            return Err(VocabError::EmptyMeaning);
        }
        Ok(Self {
            word,
            meaning,
            pronunciation: pronunciation.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    #[must_use]
    pub fn pronunciation(&self) -> &str {
        &self.pronunciation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_fields() {
        let entry = VocabEntry::new(" पानी ", " water ", " paani ").unwrap();
        assert_eq!(entry.word(), "पानी");
        assert_eq!(entry.meaning(), "water");
        assert_eq!(entry.pronunciation(), "paani");
    }

    #[test]
    fn rejects_blank_word_or_meaning() {
        assert_eq!(VocabEntry::new("  ", "water", ""), Err(VocabError::EmptyWord));
        assert_eq!(VocabEntry::new("पानी", "", ""), Err(VocabError::EmptyMeaning));
    }

    #[test]
    fn deserializes_through_validation() {
        let entry: VocabEntry =
            serde_json::from_str(r#"{"word":"दोस्त","meaning":"friend","pronunciation":"dost"}"#)
                .unwrap();
        assert_eq!(entry.meaning(), "friend");

        let err = serde_json::from_str::<VocabEntry>(r#"{"word":"","meaning":"friend"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("word cannot be empty"));
    }
}
