//! JSON codec for the persisted progress document.
//!
//! The document is stored as a single string value. On read it is merged
//! section by section over a default record, so fields added in later
//! versions show up with their defaults while existing data is kept.

use serde_json::{Map, Value};

use crate::repository::StorageError;
use lingo_core::model::UserProgress;

/// Storage key of the progress document.
pub const PROGRESS_KEY: &str = "langbuddy_user_progress";

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Serialize `progress` for storage.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the record cannot be encoded.
pub fn encode_progress(progress: &UserProgress) -> Result<String, StorageError> {
    serde_json::to_string(progress).map_err(ser)
}

/// Parse a stored document, filling anything missing from `defaults`.
///
/// Top-level sections present in the document replace the default section;
/// object sections are merged key by key, with stored keys winning. `null`
/// sections and `null` fields are ignored.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the document is not valid JSON,
/// is not an object, or a merged section does not fit the record shape.
pub fn decode_progress(raw: &str, defaults: &UserProgress) -> Result<UserProgress, StorageError> {
    let stored: Value = serde_json::from_str(raw).map_err(ser)?;
    let Value::Object(stored) = stored else {
        return Err(StorageError::Serialization(
            "progress document is not a JSON object".into(),
        ));
    };

    let mut merged = serde_json::to_value(defaults).map_err(ser)?;
    if let Value::Object(sections) = &mut merged {
        merge_sections(sections, stored);
    }

    serde_json::from_value(merged).map_err(ser)
}

fn merge_sections(sections: &mut Map<String, Value>, stored: Map<String, Value>) {
    for (name, stored_section) in stored {
        if stored_section.is_null() {
            continue;
        }
        let Some(section) = sections.get_mut(&name) else {
            continue;
        };
        match (section, stored_section) {
            (Value::Object(fields), Value::Object(stored_fields)) => {
                let present = stored_fields.into_iter().filter(|(_, value)| !value.is_null());
                fields.extend(present);
            }
            (section, stored_section) => *section = stored_section,
        }
    }
}
