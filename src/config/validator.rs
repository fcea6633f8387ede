//! Whitelist validation for manifest entries
//!
//! Entries are checked after parsing and before they reach the registry:
//! - Ids: ASCII alphanumerics, `_` and `-`
//! - Keys: a single printable character or a known named key
//! - Gestures: only the direction letters `l`, `r`, `u`, `d`
//!
//! Unknown named keys are rejected rather than passed through, since a
//! misspelt key name would otherwise register a chord no event can hash to.

use thiserror::Error;

use crate::config::ShortcutEntry;

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Id is empty or contains characters outside the whitelist
    #[error("Invalid shortcut id '{0}'")]
    InvalidId(String),

    /// Display name is empty or contains control characters
    #[error("Invalid display name '{0}'")]
    InvalidName(String),

    /// Key is neither a single character nor a known key name
    #[error("Invalid key name '{0}'")]
    InvalidKey(String),

    /// Gesture path is empty or contains non-direction letters
    #[error("Invalid gesture path '{0}': only l, r, u, d are allowed")]
    InvalidGesture(String),
}

/// Named keys as reported by the event source.
const NAMED_KEYS: &[&str] = &[
    "Enter",
    "Tab",
    "Escape",
    "Backspace",
    "Delete",
    "Insert",
    "Home",
    "End",
    "PageUp",
    "PageDown",
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "F1",
    "F2",
    "F3",
    "F4",
    "F5",
    "F6",
    "F7",
    "F8",
    "F9",
    "F10",
    "F11",
    "F12",
];

const MAX_ID_LEN: usize = 64;

pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id.to_string()))
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() || name.chars().any(char::is_control) {
        Err(ValidationError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Validates key name format
///
/// Named keys are matched case-insensitively, mirroring the codec.
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    let mut chars = key.chars();
    let single_printable = matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if !c.is_whitespace() && !c.is_control()
    );
    let named = NAMED_KEYS.iter().any(|named| named.eq_ignore_ascii_case(key));

    if single_printable || named {
        Ok(())
    } else {
        Err(ValidationError::InvalidKey(key.to_string()))
    }
}

pub fn validate_gesture(path: &str) -> Result<(), ValidationError> {
    if !path.is_empty() && path.chars().all(|c| matches!(c, 'l' | 'r' | 'u' | 'd')) {
        Ok(())
    } else {
        Err(ValidationError::InvalidGesture(path.to_string()))
    }
}

/// Validates a complete entry
///
/// Performs all checks in declaration order and stops at the first failure.
pub fn validate_entry(entry: &ShortcutEntry) -> Result<(), ValidationError> {
    validate_id(&entry.id)?;
    validate_name(&entry.name)?;

    if let Some(chord) = &entry.chord {
        validate_key(&chord.key)?;
    }

    for gesture in &entry.gestures {
        validate_gesture(gesture)?;
    }

    Ok(())
}
