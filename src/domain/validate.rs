//! Input validation applied by callers before anything reaches the store.
//!
//! The store itself trusts its input. These helpers turn raw user text into
//! trimmed, non-empty strings and tag lists.

use thiserror::Error;

/// Error returned when raw input fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validates a single string and returns it trimmed.
///
/// `key` names the field in error messages and defaults to `String`.
///
/// # Errors
///
/// Returns `ValidationError` if the input is empty or whitespace-only.
///
/// # Examples
///
/// ```
/// use tagstore::domain::validate_string;
///
/// assert_eq!(validate_string("  post-1 ", Some("contentID")).unwrap(), "post-1");
/// let err = validate_string("   ", Some("contentID")).unwrap_err();
/// assert_eq!(err.message(), "contentID cannot be empty or contain only whitespace");
/// ```
pub fn validate_string(input: &str, key: Option<&str>) -> Result<String, ValidationError> {
    let key = key.unwrap_or("String");

    if input.is_empty() {
        return Err(ValidationError::new(format!("{key} cannot be empty")));
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!(
            "{key} cannot be empty or contain only whitespace"
        )));
    }

    Ok(trimmed.to_string())
}

/// Validates a comma-separated tag list.
///
/// Segments are trimmed, empty segments dropped, and exact duplicates removed
/// keeping first-seen order. Case variants are left for the store to merge.
///
/// # Errors
///
/// Returns `ValidationError` if the input is blank or contains no tags.
pub fn validate_tag_list(input: &str) -> Result<Vec<String>, ValidationError> {
    let input = validate_string(input, Some("tags"))?;

    let mut tags: Vec<String> = Vec::new();
    for segment in input.split(',') {
        let segment = segment.trim();
        if !segment.is_empty() && !tags.iter().any(|t| t == segment) {
            tags.push(segment.to_string());
        }
    }

    if tags.is_empty() {
        return Err(ValidationError::new(
            "tags must be a non-empty list & each tag must be of length > 0",
        ));
    }

    Ok(tags)
}
