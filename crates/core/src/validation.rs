//! Field-level helpers shared by the entity drafts and input DTOs.

use validator::ValidationError;

/// `validator` custom rule: the value must contain a non-whitespace character.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Trim a form field, mapping an empty result to `None`.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Re-normalize an already optional field (e.g. one received over the wire).
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(optional_text)
}
