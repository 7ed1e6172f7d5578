//! Field-level validation shared by the QA and category endpoints.

use crate::error::CoreError;

/// Reject empty or whitespace-only values for a required text field.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Same as [`require_non_blank`], but only when the value is present.
///
/// Used for partial updates where an omitted field means "leave unchanged".
pub fn require_non_blank_if_present(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => require_non_blank(field, v),
        None => Ok(()),
    }
}
