use crate::error::AppError;

/// Reject a required text field that is empty after trimming.
pub fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Like [`require_text`], but only when the field was supplied.
pub fn require_text_if_present(value: Option<&str>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) => require_text(v, field),
        None => Ok(()),
    }
}

/// Trim a string and drop it entirely if nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
