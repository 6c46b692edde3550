//! Validation Utilities

use validator::{Validate, ValidationErrors};

use super::error::AppError;

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                )
            })
        })
        .collect();
    fields.sort();

    let message = fields
        .first()
        .map(|(field, message)| format!("{}: {}", field, message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}

/// Reject an absent (zero) identifier.
pub fn require_id(value: i64, field: &str) -> Result<i64, AppError> {
    if value == 0 {
        return Err(AppError::InvalidArgument(format!("{} is required", field)));
    }
    Ok(value)
}

/// Reject an absent (empty or blank) string.
pub fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidArgument(format!("{} is required", field)));
    }
    Ok(value)
}

/// Run `validator` rules on a request body.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(validation_error)
}
