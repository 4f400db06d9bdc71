//! Common validation utilities and helpers.

use validator::ValidationErrors;

use crate::constants::CODE_VALIDATION_FAILED;
use crate::errors::ApiError;

/// Convert validator errors to ApiError::ValidationError.
///
/// Each failure becomes a `"field: message"` entry, ordered by field name so
/// responses are deterministic.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut fields: Vec<_> = e.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let errors: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    ApiError::validation(CODE_VALIDATION_FAILED, errors)
}
