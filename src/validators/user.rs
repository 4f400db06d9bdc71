//! User-related custom validators.

use validator::{ValidateEmail, ValidationError};

use crate::constants::{ERR_INVALID_EMAIL, ERR_INVALID_USERNAME_FORMAT};

/// Username characters: letters, digits, and `@ . + - _`.
pub fn validate_username_format(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if valid {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_username");
    error.message = Some(ERR_INVALID_USERNAME_FORMAT.into());
    Err(error)
}

/// Email may be blank; otherwise it must be a valid address.
pub fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.to_owned().validate_email() {
        return Ok(());
    }
    let mut error = ValidationError::new("email");
    error.message = Some(ERR_INVALID_EMAIL.into());
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_format() {
        assert!(validate_username_format("john.doe+test@example-1_x").is_ok());
        assert!(validate_username_format("zoë").is_ok());
        assert!(validate_username_format("john doe").is_err());
        assert!(validate_username_format("john/doe").is_err());
    }

    #[test]
    fn test_optional_email() {
        assert!(validate_optional_email("").is_ok());
        assert!(validate_optional_email("user@example.com").is_ok());
        assert!(validate_optional_email("user@").is_err());
        assert!(validate_optional_email("plainaddress").is_err());
    }
}
