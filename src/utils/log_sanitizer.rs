//! Log sanitization utilities for masking personal data.
//!
//! Usernames may contain any Unicode letter, so masking works on characters
//! rather than bytes.

const VISIBLE_CHARS: usize = 3;

fn mask(value: &str) -> String {
    let visible: String = value.chars().take(VISIBLE_CHARS).collect();
    format!("{}***", visible)
}

/// Mask an email address for safe logging.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_email("user@example.com"), "use***@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}@{}", mask(local), domain),
        None if email.is_empty() => String::new(),
        None => mask(email),
    }
}

/// Mask a username for safe logging.
pub fn mask_username(username: &str) -> String {
    mask(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email_normal() {
        assert_eq!(mask_email("user@example.com"), "use***@example.com");
        assert_eq!(mask_email("ab@test.org"), "ab***@test.org");
    }

    #[test]
    fn test_mask_email_blank_or_invalid() {
        assert_eq!(mask_email(""), "");
        assert_eq!(mask_email("notanemail"), "not***");
    }

    #[test]
    fn test_mask_username_multibyte() {
        assert_eq!(mask_username("johndoe"), "joh***");
        assert_eq!(mask_username("zoë_ünal"), "zoë***");
        assert_eq!(mask_username("a"), "a***");
    }
}
