//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest sender or chat identity accepted from a bridge.
pub const MAX_IDENTITY_LENGTH: usize = 256;
/// Longest chat message accepted from a bridge.
pub const MAX_TEXT_LENGTH: usize = 4096;

/// Validates that a sender or chat identity is non-blank, bounded and free of
/// control characters.
///
/// # Examples
///
/// ```ignore
/// validate_identity("33612345678@c.us") // Ok
/// validate_identity("   ")              // Err - blank
/// validate_identity("bob\nalice")       // Err - control character
/// ```
pub fn validate_identity(identity: &str) -> Result<(), ValidationError> {
    if identity.trim().is_empty() {
        let mut err = ValidationError::new("identity_blank");
        err.message = Some("Identity must not be blank".into());
        return Err(err);
    }

    if identity.chars().count() > MAX_IDENTITY_LENGTH {
        let mut err = ValidationError::new("identity_length");
        err.message = Some(
            format!("Identity must be at most {MAX_IDENTITY_LENGTH} characters").into(),
        );
        return Err(err);
    }

    if identity.chars().any(char::is_control) {
        let mut err = ValidationError::new("identity_format");
        err.message = Some("Identity must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a chat message fits in [`MAX_TEXT_LENGTH`] characters.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_TEXT_LENGTH {
        let mut err = ValidationError::new("text_length");
        err.message = Some(format!("Text must be at most {MAX_TEXT_LENGTH} characters").into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identity_valid() {
        assert!(validate_identity("Alice").is_ok());
        assert!(validate_identity("33612345678@c.us").is_ok());
        assert!(validate_identity("Jean Dupont").is_ok());
    }

    #[test]
    fn test_validate_identity_blank() {
        assert!(validate_identity("").is_err());
        assert!(validate_identity("   ").is_err());
    }

    #[test]
    fn test_validate_identity_invalid_format() {
        assert!(validate_identity("bob\nalice").is_err());
        assert!(validate_identity("tab\there").is_err());
        assert!(validate_identity(&"x".repeat(MAX_IDENTITY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_text_length() {
        assert!(validate_text("/padel 12/08 18h").is_ok());
        assert!(validate_text("").is_ok());
        assert!(validate_text(&"é".repeat(MAX_TEXT_LENGTH + 1)).is_err());
    }
}
