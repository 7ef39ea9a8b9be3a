//! Field-level checks shared by the entity modules.

use crate::errors::ModelError;

/// Require a non-blank value no longer than `max_len` characters.
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    check_len(field, value, max_len)
}

pub fn check_len(field: &str, value: &str, max_len: usize) -> Result<(), ModelError> {
    if value.chars().count() > max_len {
        return Err(ModelError::Validation(format!("{field} must be at most {max_len} characters")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_rejected() {
        let err = require_text("name", "   ", 10).unwrap_err();
        assert_eq!(err.to_string(), "validation error: name is required");
    }

    #[test]
    fn too_long_is_rejected() {
        assert!(require_text("phone", "1234567890123456", 15).is_err());
        assert!(require_text("phone", "123456789012345", 15).is_ok());
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(check_len("name", "Muñoz", 5).is_ok());
    }
}
