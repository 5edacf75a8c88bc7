//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest nickname accepted, in characters.
pub const MAX_NICKNAME_CHARS: usize = 32;

/// Validates that a nickname is not blank and at most [`MAX_NICKNAME_CHARS`] characters long.
///
/// # Examples
///
/// ```ignore
/// validate_nickname("Alice")  // Ok
/// validate_nickname("   ")    // Err - blank
/// ```
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    if nickname.trim().is_empty() {
        let mut err = ValidationError::new("nickname_blank");
        err.message = Some("Nickname must not be blank".into());
        return Err(err);
    }

    let length = nickname.chars().count();
    if length > MAX_NICKNAME_CHARS {
        let mut err = ValidationError::new("nickname_length");
        err.message = Some(
            format!("Nickname must be at most {MAX_NICKNAME_CHARS} characters (got {length})")
                .into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates that a player id was supplied.
pub fn validate_player_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        let mut err = ValidationError::new("player_id_blank");
        err.message = Some("Player ID must not be empty".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_nickname_valid() {
        assert!(validate_nickname("Alice").is_ok());
        assert!(validate_nickname("Zoë the 2nd").is_ok());
        assert!(validate_nickname(&"é".repeat(MAX_NICKNAME_CHARS)).is_ok());
    }

    #[test]
    fn test_validate_nickname_blank() {
        assert!(validate_nickname("").is_err());
        assert!(validate_nickname(" \t ").is_err());
    }

    #[test]
    fn test_validate_nickname_too_long() {
        let err = validate_nickname(&"a".repeat(MAX_NICKNAME_CHARS + 1)).unwrap_err();
        assert_eq!(err.code, "nickname_length");
    }

    #[test]
    fn test_validate_player_id() {
        assert!(validate_player_id("player-1").is_ok());
        assert!(validate_player_id("").is_err());
    }
}
