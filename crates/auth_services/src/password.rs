/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the special-character requirement.
pub const SPECIAL_CHARACTERS: [char; 4] = ['!', '@', '#', '?'];

/// Returns `true` when the password has at least eight characters and contains
/// a lowercase letter, an uppercase letter, a digit and one of `! @ # ?`.
pub fn is_strong_password(password: &str) -> bool {
    let mut has_lower = false;
    let mut has_upper = false;
    let mut has_digit = false;
    let mut has_special = false;

    for c in password.chars() {
        has_lower |= c.is_lowercase();
        has_upper |= c.is_uppercase();
        has_digit |= c.is_numeric();
        has_special |= SPECIAL_CHARACTERS.contains(&c);
    }

    password.chars().count() >= MIN_PASSWORD_LENGTH
        && has_lower
        && has_upper
        && has_digit
        && has_special
}

/// Custom validation function for password strength
pub fn validate_password_strength(password: &str) -> Result<(), validator::ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("weak_password"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_password_meeting_every_rule() {
        assert!(is_strong_password("Abc12345!"));
        assert!(is_strong_password("zZ9?zzzz"));
    }

    #[test]
    fn test_rejects_each_missing_rule() {
        // too short
        assert!(!is_strong_password("Ab1!xyz"));
        // no uppercase
        assert!(!is_strong_password("abc12345!"));
        // no lowercase
        assert!(!is_strong_password("ABC12345!"));
        // no digit
        assert!(!is_strong_password("Abcdefgh!"));
        // no special character
        assert!(!is_strong_password("Abc123456"));
        // special character outside the accepted set
        assert!(!is_strong_password("Abc12345$"));
    }

    #[test]
    fn test_character_classes_are_unicode_aware() {
        // Arabic-Indic digit three counts as a digit
        assert!(is_strong_password("Abcdefg\u{0663}!"));
        assert!(is_strong_password("Ébcdefg1!"));
        assert!(!is_strong_password("Abcdefgh\u{00e9}!"));
    }

    #[test]
    fn test_validator_rule_matches_policy() {
        assert!(validate_password_strength("Abc12345@").is_ok());
        let err = validate_password_strength("password").unwrap_err();
        assert_eq!(err.code, "weak_password");
    }
}
