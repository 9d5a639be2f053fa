use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

#[allow(clippy::unwrap_used)]
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

#[allow(clippy::unwrap_used)]
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    if username.len() > 100 {
        return Err(ValidationError::UsernameTooLong);
    }
    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::UsernameInvalidFormat);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    if password.len() < 8 {
        return Err(ValidationError::PasswordTooShort);
    }
    if password.len() > 128 {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }
    if email.len() > 254 {
        return Err(ValidationError::EmailTooLong);
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::EmailInvalidFormat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        assert!(validate_username("jane.doe-42").is_ok());
    }

    #[test]
    fn test_invalid_usernames() {
        assert_eq!(validate_username(""), Err(ValidationError::UsernameEmpty));
        assert_eq!(
            validate_username("has space"),
            Err(ValidationError::UsernameInvalidFormat)
        );
        assert_eq!(
            validate_username(&"x".repeat(101)),
            Err(ValidationError::UsernameTooLong)
        );
    }

    #[test]
    fn test_password_bounds() {
        assert!(validate_password("longenough").is_ok());
        assert_eq!(
            validate_password("short"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_password(""), Err(ValidationError::PasswordEmpty));
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("emp@example.com").is_ok());
        assert_eq!(
            validate_email("notanemail"),
            Err(ValidationError::EmailInvalidFormat)
        );
    }
}
