//! Field validation for account provisioning and ticket submission.

pub mod credentials;
pub mod ticket;

pub use credentials::{validate_email, validate_password, validate_username};
pub use ticket::validate_new_ticket;

use crate::TravelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UsernameEmpty,
    UsernameTooLong,
    UsernameInvalidFormat,
    PasswordEmpty,
    PasswordTooShort,
    PasswordTooLong,
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    LocationEmpty,
    LocationTooLong,
    PurposeEmpty,
    PurposeTooLong,
    DateRangeInverted,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameEmpty => write!(f, "Username cannot be empty"),
            Self::UsernameTooLong => write!(f, "Username is too long (max 100 characters)"),
            Self::UsernameInvalidFormat => {
                write!(f, "Username may only contain letters, digits, '.', '_', '-'")
            }
            Self::PasswordEmpty => write!(f, "Password cannot be empty"),
            Self::PasswordTooShort => write!(f, "Password must be at least 8 characters"),
            Self::PasswordTooLong => write!(f, "Password is too long (max 128 characters)"),
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::LocationEmpty => write!(f, "Location cannot be empty"),
            Self::LocationTooLong => write!(f, "Location is too long (max 100 characters)"),
            Self::PurposeEmpty => write!(f, "Purpose of travel cannot be empty"),
            Self::PurposeTooLong => {
                write!(f, "Purpose of travel is too long (max 100 characters)")
            }
            Self::DateRangeInverted => write!(f, "End date cannot be before start date"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for TravelError {
    fn from(err: ValidationError) -> Self {
        TravelError::Validation(err.to_string())
    }
}
