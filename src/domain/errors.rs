//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The phone number is not exactly 8 digits after sanitization.
    InvalidPhone(String),

    /// The postal code is not exactly 4 digits.
    InvalidPostalCode(String),

    /// The language code is not one of the supported ones.
    UnsupportedLanguage(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPhone(phone) => {
                write!(f, "Invalid phone number (expected 8 digits): {}", phone)
            }
            Self::InvalidPostalCode(code) => {
                write!(f, "Invalid postal code (expected 4 digits): {}", code)
            }
            Self::UnsupportedLanguage(lang) => write!(f, "Unsupported language: {}", lang),
        }
    }
}

impl std::error::Error for ValidationError {}
