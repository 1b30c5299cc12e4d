//! PhoneNumber value object and the input sanitizer.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}$").expect("Failed to compile phone number regex"));

/// Strip every character that is not an ASCII decimal digit.
///
/// This is applied to every input and paste event before the value is shown
/// back to the user, so the field never holds anything but digits.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns true iff `digits` is exactly 8 decimal digits.
pub fn is_valid(digits: &str) -> bool {
    PHONE_REGEX.is_match(digits)
}

/// A Norwegian phone number: exactly 8 digits, nothing else.
///
/// # Example
///
/// ```
/// use deliverease_widget::domain::PhoneNumber;
///
/// let phone = PhoneNumber::parse("912 34 567").unwrap();
/// assert_eq!(phone.as_str(), "91234567");
///
/// // Country prefix makes it 10 digits
/// assert!(PhoneNumber::parse("+47 912 34 567").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a PhoneNumber from an already sanitized digit string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` unless the input is exactly 8 digits.
    pub fn new(digits: impl Into<String>) -> Result<Self, ValidationError> {
        let digits = digits.into();

        if !is_valid(&digits) {
            return Err(ValidationError::InvalidPhone(digits));
        }

        Ok(Self(digits))
    }

    /// Sanitize raw user input, then validate it.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::new(sanitize(raw))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
