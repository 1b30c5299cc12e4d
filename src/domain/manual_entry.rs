//! Manually entered address record.

use super::phone::PhoneNumber;
use serde::{Deserialize, Serialize};

/// Address details typed in by the user when the lookup could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntryData {
    pub phone_number: PhoneNumber,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

/// Split a full name on the first space.
///
/// The first token becomes the first name and everything after the first space
/// the last name (empty if there is none).
pub fn split_full_name(full_name: &str) -> (String, String) {
    let full_name = full_name.trim();
    match full_name.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (full_name.to_string(), String::new()),
    }
}
