//! Address payloads returned by the lookup service.

use super::postal_code::PostalCode;
use serde::{Deserialize, Serialize};

/// Address payload returned by the lookup endpoint.
///
/// The shape is owned by the lookup service, so the widget keeps the raw JSON
/// and forwards it untouched. Use [`AddressData::info`] for a typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressData(serde_json::Value);

impl AddressData {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Best-effort typed view of the payload. Unknown or mistyped fields are
    /// left as `None`.
    pub fn info(&self) -> AddressInfo {
        serde_json::from_value(self.0.clone()).unwrap_or_default()
    }
}

/// Typed view of the fields the lookup service normally returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressInfo {
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,

    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,

    #[serde(default, alias = "street")]
    pub address: Option<String>,

    #[serde(default, alias = "postalCode")]
    pub postal_code: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default, alias = "customerType")]
    pub customer_type: Option<String>,
}

impl AddressInfo {
    /// The postal code, if present and well-formed.
    pub fn postal_code(&self) -> Option<PostalCode> {
        self.postal_code
            .as_deref()
            .and_then(|code| PostalCode::new(code).ok())
    }

    /// First and last name joined by a space, skipping empty parts.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Delivery availability for one postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAvailability {
    pub serviceable: bool,

    #[serde(default)]
    pub delivery_options: Vec<String>,

    #[serde(default)]
    pub message: Option<String>,
}
