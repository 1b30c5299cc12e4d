//! Messages posted to the parent frame.

use crate::domain::{AddressData, ManualEntryData, PhoneNumber};
use serde::{Deserialize, Serialize};

/// Target origin used for every posted message.
pub const TARGET_ORIGIN_ANY: &str = "*";

pub const OPEN_POPUP_TYPE: &str = "deliverease-open-popup";
pub const MANUAL_DATA_TYPE: &str = "deliverease-manual-data";

/// Message sent to the host page. Serialized as `{"type": ..., "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum OutgoingMessage {
    #[serde(rename = "deliverease-open-popup")]
    OpenPopup(OpenPopupPayload),

    #[serde(rename = "deliverease-manual-data")]
    ManualData(ManualEntryData),
}

impl OutgoingMessage {
    /// Wire value of the `type` tag.
    pub fn message_type(&self) -> &'static str {
        match self {
            OutgoingMessage::OpenPopup(_) => OPEN_POPUP_TYPE,
            OutgoingMessage::ManualData(_) => MANUAL_DATA_TYPE,
        }
    }
}

/// Payload of `deliverease-open-popup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPopupPayload {
    pub phone_number: PhoneNumber,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_entry: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OpenPopupPayload {
    /// Popup showing a found address.
    pub fn found(phone_number: PhoneNumber, address: AddressData) -> Self {
        Self {
            phone_number,
            address: Some(address),
            manual_entry: None,
            error: None,
        }
    }

    /// Popup asking the parent to collect the address manually.
    pub fn manual(phone_number: PhoneNumber, error: impl Into<String>) -> Self {
        Self {
            phone_number,
            address: None,
            manual_entry: Some(true),
            error: Some(error.into()),
        }
    }
}

/// What a host actually receives: the message plus the origin it was posted to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedMessage {
    pub target_origin: String,
    pub data: OutgoingMessage,
}
