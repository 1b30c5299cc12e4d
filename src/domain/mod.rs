//! Domain value objects and types.
//!
//! Type-safe wrappers for the values the widget sends over the wire: phone
//! numbers, postal codes, the opaque address payload and the manual-entry
//! record. Validation happens at construction time so an invalid phone number
//! can never reach the network.

pub mod address;
pub mod errors;
pub mod manual_entry;
pub mod phone;
pub mod postal_code;

pub use address::{AddressData, AddressInfo, DeliveryAvailability};
pub use errors::ValidationError;
pub use manual_entry::{split_full_name, ManualEntryData};
pub use phone::{is_valid, sanitize, PhoneNumber};
pub use postal_code::PostalCode;
