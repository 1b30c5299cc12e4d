//! Manual address entry modal.
//!
//! Lifecycle: `Closed -> Open -> (Submitted | Cancelled) -> Closed`. Nothing
//! entered survives closing the modal; there are no drafts.

use crate::bridge::LocalUi;
use crate::domain::{split_full_name, ManualEntryData, PhoneNumber};
use crate::error::ManualEntryError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Editable fields of the modal. The phone number is prefilled and read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    FullName,
    Address,
    PostalCode,
    City,
}

impl ManualField {
    pub const ALL: [ManualField; 4] = [
        ManualField::FullName,
        ManualField::Address,
        ManualField::PostalCode,
        ManualField::City,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ManualField::FullName => "fullName",
            ManualField::Address => "address",
            ManualField::PostalCode => "postalCode",
            ManualField::City => "city",
        }
    }
}

/// Contents of an open modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntryForm {
    phone: PhoneNumber,
    advisory: Option<String>,
    pub full_name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

impl ManualEntryForm {
    fn new(phone: PhoneNumber, advisory: Option<String>) -> Self {
        Self {
            phone,
            advisory,
            full_name: String::new(),
            address: String::new(),
            postal_code: String::new(),
            city: String::new(),
        }
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Why the modal was opened, if it was opened by a failed lookup.
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn field(&self, field: ManualField) -> &str {
        match field {
            ManualField::FullName => &self.full_name,
            ManualField::Address => &self.address,
            ManualField::PostalCode => &self.postal_code,
            ManualField::City => &self.city,
        }
    }

    fn field_mut(&mut self, field: ManualField) -> &mut String {
        match field {
            ManualField::FullName => &mut self.full_name,
            ManualField::Address => &mut self.address,
            ManualField::PostalCode => &mut self.postal_code,
            ManualField::City => &mut self.city,
        }
    }

    pub fn is_empty(&self) -> bool {
        ManualField::ALL.iter().all(|f| self.field(*f).is_empty())
    }

    /// Require every field, then build the record.
    fn to_data(&self) -> Result<ManualEntryData, ManualEntryError> {
        if let Some(missing) = ManualField::ALL
            .iter()
            .find(|f| self.field(**f).trim().is_empty())
        {
            return Err(ManualEntryError::MissingField(missing.name()));
        }

        let (first_name, last_name) = split_full_name(&self.full_name);
        Ok(ManualEntryData {
            phone_number: self.phone.clone(),
            first_name,
            last_name,
            address: self.address.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            city: self.city.trim().to_string(),
        })
    }
}

#[derive(Debug)]
enum ModalState {
    Closed,
    Open(ManualEntryForm),
}

/// The manual-entry modal of one widget instance.
pub struct ManualEntryModal {
    state: Mutex<ModalState>,
    ui: Arc<dyn LocalUi>,
}

impl ManualEntryModal {
    pub fn new(ui: Arc<dyn LocalUi>) -> Self {
        Self {
            state: Mutex::new(ModalState::Closed),
            ui,
        }
    }

    fn state(&self) -> MutexGuard<'_, ModalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open with empty fields. Reopening discards whatever was typed.
    pub fn open(&self, phone: PhoneNumber, advisory: Option<String>) {
        let form = ManualEntryForm::new(phone, advisory);
        tracing::debug!(phone = %form.phone(), "Opening manual entry");
        self.ui.show_manual_entry(&form);
        *self.state() = ModalState::Open(form);
    }

    pub fn is_open(&self) -> bool {
        matches!(*self.state(), ModalState::Open(_))
    }

    /// Snapshot of the open form.
    pub fn form(&self) -> Option<ManualEntryForm> {
        match &*self.state() {
            ModalState::Open(form) => Some(form.clone()),
            ModalState::Closed => None,
        }
    }

    pub fn set_field(&self, field: ManualField, value: &str) -> Result<(), ManualEntryError> {
        match &mut *self.state() {
            ModalState::Open(form) => {
                *form.field_mut(field) = value.to_string();
                Ok(())
            }
            ModalState::Closed => Err(ManualEntryError::NotOpen),
        }
    }

    /// Discard the form and close.
    pub fn cancel(&self) -> Result<(), ManualEntryError> {
        let mut state = self.state();
        if let ModalState::Closed = *state {
            return Err(ManualEntryError::NotOpen);
        }
        *state = ModalState::Closed;
        drop(state);

        self.ui.hide_manual_entry();
        Ok(())
    }

    /// Validate, close and return the entered data.
    ///
    /// On a missing field the modal stays open with its contents intact.
    pub fn submit(&self) -> Result<ManualEntryData, ManualEntryError> {
        let mut state = self.state();
        let data = match &*state {
            ModalState::Open(form) => form.to_data()?,
            ModalState::Closed => return Err(ManualEntryError::NotOpen),
        };
        *state = ModalState::Closed;
        drop(state);

        self.ui.hide_manual_entry();
        Ok(data)
    }
}
