//! Async wrapper around the synchronous LookupClient.
//!
//! This module provides an async interface to the synchronous LookupClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.
//!
//! Dropping one of these futures (for example when the lookup timeout fires)
//! detaches the blocking task: the HTTP call still finishes on its worker
//! thread, but nobody observes the result.

use crate::client::LookupClient;
use crate::domain::{AddressData, DeliveryAvailability, PhoneNumber, PostalCode};
use crate::error::{LookupApiError, LookupApiResult};
use crate::i18n::Language;
use async_trait::async_trait;
use std::sync::Arc;

/// Async lookup operations used by the widget controller.
#[async_trait]
pub trait AsyncLookupClient: Send + Sync {
    async fn lookup_address(&self, phone: &PhoneNumber) -> LookupApiResult<AddressData>;

    async fn check_delivery(
        &self,
        postal_code: &PostalCode,
        language: Language,
    ) -> LookupApiResult<DeliveryAvailability>;
}

/// Async wrapper around synchronous LookupClient.
#[derive(Clone)]
pub struct AsyncLookupClientImpl {
    client: Arc<LookupClient>,
}

impl AsyncLookupClientImpl {
    pub fn new(client: LookupClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncLookupClient for AsyncLookupClientImpl {
    async fn lookup_address(&self, phone: &PhoneNumber) -> LookupApiResult<AddressData> {
        let client = self.client.clone();
        let phone = phone.clone();

        tokio::task::spawn_blocking(move || client.lookup_address(&phone))
            .await
            .map_err(|e| LookupApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn check_delivery(
        &self,
        postal_code: &PostalCode,
        language: Language,
    ) -> LookupApiResult<DeliveryAvailability> {
        let client = self.client.clone();
        let postal_code = postal_code.clone();

        tokio::task::spawn_blocking(move || client.check_delivery(&postal_code, language))
            .await
            .map_err(|e| LookupApiError::HttpError(format!("Task join error: {}", e)))?
    }
}
