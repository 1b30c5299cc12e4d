//! HTTP client for the address-lookup and delivery-options endpoints.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client maps transport failures and
//! status codes onto [`LookupApiError`] and leaves classification to the caller.

mod async_wrapper;
pub use async_wrapper::{AsyncLookupClient, AsyncLookupClientImpl};

use crate::config::WidgetConfig;
use crate::domain::{AddressData, DeliveryAvailability, PhoneNumber, PostalCode};
use crate::error::{LookupApiError, LookupApiResult};
use crate::i18n::Language;
use crate::metrics::Metrics;
use serde::Serialize;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Socket read/write deadline expiry. Other I/O failures are plain transport errors.
fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

/// Body of the address lookup call.
#[derive(Debug, Clone, Serialize)]
pub struct AddressLookupRequest<'a> {
    pub phone_number: &'a PhoneNumber,
}

/// Body of the delivery availability call.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryAvailabilityRequest<'a> {
    pub postal_code: &'a PostalCode,
    pub language: &'static str,
}

/// HTTP client for the lookup service.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct LookupClient {
    /// Base URL for the lookup service
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl LookupClient {
    /// Create a new LookupClient from configuration.
    pub fn new(config: &WidgetConfig, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build();

        Self {
            base_url: config.api_url.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a LookupClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a POST request with a JSON body.
    fn post<B: Serialize>(&self, path: &str, body: &B) -> LookupApiResult<ureq::Response> {
        let start = Instant::now();
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        self.metrics.record_http_request(duration);
        match &result {
            Ok(response) => {
                tracing::debug!(
                    "POST {} - status {} in {:?}",
                    url,
                    response.status(),
                    duration
                );
            }
            Err(e) => {
                tracing::warn!("POST {} - Error: {}", url, e);
                self.metrics.record_http_error();
            }
        }

        result
    }

    /// Map a ureq error to a LookupApiError.
    fn map_error(&self, error: ureq::Error) -> LookupApiError {
        match error {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                LookupApiError::Status { status, message }
            }
            ureq::Error::Transport(transport) => {
                let timed_out = std::error::Error::source(&transport)
                    .and_then(|source| source.downcast_ref::<io::Error>())
                    .is_some_and(is_timeout);

                match transport.kind() {
                    ureq::ErrorKind::Io | ureq::ErrorKind::ConnectionFailed if timed_out => {
                        LookupApiError::Timeout
                    }
                    ureq::ErrorKind::ConnectionFailed => {
                        LookupApiError::HttpError("Connection failed".to_string())
                    }
                    _ => LookupApiError::HttpError(transport.to_string()),
                }
            }
        }
    }

    /// Read and parse a JSON response body.
    fn read_json<T: serde::de::DeserializeOwned>(response: ureq::Response) -> LookupApiResult<T> {
        let body = response.into_string().map_err(|e| {
            if is_timeout(&e) {
                LookupApiError::Timeout
            } else {
                LookupApiError::HttpError(e.to_string())
            }
        })?;
        serde_json::from_str(&body).map_err(LookupApiError::JsonError)
    }

    /// Look up the address registered for a phone number.
    ///
    /// `POST /addresslookup/address` with `{"phone_number": "<8 digits>"}`.
    /// The response body is returned as-is.
    pub fn lookup_address(&self, phone: &PhoneNumber) -> LookupApiResult<AddressData> {
        let request = AddressLookupRequest {
            phone_number: phone,
        };
        let response = self.post("/addresslookup/address", &request)?;
        Self::read_json(response)
    }

    /// Check which delivery options exist for a postal code.
    ///
    /// `POST /postalcode/check-availability` with `{"postal_code", "language"}`.
    pub fn check_delivery(
        &self,
        postal_code: &PostalCode,
        language: Language,
    ) -> LookupApiResult<DeliveryAvailability> {
        let request = DeliveryAvailabilityRequest {
            postal_code,
            language: language.code(),
        };
        let response = self.post("/postalcode/check-availability", &request)?;
        Self::read_json(response)
    }
}
