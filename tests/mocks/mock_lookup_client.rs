use async_trait::async_trait;
use deliverease_widget::domain::DeliveryAvailability;
use deliverease_widget::error::{LookupApiError, LookupApiResult};
use deliverease_widget::{AddressData, AsyncLookupClient, Language, PhoneNumber, PostalCode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock service answers to an address lookup.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 2xx with this JSON body
    Address(serde_json::Value),
    /// Non-2xx status
    Status(u16),
    /// Body that is not JSON
    Malformed,
    /// Connection refused
    Unreachable,
}

/// Mock lookup service for testing.
///
/// Answers every lookup with the configured response after the configured
/// delay, and tracks method calls for verification. The delay uses tokio time
/// so paused-clock tests run instantly.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockLookupClient {
    response: Arc<Mutex<MockResponse>>,
    delay: Arc<Mutex<Duration>>,
    availability: Arc<Mutex<Option<DeliveryAvailability>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    last_language: Arc<Mutex<Option<Language>>>,
}

#[allow(dead_code)]
impl MockLookupClient {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response: Arc::new(Mutex::new(response)),
            delay: Arc::new(Mutex::new(Duration::ZERO)),
            availability: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            last_language: Arc::new(Mutex::new(None)),
        }
    }

    /// Mock that finds a standard Oslo address.
    pub fn found() -> Self {
        Self::new(MockResponse::Address(serde_json::json!({
            "first_name": "Ola",
            "last_name": "Nordmann",
            "address": "Storgata 1",
            "postal_code": "0155",
            "city": "Oslo",
            "customer_type": "private"
        })))
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = delay;
        self
    }

    pub fn with_availability(self, availability: DeliveryAvailability) -> Self {
        *self.availability.lock().unwrap() = Some(availability);
        self
    }

    pub fn set_response(&self, response: MockResponse) {
        *self.response.lock().unwrap() = response;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn last_language(&self) -> Option<Language> {
        *self.last_language.lock().unwrap()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    async fn wait(&self) {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl AsyncLookupClient for MockLookupClient {
    async fn lookup_address(&self, _phone: &PhoneNumber) -> LookupApiResult<AddressData> {
        self.track_call("lookup_address");
        self.wait().await;

        let response = self.response.lock().unwrap().clone();
        match response {
            MockResponse::Address(body) => Ok(AddressData::new(body)),
            MockResponse::Status(status) => Err(LookupApiError::Status {
                status,
                message: format!("status {}", status),
            }),
            MockResponse::Malformed => {
                let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
                Err(LookupApiError::JsonError(err))
            }
            MockResponse::Unreachable => {
                Err(LookupApiError::HttpError("Connection failed".to_string()))
            }
        }
    }

    async fn check_delivery(
        &self,
        _postal_code: &PostalCode,
        language: Language,
    ) -> LookupApiResult<DeliveryAvailability> {
        self.track_call("check_delivery");
        *self.last_language.lock().unwrap() = Some(language);
        self.wait().await;

        self.availability
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| LookupApiError::Status {
                status: 404,
                message: "Postal code not found".to_string(),
            })
    }
}
