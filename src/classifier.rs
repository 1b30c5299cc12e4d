//! Classification of a lookup attempt into one terminal outcome.

use crate::domain::AddressData;
use crate::error::LookupApiError;
use crate::gateway::GatewayError;
use crate::i18n;

/// Statuses that mean "busy, try manual entry" rather than "failed".
pub const RATE_LIMIT_STATUSES: [u16; 2] = [429, 503];

/// Terminal outcome of one lookup submission.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// 2xx with a JSON body, forwarded untouched
    Success(AddressData),

    /// 429 or 503: the service asked us to back off
    RateLimited,

    /// The timeout race was lost, or the transport itself timed out
    TimedOut,

    /// Any other non-2xx status
    LookupFailed { status: u16 },

    /// Transport failure or malformed response
    GenericFailure { reason: String },
}

/// Fieldless discriminant of [`LookupOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    RateLimited,
    TimedOut,
    LookupFailed,
    GenericFailure,
}

impl LookupOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            LookupOutcome::Success(_) => OutcomeKind::Success,
            LookupOutcome::RateLimited => OutcomeKind::RateLimited,
            LookupOutcome::TimedOut => OutcomeKind::TimedOut,
            LookupOutcome::LookupFailed { .. } => OutcomeKind::LookupFailed,
            LookupOutcome::GenericFailure { .. } => OutcomeKind::GenericFailure,
        }
    }

    /// Whether this outcome sends the user to manual entry.
    pub fn needs_manual_entry(&self) -> bool {
        !matches!(self, LookupOutcome::Success(_))
    }

    /// Catalog key of the text shown to the user for this outcome.
    pub fn message_key(&self) -> &'static str {
        match self {
            LookupOutcome::Success(_) => i18n::ADDRESS_FOUND,
            LookupOutcome::RateLimited => i18n::RATE_LIMITED_MESSAGE,
            LookupOutcome::TimedOut => i18n::TIMEOUT_ERROR,
            LookupOutcome::LookupFailed { .. } | LookupOutcome::GenericFailure { .. } => {
                i18n::LOOKUP_ERROR
            }
        }
    }
}

/// Map the result of a timeout-guarded lookup onto a terminal outcome.
///
/// Rate limiting is checked before any other error handling so a busy
/// service never surfaces as a failure.
pub fn classify(result: Result<AddressData, GatewayError<LookupApiError>>) -> LookupOutcome {
    match result {
        Ok(address) => LookupOutcome::Success(address),
        Err(GatewayError::TimedOut(_)) => LookupOutcome::TimedOut,
        Err(GatewayError::Call(err)) => classify_api_error(err),
    }
}

fn classify_api_error(err: LookupApiError) -> LookupOutcome {
    match err {
        LookupApiError::Status { status, .. } if RATE_LIMIT_STATUSES.contains(&status) => {
            tracing::info!(status, "Lookup rate limited, routing to manual entry");
            LookupOutcome::RateLimited
        }
        LookupApiError::Status { status, message } => {
            tracing::warn!(status, %message, "Lookup failed");
            LookupOutcome::LookupFailed { status }
        }
        LookupApiError::Timeout => LookupOutcome::TimedOut,
        other => {
            tracing::error!(error = %other, "Lookup failed unexpectedly");
            LookupOutcome::GenericFailure {
                reason: other.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn status(status: u16) -> Result<AddressData, GatewayError<LookupApiError>> {
        Err(GatewayError::Call(LookupApiError::Status {
            status,
            message: String::new(),
        }))
    }

    #[test]
    fn test_rate_limit_statuses() {
        assert_eq!(classify(status(429)), LookupOutcome::RateLimited);
        assert_eq!(classify(status(503)), LookupOutcome::RateLimited);
        assert_eq!(
            classify(status(429)).message_key(),
            i18n::RATE_LIMITED_MESSAGE
        );
    }

    #[test]
    fn test_other_statuses_fail() {
        assert_eq!(
            classify(status(404)),
            LookupOutcome::LookupFailed { status: 404 }
        );
        assert_eq!(
            classify(status(500)),
            LookupOutcome::LookupFailed { status: 500 }
        );
    }

    #[test]
    fn test_timeouts() {
        let gateway_timeout = Err(GatewayError::TimedOut(Duration::from_millis(8000)));
        assert_eq!(classify(gateway_timeout), LookupOutcome::TimedOut);

        let transport_timeout = Err(GatewayError::Call(LookupApiError::Timeout));
        assert_eq!(classify(transport_timeout), LookupOutcome::TimedOut);
        assert_eq!(LookupOutcome::TimedOut.message_key(), i18n::TIMEOUT_ERROR);
    }

    #[test]
    fn test_generic_failures() {
        let transport = Err(GatewayError::Call(LookupApiError::HttpError(
            "Connection failed".to_string(),
        )));
        assert_eq!(classify(transport).kind(), OutcomeKind::GenericFailure);

        let bad_json = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let malformed = Err(GatewayError::Call(LookupApiError::JsonError(bad_json)));
        let outcome = classify(malformed);
        assert_eq!(outcome.kind(), OutcomeKind::GenericFailure);
        assert!(outcome.needs_manual_entry());
    }

    #[test]
    fn test_success_carries_payload_unchanged() {
        let body = json!({"street": "Storgata 1", "postalCode": "0155", "city": "Oslo"});
        let outcome = classify(Ok(AddressData::new(body.clone())));
        match outcome {
            LookupOutcome::Success(data) => assert_eq!(data.as_value(), &body),
            other => panic!("expected success, got {:?}", other),
        }
    }
}
