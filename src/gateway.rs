//! Timeout-guarded outbound calls.
//!
//! [`call_with_timeout`] races one future against a timer. Whichever settles
//! first decides the result; the loser is dropped. For calls running on the
//! blocking pool this abandons the call logically only: the request finishes
//! on its worker thread and its result is discarded.

use futures::future::{self, Either};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Timeout applied to the address lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(8000);

/// Failure of a timeout-guarded call.
#[derive(Debug, Error)]
pub enum GatewayError<E> {
    /// The timer fired before the call settled
    #[error("ApiTimeoutError: no response within {0:?}")]
    TimedOut(Duration),

    /// The call settled first with its own error
    #[error("{0}")]
    Call(E),
}

impl<E> GatewayError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::TimedOut(_))
    }
}

/// Race `call` against a `timeout` timer.
///
/// If the call settles first its result or error is returned unchanged
/// (errors wrapped in [`GatewayError::Call`]) and the timer is dropped. If the
/// timer fires first the call is dropped and [`GatewayError::TimedOut`] is
/// returned.
pub async fn call_with_timeout<F, T, E>(call: F, timeout: Duration) -> Result<T, GatewayError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    let timer = tokio::time::sleep(timeout);
    futures::pin_mut!(call);
    futures::pin_mut!(timer);

    match future::select(call, timer).await {
        Either::Left((result, _timer)) => result.map_err(GatewayError::Call),
        Either::Right(((), _abandoned)) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Call timed out");
            Err(GatewayError::TimedOut(timeout))
        }
    }
}
