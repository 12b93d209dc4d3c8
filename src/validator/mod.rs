//! Update request authentication.
//!
//! A request is authorized by running the checks below in order. The first failing check
//! decides the [`Rejection`], and nothing after it runs:
//!
//! 1. the body is a JSON object ([`Rejection::InvalidJSON`]),
//! 2. its `id` names a known credential ([`Rejection::UnknownToken`]),
//! 3. the signature header and the `type` field are present and not blank
//!    ([`Rejection::MissingFields`]),
//! 4. `type` is `ipv4` or `ipv6` ([`Rejection::MalformedType`]),
//! 5. the signature is the credential's HMAC of the raw body ([`Rejection::SignatureMismatch`]),
//! 6. `domain` matches the credential's allow-list ([`Rejection::DomainNotAllowed`]),
//! 7. `timestamp` is not in the future and not older than the freshness window
//!    ([`Rejection::StaleOrFutureTimestamp`]).
//!
//! The structural checks run before any HMAC is computed.

mod model;

pub use model::{AddressFamily, UpdateRecordRequest, UpdateRequest};

use crate::allow;
use crate::credentials::{Credential, SharedCredentials};
use crate::error::Rejection;
use crate::signature;
use serde_json::Number;
use std::time::Duration;

/// Default maximum age of a request timestamp.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(300);

/// An update request that passed every check, paired with the credential that authorized it.
#[derive(Debug)]
pub struct Authorized<'a> {
    pub request: UpdateRequest,
    pub credential: &'a Credential,
}

#[derive(Debug, Clone)]
pub struct Validator {
    credentials: SharedCredentials,
    window: Duration,
}

impl Validator {
    #[must_use]
    pub fn new(credentials: SharedCredentials, window: Duration) -> Self {
        Self {
            credentials,
            window,
        }
    }

    /// Authenticate and authorize the raw request `body` given the `signature` header value
    /// and the current unix time `now`.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] of the first check that fails.
    pub fn validate(
        &self,
        body: &[u8],
        signature: Option<&str>,
        now: i64,
    ) -> Result<Authorized<'_>, Rejection> {
        let parsed = UpdateRecordRequest::parse(body).map_err(|_| Rejection::InvalidJSON)?;

        let credential = parsed
            .id()
            .and_then(|id| self.credentials.lookup(id))
            .ok_or(Rejection::UnknownToken)?;

        let signature = signature.filter(|signature| !signature.is_empty());
        let (Some(signature), Some(kind)) = (signature, parsed.kind()) else {
            return Err(Rejection::MissingFields);
        };

        let family: AddressFamily = kind
            .as_str()
            .and_then(|kind| kind.parse().ok())
            .ok_or(Rejection::MalformedType)?;

        if !signature::verify(credential.secret(), signature, body) {
            return Err(Rejection::SignatureMismatch);
        }

        let domain = match parsed.domain() {
            Some(domain) if allow::matches(&credential.allowed, domain) => domain.to_string(),
            _ => return Err(Rejection::DomainNotAllowed),
        };

        let timestamp = parsed
            .timestamp()
            .and_then(|ts| self.fresh(ts, now))
            .ok_or(Rejection::StaleOrFutureTimestamp)?;

        Ok(Authorized {
            request: UpdateRequest {
                id: credential.id.clone(),
                domain,
                addr: parsed.addr(),
                family,
                timestamp,
            },
            credential,
        })
    }

    /// The timestamp as whole seconds, if it lies within the window ending at `now`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn fresh(&self, timestamp: &Number, now: i64) -> Option<i64> {
        let window = i64::try_from(self.window.as_secs()).unwrap_or(i64::MAX);
        if let Some(ts) = timestamp.as_i64() {
            return (ts <= now && now.saturating_sub(ts) <= window).then_some(ts);
        }
        let ts = timestamp.as_f64()?;
        let (now, window) = (now as f64, window as f64);
        (ts <= now && now - ts <= window).then(|| ts.floor() as i64)
    }
}
