//! Error types.

use base64::DecodeError;

/// Error enumerates the DDNS Crab startup and configuration error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a required environment variable (e.g. the credential blob, or the
    /// provider API token) is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// Returned when the credential blob is not valid base64.
    #[error("credentials are not valid base64: {0}")]
    InvalidCredentialEncoding(#[from] DecodeError),

    /// Returned when the decoded credential blob is not a JSON array of
    /// `{id, token, allowed}` records.
    #[error("credentials are not a valid JSON record list: {0}")]
    InvalidCredentials(#[source] serde_json::Error),

    /// Returned when the HTTP client for the DNS provider can't be constructed.
    #[error("unable to build provider HTTP client")]
    ProviderClient(#[from] reqwest::Error),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file] fails
    /// due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}

/// Rejection enumerates every way a single update request can fail.
///
/// The [`Display`][std::fmt::Display] form of each variant is the code written to the
/// HTTP response body. These codes are the ones deployed clients already understand, so
/// they don't follow the variant names.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The request used a method other than `POST`.
    #[error("invalid_request")]
    InvalidRequest,

    /// The body isn't a JSON object with correctly typed fields.
    #[error("invalid_json")]
    InvalidJSON,

    /// The body `id` doesn't name a known credential.
    #[error("invalid_uid")]
    UnknownToken,

    /// The `Authorization` header or the body `type` is absent.
    #[error("missing_fields")]
    MissingFields,

    /// The body `type` is neither `ipv4` nor `ipv6`.
    #[error("malformed_object")]
    MalformedType,

    /// The `Authorization` header isn't a valid HMAC of the body for the credential.
    #[error("sign_failure")]
    SignatureMismatch,

    /// The body `domain` matches none of the credential's allowed patterns.
    #[error("subdomain_not_allowed")]
    DomainNotAllowed,

    /// The body `timestamp` is in the future or older than the freshness window.
    #[error("timeout")]
    StaleOrFutureTimestamp,

    /// No address of the requested family is available for the record.
    #[error("invalid_type")]
    InvalidRecordType,

    /// Looking up the existing record at the provider failed.
    #[error("fetch_record_failure")]
    RecordFetchFailure,

    /// Creating or updating the record at the provider failed. Carries the provider's
    /// error text.
    #[error("{0}")]
    RecordUpdateFailure(String),
}
