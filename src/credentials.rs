//! Per-client credentials.
//!
//! Credentials are supplied out-of-band as one base64 encoded JSON array, e.g.
//!
//! ```json
//! [
//!   { "id": "home-router", "token": "s3cret", "allowed": ["home.example.com"] },
//!   { "id": "lab", "token": "an0ther", "allowed": ["*.lab.example.com"] }
//! ]
//! ```
//!
//! The store is decoded once at startup and never changes afterwards. To pick up new
//! credentials, construct a new store.

use crate::error::Error;
use crate::signature::BASE64_ENGINE;
use base64::Engine;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// `SharedCredentials` is a type alias for a [`CredentialStore`] shared read-only between
/// request handlers.
pub type SharedCredentials = Arc<CredentialStore>;

/// A single client's identity, shared secret, and domain allow-list.
#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: String,
    token: String,
    pub allowed: Vec<String>,
}

impl Credential {
    #[must_use]
    pub fn new(id: impl Into<String>, token: impl Into<String>, allowed: Vec<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            allowed,
        }
    }

    /// The HMAC key for this credential.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        self.token.as_bytes()
    }
}

// The token must never end up in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .field("allowed", &self.allowed)
            .finish()
    }
}

/// An immutable, ordered collection of [`Credential`]s.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    credentials: Vec<Credential>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// Decode a store from a base64 encoded JSON array of credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentialEncoding`] if `blob` isn't base64.
    ///
    /// Returns [`Error::InvalidCredentials`] if the decoded content isn't a JSON array of
    /// records that each have an `id`, `token` and `allowed` list.
    pub fn from_base64(blob: &str) -> Result<Self, Error> {
        let raw = BASE64_ENGINE.decode(blob.trim())?;
        let credentials: Vec<Credential> =
            serde_json::from_slice(&raw).map_err(Error::InvalidCredentials)?;
        Ok(Self::new(credentials))
    }

    /// Decode a store from the base64 blob held in the environment variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnv`] if `var` isn't set, otherwise as
    /// [`CredentialStore::from_base64`].
    pub fn from_env(var: &'static str) -> Result<Self, Error> {
        let blob = std::env::var(var).map_err(|_| Error::MissingEnv(var))?;
        Self::from_base64(&blob)
    }

    /// Find the credential for `id`. If more than one credential has the same id the first
    /// one wins.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
