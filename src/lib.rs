//! DDNS Crab
//!
//! A small, self-hosted dynamic DNS update endpoint.
//!
//! Clients `POST` a signed JSON request naming a domain and an address family, and DDNS Crab
//! points the domain's `A` or `AAAA` record at the client's address (or an address given in
//! the request) through the [Cloudflare DNS API][cloudflare-api].
//!
//! Every client holds a credential: an id, a shared secret used to [sign][signature] request
//! bodies with HMAC-SHA256, and a list of [glob patterns][allow] naming the domains it may
//! update. Requests older than the freshness window (five minutes by default) are refused to
//! limit replay.
//!
//! [cloudflare-api]: https://developers.cloudflare.com/api/operations/dns-records-for-a-zone-list-dns-records
//!
#![warn(clippy::pedantic)]

pub mod address;
pub mod allow;
pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod records;
pub mod signature;
pub mod validator;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use credentials::{Credential, CredentialStore};
pub use error::{Error, Rejection};
pub use records::{CloudflareRecords, InMemoryRecords, RecordUpdater};
pub use validator::Validator;
