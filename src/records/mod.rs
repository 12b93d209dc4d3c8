//! Address record updates at the DNS hosting provider.
//!
//! An update is a single read-then-write: look up the record by name and type, then create
//! it if it's absent, change it if its content differs, or leave it alone. Nothing is retried
//! and nothing is cached between requests.
//!
//! Two implementations are provided, [`cloudflare::CloudflareRecords`] and
//! [`memory::InMemoryRecords`]. The former talks to the Cloudflare v4 API. The latter keeps
//! records in process memory and is used for dry runs when no provider is configured.

use crate::error::Rejection;
use std::net::IpAddr;
use std::sync::Arc;
use trust_dns_proto::rr::RecordType;

pub mod cloudflare;
#[cfg(test)]
pub(crate) mod fake;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use cloudflare::CloudflareRecords;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryRecords;

/// Record TTL used when creating records. For Cloudflare, 1 means "automatic".
pub const DEFAULT_TTL: u32 = 1;

/// `DynRecordUpdater` is a type alias for a [`RecordUpdater`] shared between request handlers.
#[allow(clippy::module_name_repetitions)]
pub type DynRecordUpdater = Arc<dyn RecordUpdater + Send + Sync>;

/// What an [`RecordUpdater::upsert`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
    Unchanged,
}

/// An async trait describing the create-or-update of a single address record.
#[async_trait::async_trait]
pub trait RecordUpdater {
    /// Make the `record_type` record for `name` point at `content`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::RecordFetchFailure`] if the existing record can't be looked up,
    /// and [`Rejection::RecordUpdateFailure`] if the create or update is refused.
    async fn upsert(
        &self,
        name: &str,
        record_type: RecordType,
        content: IpAddr,
    ) -> Result<Upsert, Rejection>;
}
