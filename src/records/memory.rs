use crate::error::Rejection;
use crate::records::{RecordUpdater, Upsert};
use std::collections::HashMap;
use std::net::IpAddr;
use tokio::sync::RwLock;
use trust_dns_proto::rr::RecordType;

/// An in-process record set. Not durable across restarts, and never published anywhere.
#[derive(Default, Debug)]
pub struct InMemoryRecords {
    records: RwLock<HashMap<(String, RecordType), IpAddr>>,
}

impl InMemoryRecords {
    /// Get the current content of the `record_type` record for `name` (if any).
    pub async fn get(&self, name: &str, record_type: RecordType) -> Option<IpAddr> {
        self.records
            .read()
            .await
            .get(&(name.to_string(), record_type))
            .copied()
    }
}

#[async_trait::async_trait]
impl RecordUpdater for InMemoryRecords {
    async fn upsert(
        &self,
        name: &str,
        record_type: RecordType,
        content: IpAddr,
    ) -> Result<Upsert, Rejection> {
        let mut records = self.records.write().await;
        let outcome = match records.insert((name.to_string(), record_type), content) {
            None => Upsert::Created,
            Some(previous) if previous == content => Upsert::Unchanged,
            Some(_) => Upsert::Updated,
        };
        tracing::debug!(record = %name, %record_type, %content, ?outcome, "in-memory upsert");
        Ok(outcome)
    }
}
