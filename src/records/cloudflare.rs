//! A Cloudflare v4 API implementation of the [`RecordUpdater`][super::RecordUpdater] trait.
//!
//! API documentation: <https://developers.cloudflare.com/api/operations/dns-records-for-a-zone-list-dns-records>

use crate::error::{Error, Rejection};
use crate::records::{RecordUpdater, Upsert};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;
use trust_dns_proto::rr::RecordType;

/// Cloudflare v4 API base URL.
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Updates address records in one Cloudflare zone, authenticating with an API bearer token.
#[allow(clippy::module_name_repetitions)]
pub struct CloudflareRecords {
    client: Client,
    api_base: String,
    zone_id: String,
    token: String,
    ttl: u32,
}

#[derive(Deserialize, Debug)]
struct ListResponse {
    result: Option<Vec<DnsRecord>>,
}

#[derive(Deserialize, Debug)]
struct DnsRecord {
    id: String,
    content: String,
}

#[derive(Serialize, Debug)]
struct CreateRecord<'a> {
    content: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    ttl: u32,
}

#[derive(Serialize, Debug)]
struct PatchRecord<'a> {
    content: &'a str,
}

impl DnsRecord {
    fn has_content(&self, content: IpAddr) -> bool {
        self.content
            .parse::<IpAddr>()
            .map_or(false, |existing| existing == content)
    }
}

impl CloudflareRecords {
    /// Create a client for the zone `zone_id` at the API rooted at `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProviderClient`] if the HTTP client can't be built.
    pub fn new(
        api_base: &str,
        zone_id: &str,
        token: &str,
        ttl: u32,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            zone_id: zone_id.to_string(),
            token: token.to_string(),
            ttl,
        })
    }

    fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", self.api_base, self.zone_id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    async fn find_record(
        &self,
        name: &str,
        record_type: &str,
    ) -> Result<Option<DnsRecord>, Rejection> {
        let response = self
            .authorized(self.client.get(self.records_url()))
            .query(&[("name", name), ("type", record_type)])
            .send()
            .await
            .map_err(|err| {
                debug!(%err, "record lookup request failed");
                Rejection::RecordFetchFailure
            })?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "record lookup refused");
            return Err(Rejection::RecordFetchFailure);
        }

        let list: ListResponse = response.json().await.map_err(|err| {
            debug!(%err, "record lookup response unreadable");
            Rejection::RecordFetchFailure
        })?;

        Ok(list.result.unwrap_or_default().into_iter().next())
    }

    async fn create_record(
        &self,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> reqwest::Result<Response> {
        debug!(zone_id = %self.zone_id, record = %name, %record_type, %content, "creating record");
        self.authorized(self.client.post(self.records_url()))
            .json(&CreateRecord {
                content,
                record_type,
                name,
                ttl: self.ttl,
            })
            .send()
            .await
    }

    async fn patch_record(&self, record_id: &str, content: &str) -> reqwest::Result<Response> {
        debug!(zone_id = %self.zone_id, %record_id, %content, "updating record");
        self.authorized(
            self.client
                .patch(format!("{}/{}", self.records_url(), record_id)),
        )
        .json(&PatchRecord { content })
        .send()
        .await
    }
}

#[async_trait::async_trait]
impl RecordUpdater for CloudflareRecords {
    async fn upsert(
        &self,
        name: &str,
        record_type: RecordType,
        content: IpAddr,
    ) -> Result<Upsert, Rejection> {
        let record_type = record_type.to_string();
        let content_str = content.to_string();

        let (response, outcome) = match self.find_record(name, &record_type).await? {
            None => (
                self.create_record(name, &record_type, &content_str).await,
                Upsert::Created,
            ),
            Some(existing) if existing.has_content(content) => {
                debug!(record = %name, %record_type, record_id = %existing.id, "record unchanged");
                return Ok(Upsert::Unchanged);
            }
            Some(existing) => (
                self.patch_record(&existing.id, &content_str).await,
                Upsert::Updated,
            ),
        };

        let response = response.map_err(|err| Rejection::RecordUpdateFailure(err.to_string()))?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Rejection::RecordUpdateFailure(body));
        }
        Ok(outcome)
    }
}

// The API token must never end up in logs.
impl fmt::Debug for CloudflareRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareRecords")
            .field("api_base", &self.api_base)
            .field("zone_id", &self.zone_id)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
