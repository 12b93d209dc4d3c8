use crate::error::Error;
use crate::records::cloudflare::CLOUDFLARE_API_BASE;
use crate::records::{CloudflareRecords, DynRecordUpdater, InMemoryRecords, DEFAULT_TTL};
use crate::validator::DEFAULT_FRESHNESS_WINDOW;
use ipnetwork::IpNetwork;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

/// Environment variable holding the base64 encoded credential list.
pub const CREDENTIALS_ENV: &str = "AUTH";

/// Environment variable holding the DNS provider API token.
pub const PROVIDER_TOKEN_ENV: &str = "CF_API_TOKEN";

/// Header a trusted proxy uses to pass along the client address, unless configured otherwise.
pub const DEFAULT_CLIENT_IP_HEADER: &str = "cf-connecting-ip";

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_freshness_window")]
    pub freshness_window: Duration,
    #[serde(default = "default_client_ip_header")]
    pub client_ip_header: String,
    /// Networks whose peers may supply the client address through
    /// [`client_ip_header`][Config::client_ip_header]. See [`crate::address`].
    #[serde(default)]
    pub trusted_proxies: Vec<IpNetwork>,
    /// The DNS provider to update. Without one, updates only go to an in-memory record set.
    pub provider: Option<ProviderConfig>,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct ProviderConfig {
    pub zone_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_provider_timeout")]
    pub timeout: Duration,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

fn default_freshness_window() -> Duration {
    DEFAULT_FRESHNESS_WINDOW
}

fn default_client_ip_header() -> String {
    DEFAULT_CLIENT_IP_HEADER.to_string()
}

fn default_api_base() -> String {
    CLOUDFLARE_API_BASE.to_string()
}

fn default_provider_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

impl Config {
    /// Load a [`Config`] from the JSON file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be read, or [`Error::InvalidJSON`] if it isn't
    /// a valid config.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }

    /// Build the record updater for the configured provider. `token` is the provider API
    /// token, required only when a provider is configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnv`] if a provider is configured without a token, or
    /// [`Error::ProviderClient`] if the provider client can't be built.
    pub fn record_updater(&self, token: Option<String>) -> Result<DynRecordUpdater, Error> {
        match &self.provider {
            None => {
                tracing::warn!("no provider configured, updates will not be published");
                Ok(Arc::new(InMemoryRecords::default()))
            }
            Some(provider) => {
                let token = token.ok_or(Error::MissingEnv(PROVIDER_TOKEN_ENV))?;
                Ok(Arc::new(CloudflareRecords::new(
                    &provider.api_base,
                    &provider.zone_id,
                    &token,
                    provider.ttl,
                    provider.timeout,
                )?))
            }
        }
    }
}
