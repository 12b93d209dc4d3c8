use anyhow::{bail, Context, Result};
use ddnscrab::config::{CREDENTIALS_ENV, PROVIDER_TOKEN_ENV};
use ddnscrab::credentials::SharedCredentials;
use ddnscrab::records::DynRecordUpdater;
use ddnscrab::{Config, CredentialStore, SharedConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "ddnscrab=info";

/// Everything the API server needs, loaded before anything is bound.
struct Startup {
    config: SharedConfig,
    credentials: SharedCredentials,
    records: DynRecordUpdater,
}

impl Startup {
    fn load(config_path: PathBuf) -> Result<Self> {
        let config = Config::try_from_file(&config_path)
            .with_context(|| format!("loading config {}", config_path.display()))?;
        let credentials = CredentialStore::from_env(CREDENTIALS_ENV)
            .with_context(|| format!("loading credentials from ${CREDENTIALS_ENV}"))?;
        if credentials.is_empty() {
            tracing::warn!("${CREDENTIALS_ENV} is empty, every update will be rejected");
        }
        let records = config.record_updater(std::env::var(PROVIDER_TOKEN_ENV).ok())?;

        Ok(Self {
            config: Arc::new(config),
            credentials: Arc::new(credentials),
            records,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let mut args = std::env::args_os();
    let program = args
        .next()
        .map_or_else(|| "ddnscrab".into(), |arg| arg.to_string_lossy().into_owned());
    let Some(config_path) = args.next().map(PathBuf::from) else {
        bail!("usage: {program} /path/to/config.json");
    };

    let Startup {
        config,
        credentials,
        records,
    } = Startup::load(config_path)?;
    tracing::info!(
        bind_addr = %config.api_bind_addr,
        credentials = credentials.len(),
        "serving update API"
    );
    let server = tokio::spawn(ddnscrab::new_http(config, credentials, records));

    tokio::select! {
        _ = signal::ctrl_c() => tracing::info!("interrupted, shutting down"),
        joined = server => joined.context("API server task failed")??,
    }
    Ok(())
}
