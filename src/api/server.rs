use crate::api::routes;
use crate::config::SharedConfig;
use crate::credentials::SharedCredentials;
use crate::records::DynRecordUpdater;
use crate::validator::Validator;
use std::future::Future;
use std::net::SocketAddr;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub validator: Validator,
    pub records: DynRecordUpdater,
}

impl AppState {
    pub(super) fn new(
        config: SharedConfig,
        credentials: SharedCredentials,
        records: DynRecordUpdater,
    ) -> Self {
        let validator = Validator::new(credentials, config.freshness_window);
        Self {
            config,
            validator,
            records,
        }
    }
}

/// Build the API server future for `config.api_bind_addr`.
///
/// # Panics
///
/// Panics if the bind address can't be bound.
pub fn new(
    config: SharedConfig,
    credentials: SharedCredentials,
    records: DynRecordUpdater,
) -> impl Future<Output = hyper::Result<()>> {
    let bind_addr = config.api_bind_addr;
    axum::Server::bind(&bind_addr).serve(
        routes::new(AppState::new(config, credentials, records))
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
}
