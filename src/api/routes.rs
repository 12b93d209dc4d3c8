use crate::address;
use crate::api::api_error::APIError;
use crate::api::server::AppState;
use crate::error::Rejection;
use anyhow::anyhow;
use axum::body::Bytes;
use axum::error_handling::HandleErrorLayer;
use axum::extract::rejection::BytesRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method};
use axum::routing::any;
use axum::{BoxError, Router};
use std::net::SocketAddr;
use time::OffsetDateTime;
use tower::timeout::error::Elapsed;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/", any(update))
        .route("/*path", any(update))
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(state.config.api_timeout),
        )
        .with_state(state)
}

/// Failures raised by middleware rather than by the handler get the same 401 treatment.
async fn handle_middleware_error(err: BoxError) -> APIError {
    if err.is::<Elapsed>() {
        anyhow!("request timed out").into()
    } else {
        anyhow!("unhandled middleware error: {err}").into()
    }
}

async fn update(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<&'static str, APIError> {
    let client_addr = client_addr.ip();
    if method != Method::POST {
        tracing::debug!("rejected {method} from {client_addr}");
        return Err(Rejection::InvalidRequest.into());
    }
    let body = body.map_err(|err| {
        tracing::debug!("unreadable body from {client_addr}: {err}");
        Rejection::InvalidJSON
    })?;

    let signature = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let authorized = state
        .validator
        .validate(&body, signature, now)
        .map_err(|err| {
            tracing::debug!("rejected update from {client_addr}: {err}");
            err
        })?;
    let request = authorized.request;

    let observed = address::observed(
        client_addr,
        &headers,
        &state.config.client_ip_header,
        &state.config.trusted_proxies,
    );
    let addr = address::for_record(request.addr.as_deref(), observed, request.family)?;
    let record_type = request.family.record_type();

    let outcome = state
        .records
        .upsert(&request.domain, record_type, addr)
        .await
        .map_err(|err| {
            tracing::warn!(
                "update of {record_type} \"{}\" for \"{}\" failed: {err}",
                request.domain,
                request.id
            );
            err
        })?;
    tracing::info!(
        "accepted update from {client_addr} for {record_type} \"{}\" -> {addr} ({outcome:?})",
        request.domain
    );
    Ok("success")
}
