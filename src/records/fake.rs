//! A local fake of the parts of the Cloudflare record API used by
//! [`CloudflareRecords`][super::CloudflareRecords].

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

pub(crate) const ZONE: &str = "zone123";
pub(crate) const TOKEN: &str = "cf-test-token";

pub(crate) const WRITE_ERROR: &str = r#"{"success":false,"errors":[{"code":9005}]}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FakeRecord {
    pub id: String,
    pub name: String,
    pub record_type: String,
    pub content: String,
    pub ttl: u64,
}

#[derive(Default, Debug)]
pub(crate) struct FakeZone {
    pub records: Vec<FakeRecord>,
    pub lookups: usize,
    pub writes: Vec<(&'static str, Value)>,
    pub fail_write: bool,
}

pub(crate) type SharedZone = Arc<Mutex<FakeZone>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == format!("Bearer {TOKEN}"))
}

async fn list(
    State(zone): State<SharedZone>,
    Path(zone_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut zone = zone.lock().unwrap();
    zone.lookups += 1;
    if zone_id != ZONE || !authorized(&headers) {
        return (StatusCode::FORBIDDEN, "forbidden").into_response();
    }
    let result: Vec<Value> = zone
        .records
        .iter()
        .filter(|r| Some(&r.name) == query.get("name") && Some(&r.record_type) == query.get("type"))
        .map(|r| {
            json!({
                "id": r.id,
                "name": r.name,
                "type": r.record_type,
                "content": r.content,
                "ttl": r.ttl,
            })
        })
        .collect();
    Json(json!({"success": true, "result": result})).into_response()
}

async fn create(
    State(zone): State<SharedZone>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut zone = zone.lock().unwrap();
    zone.writes.push(("POST", body.clone()));
    if zone.fail_write || !authorized(&headers) {
        return (StatusCode::BAD_REQUEST, WRITE_ERROR).into_response();
    }
    let id = format!("rec{}", zone.records.len() + 1);
    zone.records.push(FakeRecord {
        id: id.clone(),
        name: body["name"].as_str().unwrap_or_default().to_string(),
        record_type: body["type"].as_str().unwrap_or_default().to_string(),
        content: body["content"].as_str().unwrap_or_default().to_string(),
        ttl: body["ttl"].as_u64().unwrap_or_default(),
    });
    Json(json!({"success": true, "result": {"id": id}})).into_response()
}

async fn update(
    State(zone): State<SharedZone>,
    Path((_, record_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut zone = zone.lock().unwrap();
    zone.writes.push(("PATCH", body.clone()));
    if zone.fail_write || !authorized(&headers) {
        return (StatusCode::BAD_REQUEST, WRITE_ERROR).into_response();
    }
    match zone.records.iter_mut().find(|r| r.id == record_id) {
        Some(record) => {
            record.content = body["content"].as_str().unwrap_or_default().to_string();
            Json(json!({"success": true})).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no such record").into_response(),
    }
}

/// Serve the fake zone on an ephemeral local port, returning its address.
pub(crate) fn serve_fake(zone: SharedZone) -> SocketAddr {
    let app = Router::new()
        .route("/zones/:zone/dns_records", get(list).post(create))
        .route("/zones/:zone/dns_records/:id", patch(update))
        .with_state(zone);
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);
    addr
}

impl FakeZone {
    pub(crate) fn with_record(name: &str, record_type: &str, content: &str) -> SharedZone {
        let zone = FakeZone {
            records: vec![FakeRecord {
                id: "rec9".to_string(),
                name: name.to_string(),
                record_type: record_type.to_string(),
                content: content.to_string(),
                ttl: 1,
            }],
            ..FakeZone::default()
        };
        Arc::new(Mutex::new(zone))
    }
}
