//! Resolution of the address an update points a record at.
//!
//! # Trust boundary
//!
//! When a request carries no explicit `addr`, the record is pointed at the caller's observed
//! address. Behind a reverse proxy or CDN the TCP peer is the proxy, so the real client
//! address has to come from a proxy supplied header (by default `cf-connecting-ip`).
//!
//! That header is not covered by the request signature and any client can send it. It is
//! only honoured when the TCP peer lies within one of the configured
//! [`trusted_proxies`][crate::config::Config::trusted_proxies] networks. With no trusted
//! proxies configured the TCP peer address is always used.

use crate::error::Rejection;
use crate::validator::AddressFamily;
use axum::http::HeaderMap;
use ipnetwork::IpNetwork;
use std::net::IpAddr;

/// Determine the caller's address from the TCP `peer` and the client IP `header`.
///
/// For headers carrying a list (e.g. `X-Forwarded-For`) the first entry is used. A header
/// that is absent, untrusted, or unparseable yields `peer`.
#[must_use]
pub fn observed(peer: IpAddr, headers: &HeaderMap, header: &str, trusted: &[IpNetwork]) -> IpAddr {
    if !trusted.iter().any(|network| network.contains(peer)) {
        return peer;
    }
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(peer)
}

/// Pick the address for a record of `family`: the explicitly `requested` address if there is
/// one, otherwise the `observed` address.
///
/// # Errors
///
/// Returns [`Rejection::InvalidRecordType`] if the chosen address isn't an IP address of
/// `family`.
pub fn for_record(
    requested: Option<&str>,
    observed: IpAddr,
    family: AddressFamily,
) -> Result<IpAddr, Rejection> {
    let addr = match requested.filter(|addr| !addr.is_empty()) {
        Some(addr) => addr.parse().map_err(|_| Rejection::InvalidRecordType)?,
        None => observed,
    };
    if !family.contains(&addr) {
        return Err(Rejection::InvalidRecordType);
    }
    Ok(addr)
}
