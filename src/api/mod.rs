//! HTTP API for signed dynamic DNS updates.
//!
//! # API Endpoint
//!
//! ## Any path (POST)
//!
//!   Expects a JSON request body of the form:
//!
//!   ```json
//!   { "id": "home-router", "domain": "home.example.com", "addr": null, "type": "ipv4", "timestamp": 1700000000 }
//!   ```
//!
//!   and an `Authorization` header holding the base64 HMAC-SHA256 of the exact body bytes,
//!   keyed by the token of the credential named by `id`. See [`crate::validator`] for the
//!   checks performed and [`crate::signature`] for the signature format.
//!
//!   `type` selects the record: `ipv4` updates the `A` record, `ipv6` the `AAAA` record.
//!   When `addr` is `null` or absent the record is pointed at the caller's address, see
//!   [`crate::address`].
//!
//!   For successful updates, returns HTTP 200 (OK) and the plain text body `success`.
//!
//!   Any failure returns HTTP 401 (Unauthorized) with a plain text error code as the body,
//!   one of the [`Rejection`][crate::error::Rejection] codes or the provider's own error text.
//!
//!   A client signing with `openssl`:
//!
//!   ```bash
//!   ❯ BODY="{\"id\":\"home-router\",\"domain\":\"home.example.com\",\"addr\":null,\"type\":\"ipv4\",\"timestamp\":$(date +%s)}"
//!   ❯ SIG=$(printf '%s' "$BODY" | openssl dgst -sha256 -hmac "$TOKEN" -binary | base64)
//!   ❯ curl -H "Authorization: $SIG" -d "$BODY" https://ddns.example.com/
//!   success
//!   ```
//!
//! ## Any path (any other method)
//!
//!   Returns HTTP 401 (Unauthorized) and the body `invalid_request`.

mod api_error;
mod routes;
pub mod server;

pub use server::new;
