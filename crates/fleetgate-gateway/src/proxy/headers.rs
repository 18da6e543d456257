//! Header policy for requests and responses crossing the gateway.
//!
//! Inbound headers are forwarded from an explicit allowlist rather than a
//! denylist: a header not named here never crosses the boundary, no matter
//! what clients start sending. `x-forwarded-*` headers are injected by the
//! gateway, never trusted from the client.

use http::header::HeaderName;
use http::{HeaderMap, HeaderValue};

/// Inbound headers intentionally forwarded to downstream services.
const FORWARD_ALLOWLIST: [&str; 6] = [
    "authorization",
    "content-type",
    "accept",
    "accept-language",
    "user-agent",
    "x-request-id",
];

/// Hop-by-hop response headers. These describe a single transport leg and
/// must be recomputed by the outbound transport; copying them onto a
/// re-serialized body corrupts the response.
const HOP_BY_HOP: [&str; 4] = [
    "content-length",
    "content-encoding",
    "transfer-encoding",
    "connection",
];

/// Builds the header set forwarded downstream: the allowlisted inbound
/// headers plus the injected `x-forwarded-*` triple. `host` is always
/// recomputed by the outbound client and never copied.
pub fn build_forward_headers(
    inbound: &HeaderMap,
    client_ip: Option<&str>,
    proto: &str,
    host: Option<&str>,
) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for name in FORWARD_ALLOWLIST {
        let header = HeaderName::from_static(name);
        for value in inbound.get_all(&header) {
            headers.append(header.clone(), value.clone());
        }
    }

    if let Some(ip) = client_ip {
        if let Ok(value) = HeaderValue::from_str(ip) {
            headers.insert(HeaderName::from_static("x-forwarded-for"), value);
        }
    }
    if let Ok(value) = HeaderValue::from_str(proto) {
        headers.insert(HeaderName::from_static("x-forwarded-proto"), value);
    }
    if let Some(host) = host {
        if let Ok(value) = HeaderValue::from_str(host) {
            headers.insert(HeaderName::from_static("x-forwarded-host"), value);
        }
    }

    headers
}

/// Filters a downstream response header set for relaying: everything except
/// hop-by-hop headers passes through unchanged.
pub fn filter_response_headers(downstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in downstream {
        if HOP_BY_HOP.contains(&name.as_str()) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}
