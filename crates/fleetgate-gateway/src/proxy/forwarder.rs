//! Downstream forwarding with timeout and verbatim relaying.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use tracing::{debug, warn};

use fleetgate_core::config::GatewayConfig;
use fleetgate_core::error::AppError;

use crate::route::Route;

use super::headers::{build_forward_headers, filter_response_headers};

/// The inbound request parts the forwarder needs.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    /// Original HTTP method.
    pub method: Method,
    /// Inbound request path.
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    /// Inbound headers (filtered through the allowlist before forwarding).
    pub headers: HeaderMap,
    /// Buffered request body, forwarded unchanged.
    pub body: Bytes,
    /// Connecting client address, injected as `x-forwarded-for`.
    pub client_ip: Option<String>,
    /// Inbound `Host`, injected as `x-forwarded-host`.
    pub host: Option<String>,
    /// Inbound scheme, injected as `x-forwarded-proto`.
    pub scheme: String,
}

/// A completed downstream response, relayed verbatim to the client.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    /// Downstream status code, whatever it was — including 4xx/5xx.
    pub status: StatusCode,
    /// Downstream headers minus hop-by-hop entries.
    pub headers: HeaderMap,
    /// Downstream body, byte for byte.
    pub body: Bytes,
}

/// Forwards requests to downstream services.
///
/// Each call is an independent operation bounded by its own timeout; the
/// shared client pools and releases connections on every exit path.
#[derive(Debug, Clone)]
pub struct ProxyForwarder {
    client: reqwest::Client,
}

impl ProxyForwarder {
    /// Creates a forwarder with the configured per-request timeout.
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build outbound client: {e}")))?;

        Ok(Self { client })
    }

    /// Forwards the request along the resolved route and returns the
    /// downstream response for verbatim relaying.
    ///
    /// A completed downstream response — any status code — is a success
    /// here; only transport failures become errors, and those are reported,
    /// never swallowed.
    pub async fn forward(
        &self,
        route: &Route,
        inbound: InboundRequest,
    ) -> Result<ProxyResponse, AppError> {
        let url = route.downstream_url(&inbound.path, inbound.query.as_deref());

        let headers = build_forward_headers(
            &inbound.headers,
            inbound.client_ip.as_deref(),
            &inbound.scheme,
            inbound.host.as_deref(),
        );

        debug!(method = %inbound.method, url = %url, "Forwarding to downstream");

        let response = self
            .client
            .request(inbound.method.clone(), &url)
            .headers(headers)
            .body(inbound.body)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(&url, e))?;

        let status = response.status();
        let response_headers = filter_response_headers(response.headers());
        let body = response.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "Downstream body read failed");
            AppError::gateway_unavailable(format!("Downstream response truncated: {e}"))
        })?;

        Ok(ProxyResponse {
            status,
            headers: response_headers,
            body,
        })
    }

    /// Maps a transport failure onto the gateway error taxonomy: timeouts
    /// surface as 504-class, everything else as 502-class.
    fn classify_transport_error(&self, url: &str, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            warn!(url = %url, "Downstream request timed out");
            AppError::gateway_timeout("Downstream service timed out")
        } else {
            warn!(url = %url, error = %error, "Downstream unreachable");
            AppError::gateway_unavailable("Downstream service unavailable")
        }
    }
}
