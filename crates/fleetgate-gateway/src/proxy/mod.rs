//! Downstream request forwarding.

pub mod forwarder;
pub mod headers;

pub use forwarder::{InboundRequest, ProxyForwarder, ProxyResponse};
