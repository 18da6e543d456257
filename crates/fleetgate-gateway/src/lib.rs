//! # fleetgate-gateway
//!
//! Gateway routing and forwarding:
//!
//! - `route` — longest-prefix route table built once from configuration
//! - `proxy` — downstream forwarding with header filtering, `x-forwarded-*`
//!   injection, per-request timeout, and verbatim response relaying

pub mod proxy;
pub mod route;

pub use proxy::{ProxyForwarder, ProxyResponse};
pub use route::{Route, RouteTable};
