//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};
use std::net::{IpAddr, SocketAddr};

/// Identity used when neither a forwarded header nor a peer address exists
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Extract client IP address
///
/// With `trust_proxy` set, the first `X-Forwarded-For` entry wins; use this
/// only behind a reverse proxy that overwrites the header. Otherwise the
/// header is ignored and the direct connection IP is used.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
/// * `trust_proxy` - Whether forwarded headers are honoured
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trust_proxy: bool,
) -> Option<IpAddr> {
    if trust_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|xff| xff.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());
        if forwarded.is_some() {
            return forwarded;
        }
    }
    direct_ip
}

/// Client identity for a request, as used in rate-limit keys.
///
/// The peer address comes from `ConnectInfo<SocketAddr>`, which is only
/// present when the server was started with
/// `into_make_service_with_connect_info`.
pub fn client_identity<B>(req: &Request<B>, trust_proxy: bool) -> String {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    extract_client_ip(req.headers(), peer, trust_proxy)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
