//! Client identity and per-request context

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::Request;

use crate::auth::BasicCredentials;

/// Raw peer address used when the connection carries no address
const UNKNOWN_PEER: &str = "unknown";

/// Strip the port from a `host:port` peer address
///
/// Handles IPv4 (`1.2.3.4:80`), bracketed IPv6 (`[::1]:80`) and hostnames.
/// An empty port (`host:`) still yields the host. Input that cannot be split
/// into a host and a port is returned unchanged, so a strange address never
/// blocks a request.
pub fn client_identifier(addr: &str) -> String {
    split_host(addr).unwrap_or(addr).to_string()
}

fn split_host(addr: &str) -> Option<&str> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, after) = rest.split_once(']')?;
        let port = after.strip_prefix(':')?;
        if port.contains([':', '[', ']']) {
            return None;
        }
        return Some(host);
    }

    let (host, port) = addr.rsplit_once(':')?;
    if host.contains([':', '[', ']']) || port.contains(['[', ']']) {
        return None;
    }
    Some(host)
}

/// What the request pipeline knows about a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Client IP (or the raw peer address if it could not be split)
    pub client: String,
    /// Requested URL path, percent-decoded when possible
    pub path: String,
    /// Credentials from the `Authorization` header, if well formed
    pub credentials: Option<BasicCredentials>,
}

impl RequestContext {
    /// Build the context from the connection info, URI and headers of a request
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let peer = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.to_string())
            .unwrap_or_else(|| UNKNOWN_PEER.to_string());

        let raw_path = request.uri().path();
        let path = urlencoding::decode(raw_path)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw_path.to_string());

        Self {
            client: client_identifier(&peer),
            path,
            credentials: BasicCredentials::from_headers(request.headers()),
        }
    }
}
