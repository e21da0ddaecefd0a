//! Derive the rate-limiter key from the caller's network address.
//!
//! Behind a reverse proxy the socket peer is the proxy itself, so the
//! forwarded headers can be trusted by registering
//! [`ClientAddressPolicy::ForwardedHeaders`] as app data. Without a
//! registered policy only the socket peer address is used.

use actix_web::{HttpRequest, web};

use crate::domain::ClientKey;

/// Where the client network address is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientAddressPolicy {
    /// Use the TCP peer address.
    #[default]
    PeerAddress,
    /// Prefer `Forwarded` / `X-Forwarded-For`, falling back to the peer.
    ForwardedHeaders,
}

/// Key the rate limiter by the caller's address, or the shared
/// `"unknown"` bucket when none is available.
pub fn client_key(req: &HttpRequest) -> ClientKey {
    let policy = req
        .app_data::<web::Data<ClientAddressPolicy>>()
        .map(|policy| ***policy)
        .unwrap_or_default();
    match policy {
        ClientAddressPolicy::PeerAddress => {
            let peer = req.peer_addr().map(|addr| addr.ip().to_string());
            ClientKey::from_optional(peer.as_deref())
        }
        ClientAddressPolicy::ForwardedHeaders => {
            let info = req.connection_info();
            ClientKey::from_optional(info.realip_remote_addr().map(strip_port))
        }
    }
}

fn strip_port(addr: &str) -> &str {
    if let Some(rest) = addr.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match addr.rsplit_once(':') {
        Some((host, _)) if !host.contains(':') => host,
        _ => addr,
    }
}
