use std::{convert::Infallible, net::SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
const UNKNOWN_ORIGIN: &str = "unknown";

/// Identity of the caller used as the rate limit key
///
/// The first `X-Forwarded-For` entry when present, else the peer address, else `"unknown"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OriginKey(pub String);

impl<S> FromRequestParts<S> for OriginKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(origin_key_from_parts(&parts.headers, peer))
    }
}

/// Resolves the origin key from request headers and the optional peer address
pub fn origin_key_from_parts(headers: &HeaderMap, peer: Option<SocketAddr>) -> OriginKey {
    let forwarded = headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(forwarded) = forwarded {
        return OriginKey(forwarded.to_string());
    }

    match peer {
        Some(addr) => OriginKey(addr.ip().to_string()),
        None => OriginKey(UNKNOWN_ORIGIN.to_string()),
    }
}
