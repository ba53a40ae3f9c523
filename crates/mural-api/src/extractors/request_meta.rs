//! Client metadata extractor
//!
//! Captures the caller's address and user agent for the audit trail.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use mural_core::RequestMeta;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// Request origin as reported by the proxy headers
#[derive(Debug, Clone, Default)]
pub struct ClientMeta(pub RequestMeta);

impl ClientMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        // first hop of x-forwarded-for is the client
        let ip_address = header_str(headers, FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| header_str(headers, REAL_IP).map(str::trim).filter(|v| !v.is_empty()))
            .map(String::from);

        let user_agent = header_str(headers, header::USER_AGENT.as_str()).map(String::from);

        Self(RequestMeta {
            ip_address,
            user_agent,
        })
    }

    pub fn into_inner(self) -> RequestMeta {
        self.0
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
