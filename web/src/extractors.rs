//! Custom Axum extractors.
//!
//! - `CorrelationId`: the id assigned by the correlation middleware
//! - `UserAgent`: the `User-Agent` header, used for wallet platform detection

use crate::middleware::correlation_id_from;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Reads the id stored by [`correlation_id_layer`](crate::middleware::correlation_id_layer).
/// Without the middleware it falls back to the `X-Correlation-ID` header or a new UUID.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .extensions
            .get::<Uuid>()
            .copied()
            .unwrap_or_else(|| correlation_id_from(&parts.headers));

        Ok(Self(correlation_id))
    }
}

/// User-Agent header, empty when absent.
#[derive(Debug, Clone)]
pub struct UserAgent(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserAgent
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(Self(user_agent))
    }
}
