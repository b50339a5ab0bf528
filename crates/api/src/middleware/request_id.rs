//! `x-request-id` correlation.
//!
//! Each request carries one id through logs, Sentry events and the response.
//! An id sent by the client or a proxy is kept when it is short printable
//! ASCII; anything else is replaced with a fresh UUID v4.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest incoming id that is reused.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Pick the id for a request: the incoming header when acceptable, else a
/// new UUID v4.
fn resolve_request_id(headers: &HeaderMap) -> HeaderValue {
    headers
        .get(REQUEST_ID_HEADER)
        .filter(|value| is_acceptable(value.as_bytes()))
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        })
}

fn is_acceptable(id: &[u8]) -> bool {
    !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN && id.iter().all(u8::is_ascii_graphic)
}

/// Tag the request with an id and echo it on the response.
///
/// The id is recorded in the `request_id` field of the trace span and set as a
/// Sentry tag. It is also written back onto the request headers so handlers
/// and inner layers see the same value.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());
    let id = request_id.to_str().unwrap_or_default().to_owned();

    Span::current().record("request_id", id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &id));

    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers_with(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).unwrap());
        headers
    }

    #[test]
    fn test_keeps_incoming_id() {
        let id = resolve_request_id(&headers_with("edge-7f3a_01"));
        assert_eq!(id, "edge-7f3a_01");
    }

    #[test]
    fn test_generates_when_missing() {
        let id = resolve_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_replaces_unusable_ids() {
        let too_long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        for bad in ["", "has space", too_long.as_str()] {
            let id = resolve_request_id(&headers_with(bad));
            assert!(
                Uuid::parse_str(id.to_str().unwrap()).is_ok(),
                "{bad:?} was kept"
            );
        }
    }
}
