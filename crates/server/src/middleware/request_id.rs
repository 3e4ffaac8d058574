//! Request ID middleware.
//!
//! Every response carries an `x-request-id`. An id supplied by a fronting proxy
//! is kept; otherwise a UUID v4 is minted. The id is recorded on the current
//! span and tagged on the Sentry scope so logs and error reports line up.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn incoming_or_new(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Attach a request id to the span, the Sentry scope and the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_or_new(&request);

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn test_keeps_upstream_id() {
        let request = Request::builder()
            .header(REQUEST_ID_HEADER, "edge-1234")
            .body(Body::empty())
            .unwrap();
        assert_eq!(incoming_or_new(&request), "edge-1234");
    }

    #[test]
    fn test_mints_uuid_when_absent() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let id = incoming_or_new(&request);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
