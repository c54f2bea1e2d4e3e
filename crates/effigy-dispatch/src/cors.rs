//! CORS preflight handling.
//!
//! Browsers probe cross-origin permissions with an `OPTIONS` request
//! before the real call. When any backend opts into CORS, the dispatcher
//! answers that probe directly: the matching machinery is never engaged
//! and no backend scenario state is touched.

use crate::http::{Request, Response};

/// The preflight request method.
pub const PREFLIGHT_METHOD: &str = "OPTIONS";

/// Methods this server supports, advertised in preflight responses.
/// A build-time capability declaration, not per-backend configuration.
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, PUT, DELETE, PATCH";

/// Build the preflight response.
///
/// Always status 200, with the fixed method list in both `Allow` and
/// `Access-Control-Allow-Methods` and a wildcard
/// `Access-Control-Allow-Origin`. The request's
/// `Access-Control-Request-Headers` values, when present, are echoed
/// verbatim (all values, order preserved) into
/// `Access-Control-Allow-Headers`; otherwise that header is omitted
/// entirely.
pub fn preflight(request: &Request) -> Response {
    let mut response = Response::new(200);
    response.append_header("Allow", ALLOWED_METHODS);
    response.append_header("Access-Control-Allow-Origin", "*");
    response.append_header("Access-Control-Allow-Methods", ALLOWED_METHODS);
    if let Some(requested) = request.headers().get("Access-Control-Request-Headers") {
        response.set_header_values("Access-Control-Allow-Headers", requested.to_vec());
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_has_fixed_shape() {
        let request = Request::builder().method("OPTIONS").uri("/anything").build();
        let response = preflight(&request);

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.header("Allow"),
            Some(&[ALLOWED_METHODS.to_string()][..])
        );
        assert_eq!(
            response.header("Access-Control-Allow-Origin"),
            Some(&["*".to_string()][..])
        );
        assert_eq!(
            response.header("Access-Control-Allow-Methods"),
            Some(&[ALLOWED_METHODS.to_string()][..])
        );
    }

    #[test]
    fn test_preflight_echoes_requested_headers_verbatim() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/items")
            .header("Access-Control-Request-Headers", "X-Foo, X-Bar")
            .build();

        let response = preflight(&request);
        assert_eq!(
            response.header("Access-Control-Allow-Headers"),
            Some(&["X-Foo, X-Bar".to_string()][..])
        );
    }

    #[test]
    fn test_preflight_preserves_multiple_requested_header_values() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/items")
            .header("Access-Control-Request-Headers", "X-Foo")
            .header("access-control-request-headers", "X-Bar")
            .build();

        let response = preflight(&request);
        assert_eq!(
            response.header("Access-Control-Allow-Headers"),
            Some(&["X-Foo".to_string(), "X-Bar".to_string()][..])
        );
    }

    #[test]
    fn test_preflight_omits_allow_headers_when_not_requested() {
        let request = Request::builder().method("OPTIONS").uri("/items").build();
        let response = preflight(&request);
        assert!(response.header("Access-Control-Allow-Headers").is_none());
    }
}
