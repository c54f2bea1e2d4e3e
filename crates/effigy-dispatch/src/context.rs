//! The normalized request view consumed by backend predicate evaluators.

use bytes::Bytes;

use crate::body::{classify, BodyValue};
use crate::http::{Multimap, Request};

/// An immutable snapshot of one request, built fresh per dispatch and
/// never shared across requests.
///
/// Every backend's predicate evaluator sees the same slots regardless of
/// how the backend is implemented: method, URL base, URI, headers and
/// params are always populated; the body slots are populated only when
/// the request carried a body. Construction is a pure function of the
/// request and cannot fail — an unparseable body degrades to text inside
/// the classifier rather than aborting dispatch.
#[derive(Debug, Clone)]
pub struct MatchContext {
    method: String,
    url_base: String,
    uri: String,
    headers: Multimap,
    params: Multimap,
    body_bytes: Option<Bytes>,
    body: Option<BodyValue>,
}

impl MatchContext {
    /// Build the context for one request, classifying the body if present.
    pub fn from_request(request: &Request) -> Self {
        let (body_bytes, body) = match request.body() {
            Some(bytes) => (Some(bytes.clone()), Some(classify(bytes))),
            None => (None, None),
        };

        MatchContext {
            method: request.method().to_string(),
            url_base: request.url_base().to_string(),
            uri: request.uri().to_string(),
            headers: request.headers().clone(),
            params: request.params().clone(),
            body_bytes,
            body,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url_base(&self) -> &str {
        &self.url_base
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn headers(&self) -> &Multimap {
        &self.headers
    }

    pub fn params(&self) -> &Multimap {
        &self.params
    }

    /// Raw body bytes, present only when the request carried a body.
    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body_bytes.as_ref()
    }

    /// Classified body value, present only when the request carried a body.
    pub fn body(&self) -> Option<&BodyValue> {
        self.body.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyKind;

    #[test]
    fn test_context_populates_request_slots() {
        let request = Request::builder()
            .method("get")
            .url_base("http://localhost:8080")
            .uri("/items")
            .header("Accept", "application/json")
            .param("page", "2")
            .build();

        let context = MatchContext::from_request(&request);
        assert_eq!(context.method(), "GET");
        assert_eq!(context.url_base(), "http://localhost:8080");
        assert_eq!(context.uri(), "/items");
        assert_eq!(context.headers().get_first("accept"), Some("application/json"));
        assert_eq!(context.params().get_first("page"), Some("2"));
        assert!(context.body_bytes().is_none());
        assert!(context.body().is_none());
    }

    #[test]
    fn test_context_classifies_body_when_present() {
        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .body(r#"{"sku": "ab-1"}"#)
            .build();

        let context = MatchContext::from_request(&request);
        assert_eq!(
            context.body_bytes().map(|b| b.as_ref()),
            Some(br#"{"sku": "ab-1"}"#.as_ref())
        );
        assert_eq!(context.body().map(BodyValue::kind), Some(BodyKind::Json));
    }

    #[test]
    fn test_context_never_fails_on_malformed_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .body("{not json")
            .build();

        let context = MatchContext::from_request(&request);
        assert_eq!(context.body().map(BodyValue::kind), Some(BodyKind::Text));
    }
}
