//! HTTP message model at the dispatch boundary.

use bytes::Bytes;

/// Key comparison mode for a [`Multimap`], fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyMode {
    Exact,
    AsciiCaseInsensitive,
}

/// Insertion-ordered key to many-values map.
///
/// Keys are stored as received. Lookups compare exactly or
/// ASCII-case-insensitively depending on how the map was constructed:
/// headers are case-insensitive, query parameters are exact.
#[derive(Debug, Clone, PartialEq)]
pub struct Multimap {
    entries: Vec<(String, Vec<String>)>,
    key_mode: KeyMode,
}

impl Multimap {
    /// Create an empty map with exact key comparison.
    pub fn new() -> Self {
        Multimap {
            entries: Vec::new(),
            key_mode: KeyMode::Exact,
        }
    }

    /// Create an empty map with ASCII-case-insensitive key comparison.
    pub fn case_insensitive() -> Self {
        Multimap {
            entries: Vec::new(),
            key_mode: KeyMode::AsciiCaseInsensitive,
        }
    }

    fn keys_equal(&self, stored: &str, lookup: &str) -> bool {
        match self.key_mode {
            KeyMode::Exact => stored == lookup,
            KeyMode::AsciiCaseInsensitive => stored.eq_ignore_ascii_case(lookup),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| self.keys_equal(k, key))
    }

    /// Add a value under `key`, keeping any values already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Replace all values under `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set_all(key, vec![value.into()]);
    }

    /// Replace all values under `key` with the given list.
    pub fn set_all(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = values,
            None => self.entries.push((key, values)),
        }
    }

    /// All values stored under `key`, in insertion order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.position(key).map(|idx| self.entries[idx].1.as_slice())
    }

    /// First value stored under `key`.
    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Multimap {
    fn default() -> Self {
        Multimap::new()
    }
}

/// An inbound HTTP request, immutable once built.
///
/// Construct through [`Request::builder`]; the builder normalizes the
/// method to uppercase and collapses an empty payload to "no body".
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    url_base: String,
    uri: String,
    headers: Multimap,
    params: Multimap,
    body: Option<Bytes>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Request method, uppercase.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Scheme, host and port portion of the request URL.
    pub fn url_base(&self) -> &str {
        &self.url_base
    }

    /// Request URI path.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Request headers (case-insensitive keys, stored as received).
    pub fn headers(&self) -> &Multimap {
        &self.headers
    }

    /// Query parameters (exact keys).
    pub fn params(&self) -> &Multimap {
        &self.params
    }

    /// Raw request body; `None` means the request carried no body.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// Builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    method: String,
    url_base: String,
    uri: String,
    headers: Multimap,
    params: Multimap,
    body: Option<Bytes>,
}

impl RequestBuilder {
    fn new() -> Self {
        RequestBuilder {
            method: "GET".to_string(),
            url_base: String::new(),
            uri: "/".to_string(),
            headers: Multimap::case_insensitive(),
            params: Multimap::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn url_base(mut self, url_base: impl Into<String>) -> Self {
        self.url_base = url_base.into();
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Append a header value, keeping any values already present.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }

    /// Append a query parameter value.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.append(key, value);
        self
    }

    /// Attach a request body. An empty payload is treated as no body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        let bytes = body.into();
        self.body = if bytes.is_empty() { None } else { Some(bytes) };
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method.to_ascii_uppercase(),
            url_base: self.url_base,
            uri: self.uri,
            headers: self.headers,
            params: self.params,
            body: self.body,
        }
    }
}

/// An outbound HTTP response handed back to the transport layer.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: Multimap,
    body: Option<Bytes>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Response {
            status,
            headers: Multimap::case_insensitive(),
            body: None,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &Multimap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// All values stored under a header name.
    pub fn header(&self, key: &str) -> Option<&[String]> {
        self.headers.get(key)
    }

    /// Add a header value, keeping any values already present.
    pub fn append_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.append(key, value);
    }

    /// Replace all values of a header with a single value.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.set(key, value);
    }

    /// Replace all values of a header with the given list.
    pub fn set_header_values(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.headers.set_all(key, values);
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }
}
