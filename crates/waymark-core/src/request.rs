//! HTTP request types.

use std::collections::HashMap;

/// HTTP headers collection.
///
/// Header names are normalized to lowercase at insertion time for
/// case-insensitive matching.
#[derive(Debug, Default)]
pub struct Headers {
    inner: HashMap<String, Vec<u8>>,
}

impl Headers {
    /// Create empty headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a header value by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// Get a header value as a UTF-8 string, if it is one.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Insert a header.
    ///
    /// The header name is normalized to lowercase.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.inner
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Iterate over all headers as (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.inner
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_slice()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Request body.
#[derive(Debug, Default)]
pub enum Body {
    /// Empty body.
    #[default]
    Empty,
    /// Bytes body.
    Bytes(Vec<u8>),
}

impl Body {
    /// Get body as bytes, consuming it.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Empty => Vec::new(),
            Self::Bytes(b) => b,
        }
    }

    /// Check if body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty) || matches!(self, Self::Bytes(b) if b.is_empty())
    }
}

/// HTTP protocol version as a (major, minor) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(pub u8, pub u8);

impl Version {
    /// HTTP/1.0
    pub const HTTP_10: Self = Self(1, 0);
    /// HTTP/1.1
    pub const HTTP_11: Self = Self(1, 1);

    /// Whether the version is at least `major.minor`.
    #[must_use]
    pub fn at_least(self, major: u8, minor: u8) -> bool {
        self >= Self(major, minor)
    }
}

/// HTTP request as seen by the router.
///
/// The method is kept as a plain string: the router's method tables are
/// string-keyed and dispatch any token a transport hands over, including
/// non-standard ones.
#[derive(Debug)]
pub struct Request {
    method: String,
    host: String,
    path: String,
    query: Option<String>,
    target: String,
    version: Version,
    headers: Headers,
    body: Body,
}

impl Request {
    /// Create a new request for the given method and path.
    ///
    /// The raw request target defaults to the path; transports that saw an
    /// asterisk-form target should override it with [`set_target`].
    ///
    /// [`set_target`]: Request::set_target
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            method: method.into(),
            host: String::new(),
            target: path.clone(),
            path,
            query: None,
            version: Version::HTTP_11,
            headers: Headers::new(),
            body: Body::Empty,
        }
    }

    /// Get the HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the request host (empty if the transport supplied none).
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Set the request host.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    /// Get the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the query string.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Set the query string.
    pub fn set_query(&mut self, query: Option<String>) {
        self.query = query;
    }

    /// Get the raw request target as it appeared on the request line.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Set the raw request target.
    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    /// Get the protocol version.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Set the protocol version.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Get the headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get mutable headers.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// The Referer header value, if present and valid UTF-8.
    #[must_use]
    pub fn referer(&self) -> Option<&str> {
        self.headers.get_str("referer")
    }

    /// Get the body.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Take the body, replacing with Empty.
    pub fn take_body(&mut self) -> Body {
        std::mem::take(&mut self.body)
    }

    /// Set the body.
    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Referer", b"http://example.com/".to_vec());
        assert_eq!(headers.get("referer"), Some(&b"http://example.com/"[..]));
        assert_eq!(headers.get_str("REFERER"), Some("http://example.com/"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn request_target_defaults_to_path() {
        let mut req = Request::new("GET", "/foo/bar");
        assert_eq!(req.target(), "/foo/bar");
        req.set_target("*");
        assert_eq!(req.target(), "*");
        assert_eq!(req.path(), "/foo/bar");
    }

    #[test]
    fn version_ordering() {
        assert!(Version::HTTP_11.at_least(1, 1));
        assert!(!Version::HTTP_10.at_least(1, 1));
        assert!(Version(2, 0).at_least(1, 1));
    }
}
