//! HTTP response types.

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(u16);

impl StatusCode {
    /// 200 OK
    pub const OK: Self = Self(200);
    /// 301 Moved Permanently
    pub const MOVED_PERMANENTLY: Self = Self(301);
    /// 400 Bad Request
    pub const BAD_REQUEST: Self = Self(400);
    /// 404 Not Found
    pub const NOT_FOUND: Self = Self(404);
    /// 405 Method Not Allowed
    pub const METHOD_NOT_ALLOWED: Self = Self(405);
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    /// Create a status code from a raw u16.
    #[must_use]
    pub fn from_u16(code: u16) -> Self {
        Self(code)
    }

    /// The numeric status code.
    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Whether the code is in the redirection class (3xx).
    #[must_use]
    pub fn is_redirection(self) -> bool {
        (300..400).contains(&self.0)
    }

    /// The canonical reason phrase for this status code.
    #[must_use]
    pub fn canonical_reason(self) -> &'static str {
        match self.0 {
            200 => "OK",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.canonical_reason())
    }
}

/// HTTP response produced by a handler.
///
/// Headers keep insertion order and are stored with lowercase names, the
/// form the serializer writes them in.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, Vec<u8>)>,
    body: Vec<u8>,
}

impl Response {
    /// Create an empty response with the given status.
    #[must_use]
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Create a 200 OK response.
    #[must_use]
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }

    /// Create a plain-text 404 response.
    #[must_use]
    pub fn not_found() -> Self {
        Self::with_status(StatusCode::NOT_FOUND).body_text("404 page not found\n")
    }

    /// Create a 400 Bad Request response.
    #[must_use]
    pub fn bad_request() -> Self {
        Self::with_status(StatusCode::BAD_REQUEST)
    }

    /// Create a redirect to `location` with the given status.
    #[must_use]
    pub fn redirect(location: impl Into<String>, status: StatusCode) -> Self {
        Self::with_status(status).header("location", location.into().into_bytes())
    }

    /// Add a header. The name is normalized to lowercase.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.headers
            .push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    /// Set a plain-text body with a matching content type.
    #[must_use]
    pub fn body_text(mut self, text: impl Into<String>) -> Self {
        self.body = text.into().into_bytes();
        self.header("content-type", b"text/plain; charset=utf-8".to_vec())
    }

    /// Set a raw byte body.
    #[must_use]
    pub fn body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// The response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Look up the first header with the given name (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&[u8]> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Look up a header as a UTF-8 string.
    #[must_use]
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.header_value(name)
            .and_then(|v| std::str::from_utf8(v).ok())
    }

    /// All headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, Vec<u8>)] {
        &self.headers
    }

    /// The response body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decompose into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, Vec<(String, Vec<u8>)>, Vec<u8>) {
        (self.status, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reasons() {
        assert_eq!(StatusCode::OK.canonical_reason(), "OK");
        assert_eq!(StatusCode::NOT_FOUND.canonical_reason(), "Not Found");
        assert_eq!(
            StatusCode::METHOD_NOT_ALLOWED.to_string(),
            "405 Method Not Allowed"
        );
        assert!(StatusCode::MOVED_PERMANENTLY.is_redirection());
        assert!(!StatusCode::OK.is_redirection());
    }

    #[test]
    fn redirect_sets_location() {
        let resp = Response::redirect("/foo/", StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.status().as_u16(), 301);
        assert_eq!(resp.header_str("Location"), Some("/foo/"));
    }

    #[test]
    fn body_text_sets_content_type() {
        let resp = Response::ok().body_text("hello");
        assert_eq!(resp.body(), b"hello");
        assert_eq!(
            resp.header_str("content-type"),
            Some("text/plain; charset=utf-8")
        );
    }
}
