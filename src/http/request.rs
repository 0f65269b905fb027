use std::collections::HashMap;

/// HTTP request methods.
///
/// The server does not route by method; the method only participates in
/// request-line validation. An unrecognized token makes the request invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
}

impl Method {
    /// Parses an HTTP method token (case-sensitive, per the grammar).
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

/// Represents one parsed HTTP request from a client.
///
/// Validity is decided once, at parse time, and is immutable afterwards.
/// An invalid request keeps whatever fields did parse, so the connection
/// handler can still log a best-effort host and path before answering
/// with an error.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method, when the request line carried a recognized one.
    pub method: Option<Method>,
    /// The request path (e.g., "/index.html"). Empty if the request line
    /// never parsed.
    pub path: String,
    /// HTTP version from the request line (typically "HTTP/1.1").
    pub version: String,
    /// Request headers as key-value pairs.
    pub headers: HashMap<String, String>,
    valid: bool,
}

impl Request {
    pub fn new(
        method: Option<Method>,
        path: String,
        version: String,
        headers: HashMap<String, String>,
        valid: bool,
    ) -> Self {
        Self {
            method,
            path,
            version,
            headers,
            valid,
        }
    }

    /// A request whose bytes stopped arriving before the header block was
    /// complete. Always invalid.
    pub fn truncated() -> Self {
        Self::new(None, String::new(), String::new(), HashMap::new(), false)
    }

    /// Whether the request was syntactically well-formed, with a Host header.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Retrieves a header value by name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Value of the Host header, when present.
    pub fn host(&self) -> Option<&str> {
        self.header("Host")
    }
}
