use std::collections::HashMap;
use std::time::SystemTime;

use crate::content::{ErrorPage, Resolution, Resource, ResourceRepository};
use crate::http::mime;
use crate::http::request::Request;

/// HTTP status codes the server emits.
///
/// Exactly three outcomes exist:
/// - `Ok` (200): the request was valid and the path resolved to a file
/// - `BadRequest` (400): the request was malformed
/// - `NotFound` (404): the request was valid but nothing exists at the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use alcove::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Everything needed to serialize one response: the chosen status, the
/// resource backing the body, and the computed header set.
///
/// Built fresh per request and never reused. Construction evaluates the
/// outcome and populates all four response headers, so a context that
/// exists is always ready to serialize.
#[derive(Debug)]
pub struct ResponseContext {
    status: StatusCode,
    resource: Resource,
    headers: HashMap<String, String>,
}

impl ResponseContext {
    /// Decides the response for a request, in fixed priority order:
    ///
    /// 1. the request itself is invalid → 400, `errors/400.html`
    /// 2. the path is rejected or unresolvable → 400 on a traversal
    ///    attempt, otherwise 404 with `errors/404.html`
    /// 3. the path resolved → 200 with the resolved file
    pub fn evaluate(request: &Request, repository: &dyn ResourceRepository, server: &str) -> Self {
        let (status, resource) = if !request.is_valid() {
            (StatusCode::BadRequest, repository.error_page(ErrorPage::BadRequest))
        } else {
            match repository.resolve(&request.path) {
                Resolution::Found(resource) => (StatusCode::Ok, resource),
                Resolution::Rejected => {
                    (StatusCode::BadRequest, repository.error_page(ErrorPage::BadRequest))
                }
                Resolution::NotFound => {
                    (StatusCode::NotFound, repository.error_page(ErrorPage::NotFound))
                }
            }
        };

        let content_length = match repository.size(&resource) {
            Ok(len) => len,
            Err(e) => {
                tracing::warn!(resource = %resource.path().display(), error = %e,
                    "Failed to measure resource");
                0
            }
        };

        let mut headers = HashMap::new();
        headers.insert("Server".to_string(), server.to_string());
        headers.insert("Date".to_string(), httpdate::fmt_http_date(SystemTime::now()));
        headers.insert("Content-Length".to_string(), content_length.to_string());
        headers.insert("Content-Type".to_string(), mime::content_type(resource.path()));

        Self {
            status,
            resource,
            headers,
        }
    }

    /// Status code of the evaluated outcome, for the connection's logging.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Resource whose bytes form the response body.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// The four computed response headers.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }
}
