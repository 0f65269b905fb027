use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Attempts to frame and parse the next request in the buffer.
///
/// Returns `None` while the buffer does not yet hold a complete header
/// block (no `\r\n\r\n` terminator); the caller should read more bytes.
/// Once a request is framed, parsing itself never fails: a structurally
/// broken request comes back with `is_valid() == false`, keeping whatever
/// fields could still be recovered. The returned count covers the request
/// line, headers and terminator.
pub fn parse_request(buf: &[u8]) -> Option<(Request, usize)> {
    let headers_end = find_headers_end(buf)?;
    let header_bytes = &buf[..headers_end];
    let consumed = headers_end + 4;

    let Ok(headers_str) = std::str::from_utf8(header_bytes) else {
        return Some((Request::truncated(), consumed));
    };

    let mut valid = true;
    let mut lines = headers_str.split("\r\n");

    // Request line: exactly method, path and version.
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();

    let method = Method::from_str(parts.next().unwrap_or(""));
    let path = parts.next().unwrap_or("").to_string();
    let version = parts.next().unwrap_or("").to_string();

    if method.is_none() || parts.next().is_some() {
        valid = false;
    }
    if !path.starts_with('/') {
        valid = false;
    }
    if !version.starts_with("HTTP/") {
        valid = false;
    }

    // Headers, best effort: a broken line poisons validity, but parsing
    // continues so later headers remain available for logging.
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((key, value)) => {
                headers.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                valid = false;
            }
        }
    }

    // A request without a Host header is not acceptable HTTP/1.1.
    if !headers.contains_key("Host") {
        valid = false;
    }

    let request = Request::new(method, path, version, headers, valid);
    Some((request, consumed))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
