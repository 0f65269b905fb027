use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::content::ResourceRepository;
use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::response::ResponseContext;
use crate::http::writer;

/// Cap on buffered header bytes for a single request. A client that sends
/// more without terminating the header block gets a 400 and is dropped.
const MAX_HEADER_BYTES: usize = 64 * 1024;

/// Owns one client socket for its entire lifetime.
///
/// Nothing here is shared with other connections; the repository handle is
/// a read-only view of the content trees.
pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    state: ConnectionState,
    repository: Arc<dyn ResourceRepository>,
    server_name: String,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseContext, bool), // bool = close after sending?
    Closed,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        repository: Arc<dyn ResourceRepository>,
        server_name: String,
    ) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            repository,
            server_name,
        }
    }

    /// Drives the connection until the client disconnects, a malformed
    /// request has been answered, or an I/O error occurs.
    ///
    /// The socket is closed exactly once on every exit path: the stream is
    /// owned by this connection and dropped when `run` returns.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await? {
                        Some(req) => {
                            self.state = ConnectionState::Processing(req);
                        }
                        None => {
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let ctx =
                        ResponseContext::evaluate(req, self.repository.as_ref(), &self.server_name);

                    // Log whatever parsed, even for a request about to be
                    // rejected, before the response goes out.
                    if req.is_valid() {
                        tracing::info!(
                            host = req.host().unwrap_or(""),
                            path = %req.path,
                            status = ctx.status().as_u16(),
                            "Handling request"
                        );
                    } else {
                        tracing::warn!(
                            host = req.host().unwrap_or(""),
                            path = %req.path,
                            status = ctx.status().as_u16(),
                            "Received invalid request"
                        );
                    }

                    // One error response per malformed request, then close.
                    let close_after = !req.is_valid();
                    self.state = ConnectionState::Writing(ctx, close_after);
                }

                ConnectionState::Writing(ctx, close_after) => {
                    let close_after = *close_after;

                    writer::send_response(ctx, self.repository.as_ref(), &mut self.stream).await?;

                    if close_after {
                        self.state = ConnectionState::Closed;
                    } else {
                        self.state = ConnectionState::Reading; // go back for next request
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until one request is framed.
    ///
    /// Returns `Ok(None)` on clean end-of-stream between requests, so the
    /// caller can terminate silently instead of answering a dead socket.
    /// End-of-stream in the middle of a request yields an invalid request,
    /// so one 400 response goes out before the socket closes.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            // Try parsing whatever we already have
            if let Some((request, consumed)) = parse_request(&self.buffer) {
                self.buffer.advance(consumed);
                return Ok(Some(request));
            }

            // Prevent unbounded header growth
            if self.buffer.len() > MAX_HEADER_BYTES {
                tracing::debug!(buffered = self.buffer.len(), "Header block too large");
                self.buffer.clear();
                return Ok(Some(Request::truncated()));
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    // Client closed between requests
                    return Ok(None);
                }

                // Bytes arrived but the header terminator never did
                self.buffer.clear();
                return Ok(Some(Request::truncated()));
            }
        }
    }
}
