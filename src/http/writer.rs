use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::content::ResourceRepository;
use crate::http::response::ResponseContext;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Wire order of the response headers.
const HEADER_ORDER: [&str; 4] = ["Server", "Content-Length", "Date", "Content-Type"];

/// Serializes status line, headers and body into a single buffer.
///
/// Public so tests can assert on the exact bytes without a socket.
pub fn serialize_response(ctx: &ResponseContext, body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        ctx.status().as_u16(),
        ctx.status().reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers, in fixed wire order
    for name in HEADER_ORDER {
        if let Some(value) = ctx.header(name) {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(body);

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(ctx: &ResponseContext, body: &[u8]) -> Self {
        Self {
            buffer: serialize_response(ctx, body),
            written: 0,
        }
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;

        Ok(())
    }
}

/// Reads the resource backing the response fully into memory, then writes
/// the serialized response and flushes. Failures reading the file or
/// writing the socket come back as errors for the connection handler to
/// log; nothing is retried.
pub async fn send_response(
    ctx: &ResponseContext,
    repository: &dyn ResourceRepository,
    stream: &mut TcpStream,
) -> anyhow::Result<()> {
    let body = repository
        .read(ctx.resource())
        .with_context(|| format!("failed to read {}", ctx.resource().path().display()))?;

    let mut writer = ResponseWriter::new(ctx, &body);
    writer.write_to_stream(stream).await
}
