//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks: one
//! request is read at a time and answered with exactly one response.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation with its parse-time validity flag
//! - **`response`**: Response outcome evaluation and header computation
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request framed            EOF → Closed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Evaluate status, resolve resource
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Request was valid → Reading (same connection)
//!               └─ Request was invalid → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use alcove::content::{DiskRepository, ResourceRepository};
//! use alcove::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let repository: Arc<dyn ResourceRepository> = Arc::new(DiskRepository::new(&cfg));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let repo = repository.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, repo, "alcove".to_string());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
