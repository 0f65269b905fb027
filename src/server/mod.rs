//! Connection acceptance
//!
//! Thin glue between the OS listener and the per-connection state machine
//! in `http::connection`.

pub mod listener;
