//! Content resolution
//!
//! This module maps request paths onto the read-only file trees the server
//! serves from: the content root for normal resources and the error root
//! for the fixed 400/404 pages.

pub mod repository;

pub use repository::{DiskRepository, ErrorPage, MemoryRepository, Resolution, Resource, ResourceRepository};
