//! MIME type detection based on file extensions.

use std::path::Path;

/// Probes the Content-Type for a resource from its file extension.
/// Falls back to `application/octet-stream` when nothing matches.
pub fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
