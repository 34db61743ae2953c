//! Destination filename derivation for fetched URLs.

use tracing::debug;
use url::Url;

use super::constants::FALLBACK_EXTENSION;

/// Derives the destination filename for a URL.
///
/// Uses the last non-empty path segment (percent-decoded and sanitized).
/// When the path yields nothing usable, falls back to `{host}.html`.
///
/// The segment is decoded, not kept raw: `my%20photo.jpg` is saved as
/// `my photo.jpg`.
pub(crate) fn filename_from_url(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()));

    if let Some(segment) = segment {
        let decoded = urlencoding::decode(segment).unwrap_or_else(|e| {
            debug!(
                segment = %segment,
                error = %e,
                "URL decoding failed, using raw segment"
            );
            segment.into()
        });
        let name = sanitize_filename(&decoded);
        if !name.is_empty() {
            return name;
        }
    }

    let host = url.host_str().map(sanitize_filename).unwrap_or_default();
    let stem = if host.is_empty() { "index" } else { &host };
    format!("{stem}.{FALLBACK_EXTENSION}")
}

/// Sanitizes a filename for safe filesystem use.
///
/// Replaces characters that are invalid on common filesystems
/// (/ \ : * ? " < > |) and control characters. Returns an empty string
/// for names that would refer to a directory (`.`, `..`).
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = sanitized.trim();
    if matches!(trimmed, "" | "." | "..") {
        String::new()
    } else {
        sanitized
    }
}
