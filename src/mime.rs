//! MIME type detection
//!
//! The resolver itself only ever sees MIME strings; this is the detector
//! collaborator that produces them, extension guess first with a content
//! probe as fallback.

use std::path::Path;

/// Detect the MIME type of a file
pub fn detect(path: &Path) -> Option<String> {
    if path.extension().is_some()
        && let Some(mime) = mime_guess::from_path(path).first()
    {
        return Some(mime.to_string());
    }

    if let Ok(Some(kind)) = infer::get_from_path(path) {
        return Some(kind.mime_type().to_string());
    }

    None
}

/// Wildcard key for a MIME type: `image/png` -> `image/*`
///
/// Returns None for strings without a `/` separator.
pub fn wildcard(mime: &str) -> Option<String> {
    let (major, _minor) = mime.split_once('/')?;
    if major.is_empty() {
        return None;
    }
    Some(format!("{}/*", major))
}
