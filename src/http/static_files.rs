//! Static file resolution.
//!
//! # Responsibilities
//! - Map a request path to a file under the base directory
//! - Refuse anything that would escape the base directory
//! - Guess a content-type from the file extension
//!
//! # Design Decisions
//! - Only Normal path components survive sanitization; `..`, roots, and
//!   prefixes discard the candidate entirely
//! - Unknown extensions fall back to text/plain

use std::path::{Component, Path, PathBuf};

/// Reduce a request path to a relative path safe to join under the base
/// directory. Returns `None` for empty paths and for any path carrying a
/// non-Normal component.
pub fn sanitize_request_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            _ => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Guess a content-type for a file, falling back to text/plain.
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_text_plain()
        .to_string()
}
