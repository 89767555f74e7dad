//! Attachment path normalization for serving.

use crate::model::outbox::Attachment;
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical directory prefix of exported media files.
pub const CANONICAL_MEDIA_PREFIX: &str = "/media_attachments/files/";

static MEDIA_ATTACHMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/media_attachments/files/").expect("valid media attachment regex"));

/// Strips a spurious leading folder from a media attachment path.
///
/// Paths that do not reference `/media_attachments/files/` at all, or that
/// already start with it, are returned unchanged. Otherwise the `/`-split
/// segment at index 1 is removed, which is the first folder for rooted paths.
pub fn normalize_media_path(path: &str) -> String {
    if !MEDIA_ATTACHMENT_RE.is_match(path) || path.starts_with(CANONICAL_MEDIA_PREFIX) {
        return path.to_string();
    }

    remove_first_folder(path)
}

/// Prefixes a normalized media path with the served base path.
///
/// `base_path` is expected in `ViewerConfig::base_path` form.
pub fn path_with_base(path: &str, base_path: &str) -> String {
    let normalized = normalize_media_path(path);
    if base_path == "/" {
        return normalized;
    }

    let relative = normalized.strip_prefix('/').unwrap_or(&normalized);
    format!("{base_path}/{relative}")
}

/// Served URL of an attachment under `base_path`.
pub fn served_url(attachment: &Attachment, base_path: &str) -> String {
    path_with_base(&attachment.url, base_path)
}

/// Removes the `/`-split segment at index 1 and rejoins.
pub(crate) fn remove_first_folder(path: &str) -> String {
    let mut segments = path.split('/').collect::<Vec<_>>();
    if segments.len() > 1 {
        segments.remove(1);
    }
    segments.join("/")
}
