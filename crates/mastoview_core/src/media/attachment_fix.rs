//! One-shot rewrite of attachment URLs in a stored outbox file.
//!
//! # Responsibility
//! - Strip the server folder from every attachment `url` in `outbox.json`.
//! - Report each change as a `before -> after` line.
//!
//! # Invariants
//! - URLs starting with `/media_attachments` are left untouched.
//! - The document is rebuilt fully in memory before the single write; a
//!   malformed document aborts with nothing written.
//! - Every other field, item and key order is preserved.

use crate::media::path::remove_first_folder;
use log::{error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

const STORED_MEDIA_PREFIX: &str = "/media_attachments";

/// Attachment rewrite error.
#[derive(Debug)]
pub enum FixError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Root document lacks an `orderedItems` array.
    InvalidFormat(&'static str),
}

impl Display for FixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error on `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid JSON in `{}`: {source}", path.display())
            }
            Self::InvalidFormat(details) => write!(f, "invalid JSON format: {details}"),
        }
    }
}

impl Error for FixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidFormat(_) => None,
        }
    }
}

/// One rewritten attachment URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChange {
    pub before: String,
    pub after: String,
}

impl Display for PathChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.before, self.after)
    }
}

/// Outcome of one rewrite pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    /// Rewrites in document order.
    pub changes: Vec<PathChange>,
    /// URLs already in canonical form.
    pub skipped: usize,
}

impl FixReport {
    pub fn normalized_count(&self) -> usize {
        self.changes.len()
    }
}

/// Rewrites attachment URLs of every status in an outbox document in place.
///
/// # Errors
/// - Returns `InvalidFormat` when `orderedItems` is missing or not an array;
///   the document is left unmodified in that case.
pub fn normalize_outbox_document(document: &mut Value) -> Result<FixReport, FixError> {
    let items = document
        .get_mut("orderedItems")
        .and_then(Value::as_array_mut)
        .ok_or(FixError::InvalidFormat("missing `orderedItems` array"))?;

    let mut report = FixReport::default();
    for item in items.iter_mut() {
        let Some(attachments) = item
            .get_mut("object")
            .and_then(Value::as_object_mut)
            .and_then(|object| object.get_mut("attachment"))
            .and_then(Value::as_array_mut)
        else {
            continue;
        };

        for attachment in attachments.iter_mut() {
            let Some(url) = attachment.get_mut("url") else {
                continue;
            };
            let Some(current) = url.as_str() else {
                warn!("event=attachment_fix module=media status=skip reason=non_string_url");
                continue;
            };
            if let Some(rewritten) = normalize_stored_path(current, &mut report) {
                *url = Value::String(rewritten);
            }
        }
    }

    Ok(report)
}

/// Reads, rewrites and overwrites an outbox file.
///
/// No backup is taken.
pub fn fix_outbox_file(path: &Path) -> Result<FixReport, FixError> {
    let started_at = Instant::now();
    info!(
        "event=attachment_fix module=media status=start path={}",
        path.display()
    );

    let result = rewrite_file(path);
    match &result {
        Ok(report) => info!(
            "event=attachment_fix module=media status=ok duration_ms={} normalized={} skipped={}",
            started_at.elapsed().as_millis(),
            report.normalized_count(),
            report.skipped
        ),
        Err(err) => error!(
            "event=attachment_fix module=media status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn rewrite_file(path: &Path) -> Result<FixReport, FixError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FixError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut document: Value = serde_json::from_str(&raw).map_err(|source| FixError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let report = normalize_outbox_document(&mut document)?;

    let serialized = serde_json::to_string(&document).map_err(|source| FixError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, serialized).map_err(|source| FixError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(report)
}

/// Returns the rewritten path, or `None` when already canonical.
fn normalize_stored_path(path: &str, report: &mut FixReport) -> Option<String> {
    if path.starts_with(STORED_MEDIA_PREFIX) {
        warn!("Path {path} is already normalized. Skipping normalization.");
        report.skipped += 1;
        return None;
    }

    let rewritten = remove_first_folder(path);
    report.changes.push(PathChange {
        before: path.to_string(),
        after: rewritten.clone(),
    });
    Some(rewritten)
}
