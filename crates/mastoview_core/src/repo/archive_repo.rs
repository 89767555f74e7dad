//! Archive repository contracts and directory-backed implementation.
//!
//! # Responsibility
//! - Load `actor.json` and `outbox.json` from an export directory.
//! - Bundle both documents into one immutable `Archive` value.
//!
//! # Invariants
//! - `Archive::domain` is derived from `actor.url` once at load time.
//! - Loading emits `archive_load` events with duration and status.

use crate::model::actor::Actor;
use crate::model::outbox::Outbox;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const ACTOR_FILE_NAME: &str = "actor.json";
pub const OUTBOX_FILE_NAME: &str = "outbox.json";
pub const DEFAULT_ARCHIVE_DIR: &str = "archive-data";

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Archive load error.
#[derive(Debug)]
pub enum ArchiveError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// `actor.url` has no host to compare reply targets against.
    InvalidActorUrl(String),
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "failed to decode `{}`: {source}", path.display())
            }
            Self::InvalidActorUrl(value) => write!(f, "actor url has no host: `{value}`"),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidActorUrl(_) => None,
        }
    }
}

/// Fully loaded export: profile plus activity feed.
#[derive(Debug, Clone)]
pub struct Archive {
    pub actor: Actor,
    pub outbox: Outbox,
    domain: String,
}

impl Archive {
    /// Bundles loaded documents.
    ///
    /// # Errors
    /// - Returns `InvalidActorUrl` when `actor.url` has no host.
    pub fn new(actor: Actor, outbox: Outbox) -> ArchiveResult<Self> {
        let domain = actor
            .domain()
            .ok_or_else(|| ArchiveError::InvalidActorUrl(actor.url.clone()))?;
        Ok(Self {
            actor,
            outbox,
            domain,
        })
    }

    /// Host of the account's own profile URL.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

/// Source of archive documents.
pub trait ArchiveRepository {
    fn load_actor(&self) -> ArchiveResult<Actor>;
    fn load_outbox(&self) -> ArchiveResult<Outbox>;

    /// Loads both documents into one `Archive`.
    fn load_archive(&self) -> ArchiveResult<Archive> {
        let actor = self.load_actor()?;
        let outbox = self.load_outbox()?;
        Archive::new(actor, outbox)
    }
}

/// Archive repository reading an export directory on disk.
#[derive(Debug, Clone)]
pub struct DirArchiveRepository {
    dir: PathBuf,
}

impl DirArchiveRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn actor_path(&self) -> PathBuf {
        self.dir.join(ACTOR_FILE_NAME)
    }

    pub fn outbox_path(&self) -> PathBuf {
        self.dir.join(OUTBOX_FILE_NAME)
    }
}

impl ArchiveRepository for DirArchiveRepository {
    fn load_actor(&self) -> ArchiveResult<Actor> {
        read_json(&self.actor_path(), "actor")
    }

    fn load_outbox(&self) -> ArchiveResult<Outbox> {
        let outbox: Outbox = read_json(&self.outbox_path(), "outbox")?;
        debug!(
            "event=outbox_items module=repo items={}",
            outbox.ordered_items.len()
        );
        Ok(outbox)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, document: &str) -> ArchiveResult<T> {
    let started_at = Instant::now();
    info!("event=archive_load module=repo status=start document={document}");

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            error!(
                "event=archive_load module=repo status=error document={} duration_ms={} error_code=read_failed error={}",
                document,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(ArchiveError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            info!(
                "event=archive_load module=repo status=ok document={} duration_ms={} bytes={}",
                document,
                started_at.elapsed().as_millis(),
                raw.len()
            );
            Ok(value)
        }
        Err(err) => {
            error!(
                "event=archive_load module=repo status=error document={} duration_ms={} error_code=decode_failed error={}",
                document,
                started_at.elapsed().as_millis(),
                err
            );
            Err(ArchiveError::Json {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}
