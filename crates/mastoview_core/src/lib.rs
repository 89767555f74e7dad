//! Core data access for the Mastodon archive viewer.
//! This crate owns archive decoding, post filtering, reply threads and media
//! path fixes.

pub mod config;
pub mod logging;
pub mod media;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ViewerConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use media::attachment_fix::{
    fix_outbox_file, normalize_outbox_document, FixError, FixReport, PathChange,
};
pub use media::path::{normalize_media_path, path_with_base, served_url};
pub use model::actor::{Actor, ImageRef, Profile, ProfileField};
pub use model::outbox::{
    Activity, Attachment, Boost, MediaKind, OrderedItem, Outbox, Status, StatusObject, Tag,
    PUBLIC_RECIPIENT,
};
pub use repo::archive_repo::{
    Archive, ArchiveError, ArchiveRepository, ArchiveResult, DirArchiveRepository,
    DEFAULT_ARCHIVE_DIR,
};
pub use service::post_service::PostService;
pub use service::visibility::{classify, Visibility, VisibilityPolicy};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
