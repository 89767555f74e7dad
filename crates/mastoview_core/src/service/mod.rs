//! Viewer use-case services.
//!
//! # Responsibility
//! - Classify posts by audience and filter them for display.
//! - Derive newest-first listings, id lookups and reply threads.
//!
//! # See also
//! - `repo::archive_repo` for how archives are loaded.

pub mod post_service;
pub mod visibility;
