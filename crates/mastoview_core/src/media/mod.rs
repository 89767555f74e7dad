//! Media attachment path handling.
//!
//! # Responsibility
//! - Undo the server-folder prefix some exporters put before
//!   `/media_attachments/files/`.
//! - Compose attachment paths with the configured base path.
//! - Rewrite attachment URLs in a stored outbox file.
//!
//! # Invariants
//! - Paths already starting with the canonical prefix are never changed.

pub mod attachment_fix;
pub mod path;
