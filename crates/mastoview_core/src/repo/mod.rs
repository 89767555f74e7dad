//! Archive access contracts and file-backed implementation.
//!
//! # Responsibility
//! - Define how actor and outbox documents are obtained.
//! - Isolate filesystem and JSON decoding details from services.
//!
//! # Invariants
//! - Loaders never mutate the source files.
//! - Decode failures surface as semantic errors naming the offending path.

pub mod archive_repo;
