//! Archive domain model for actor profile and outbox activity.
//!
//! # Responsibility
//! - Define typed shapes for the exported `actor.json` and `outbox.json`.
//! - Decide the Status/Boost split once, at deserialization time.
//!
//! # Invariants
//! - Every Status `object.id` is unique within one archive.
//! - Model values are never mutated after load.

pub mod actor;
pub mod outbox;

use serde::{Deserialize, Deserializer};

/// Decodes an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
