//! Audience classification for posts.
//!
//! # Responsibility
//! - Map `to`/`cc` recipient lists to a visibility tier.
//! - Decide whether an outbox item is shown under a given policy.
//!
//! # Invariants
//! - `Public` and `Unlisted` are mutually exclusive.
//! - Boosts are always shown.

use crate::model::outbox::{OrderedItem, StatusObject, PUBLIC_RECIPIENT};
use serde::Serialize;

const FOLLOWERS_SUFFIX: &str = "/followers";

/// Visibility tier derived from recipient lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Addressed to `Public` only, copied to followers.
    Public,
    /// Addressed to followers, `Public` only in `cc`.
    Unlisted,
    /// Not public, but reaches a followers collection.
    FollowersOnly,
    /// Addressed to specific accounts only.
    Direct,
}

impl Visibility {
    /// Classifies a post object by its recipients.
    pub fn of(object: &StatusObject) -> Self {
        classify(&object.to, &object.cc)
    }

    /// Returns whether this tier is shown without the private-posts flag.
    pub fn is_listed(self) -> bool {
        matches!(self, Self::Public | Self::Unlisted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::FollowersOnly => "followers_only",
            Self::Direct => "direct",
        }
    }
}

/// Classifies recipient lists into a visibility tier.
pub fn classify(to: &[String], cc: &[String]) -> Visibility {
    let is_public = to.len() == 1
        && to.iter().any(|r| r == PUBLIC_RECIPIENT)
        && cc.iter().all(|r| is_followers_collection(r));
    if is_public {
        return Visibility::Public;
    }

    let is_unlisted = cc.iter().any(|r| r == PUBLIC_RECIPIENT)
        && to.iter().all(|r| is_followers_collection(r));
    if is_unlisted {
        return Visibility::Unlisted;
    }

    if to.iter().chain(cc.iter()).any(|r| is_followers_collection(r)) {
        Visibility::FollowersOnly
    } else {
        Visibility::Direct
    }
}

/// Display policy for outbox items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityPolicy {
    pub include_private_posts: bool,
}

impl VisibilityPolicy {
    pub fn new(include_private_posts: bool) -> Self {
        Self {
            include_private_posts,
        }
    }

    /// Returns whether an outbox item is shown.
    pub fn allows(&self, item: &OrderedItem) -> bool {
        match item {
            OrderedItem::Boost(_) => true,
            OrderedItem::Status(status) => {
                self.include_private_posts || Visibility::of(&status.object).is_listed()
            }
        }
    }
}

fn is_followers_collection(recipient: &str) -> bool {
    recipient.ends_with(FOLLOWERS_SUFFIX)
}
