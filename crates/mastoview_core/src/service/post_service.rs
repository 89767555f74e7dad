//! Post listing and reply-thread service.
//!
//! # Responsibility
//! - Derive the filtered newest-first post list from a loaded archive.
//! - Index visible statuses by post id.
//! - Rebuild reply chains for single posts.
//!
//! # Invariants
//! - Derived views are computed at most once per service instance and never
//!   invalidated; the archive is immutable.
//! - `previous_posts` always returns at least the target post, last.
//! - Reply chains only follow references on the account's own domain.

use crate::model::actor::Profile;
use crate::model::outbox::{last_path_segment, OrderedItem, Status};
use crate::repo::archive_repo::Archive;
use crate::service::visibility::VisibilityPolicy;
use log::{debug, warn};
use once_cell::unsync::OnceCell;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Read-only views over one archive.
pub struct PostService {
    archive: Archive,
    policy: VisibilityPolicy,
    posts: OnceCell<Vec<OrderedItem>>,
    posts_by_id: OnceCell<HashMap<String, usize>>,
}

impl PostService {
    /// Creates a service over a loaded archive and display policy.
    pub fn new(archive: Archive, policy: VisibilityPolicy) -> Self {
        Self {
            archive,
            policy,
            posts: OnceCell::new(),
            posts_by_id: OnceCell::new(),
        }
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    pub fn policy(&self) -> VisibilityPolicy {
        self.policy
    }

    /// Returns the account profile projection.
    pub fn profile(&self) -> Profile {
        self.archive.actor.profile()
    }

    /// Returns visible outbox items, newest first.
    ///
    /// Boosts are always kept; statuses go through the visibility policy.
    pub fn posts(&self) -> &[OrderedItem] {
        self.posts.get_or_init(|| {
            let items = &self.archive.outbox.ordered_items;
            let visible = items
                .iter()
                .rev()
                .filter(|item| self.policy.allows(item))
                .cloned()
                .collect::<Vec<_>>();
            debug!(
                "event=posts_filter module=service status=ok total={} visible={} include_private={}",
                items.len(),
                visible.len(),
                self.policy.include_private_posts
            );
            visible
        })
    }

    /// Returns visible statuses, newest first.
    pub fn statuses(&self) -> impl Iterator<Item = &Status> + '_ {
        self.posts().iter().filter_map(OrderedItem::as_status)
    }

    /// Returns the post id -> `posts()` index lookup.
    ///
    /// Only visible statuses are indexed. On duplicate ids the later entry in
    /// `posts()` wins.
    pub fn posts_by_id(&self) -> &HashMap<String, usize> {
        self.posts_by_id.get_or_init(|| {
            let mut index = HashMap::new();
            for (position, item) in self.posts().iter().enumerate() {
                if let Some(status) = item.as_status() {
                    index.insert(status.post_id().to_string(), position);
                }
            }
            index
        })
    }

    /// Looks up a visible status by post id.
    pub fn post_by_id(&self, post_id: &str) -> Option<&Status> {
        let position = *self.posts_by_id().get(post_id)?;
        self.posts().get(position).and_then(OrderedItem::as_status)
    }

    /// Returns the reply chain ending at `post`, oldest ancestor first.
    ///
    /// The walk stops at the first reference that is missing, points to
    /// another domain, is hidden by the policy, or was already visited.
    pub fn previous_posts<'a>(&'a self, post: &'a Status) -> Vec<&'a Status> {
        let mut chain = vec![post];
        let mut visited = HashSet::from([post.post_id()]);
        let mut current = post;

        while let Some(in_reply_to) = current.object.in_reply_to.as_deref() {
            if !self.is_local_reference(in_reply_to) {
                break;
            }

            let parent_id = last_path_segment(in_reply_to);
            let Some(parent) = self.post_by_id(parent_id) else {
                break;
            };
            if !visited.insert(parent.post_id()) {
                warn!(
                    "event=thread_walk module=service status=error error_code=reply_cycle post_id={} parent_id={}",
                    post.post_id(),
                    parent_id
                );
                break;
            }

            chain.push(parent);
            current = parent;
        }

        chain.reverse();
        chain
    }

    fn is_local_reference(&self, reference: &str) -> bool {
        match Url::parse(reference) {
            Ok(parsed) => parsed.host_str() == Some(self.archive.domain()),
            Err(_) => false,
        }
    }
}
