//! Actor profile model.
//!
//! # Responsibility
//! - Mirror the exported ActivityPub actor document.
//! - Provide the profile projection rendered by the viewer.
//!
//! # Invariants
//! - `url` is the account's canonical profile URL; its host is the account
//!   domain used to tell local replies from external ones.

use crate::model::null_as_default;
use serde::{Deserialize, Serialize};
use url::Url;

/// Exported account profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    pub preferred_username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    pub url: String,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub icon: Option<ImageRef>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Profile metadata fields (`PropertyValue` entries).
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachment: Vec<ProfileField>,
}

/// Avatar or header image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub media_type: Option<String>,
    pub url: String,
}

/// One name/value profile field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileField {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    pub name: String,
    /// HTML fragment as exported.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// Profile projection consumed by page rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub preferred_username: String,
    pub summary: String,
    pub published: Option<String>,
    pub attachment: Vec<ProfileField>,
    pub icon: Option<ImageRef>,
    pub image: Option<ImageRef>,
}

impl Actor {
    /// Returns the host of the actor profile URL, lowercased.
    ///
    /// Returns `None` when `url` is not an absolute URL with a host.
    pub fn domain(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
    }

    /// Builds the profile projection.
    pub fn profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            preferred_username: self.preferred_username.clone(),
            summary: self.summary.clone(),
            published: self.published.clone(),
            attachment: self.attachment.clone(),
            icon: self.icon.clone(),
            image: self.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Actor;

    fn actor_with_url(url: &str) -> Actor {
        serde_json::from_value(serde_json::json!({
            "id": "https://social.example/users/alice",
            "type": "Person",
            "preferredUsername": "alice",
            "url": url
        }))
        .expect("actor fixture should decode")
    }

    #[test]
    fn domain_is_lowercased_host() {
        let actor = actor_with_url("https://Social.Example/@alice");
        assert_eq!(actor.domain().as_deref(), Some("social.example"));
    }

    #[test]
    fn domain_is_none_for_relative_url() {
        let actor = actor_with_url("/@alice");
        assert_eq!(actor.domain(), None);
    }
}
