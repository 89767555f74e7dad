//! Outbox activity model.
//!
//! # Responsibility
//! - Mirror the exported `OrderedCollection` of account activities.
//! - Represent each ordered item as an explicit Status/Boost sum type.
//!
//! # Invariants
//! - An item whose `object` is an embedded object is a `Status`.
//! - An item whose `object` is a bare reference string is a `Boost`.
//! - `ordered_items` keeps export order (oldest first).

use crate::model::null_as_default;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// ActivityStreams address meaning "everyone".
pub const PUBLIC_RECIPIENT: &str = "https://www.w3.org/ns/activitystreams#Public";

/// Exported outbox collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outbox {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub total_items: Option<u64>,
    pub ordered_items: Vec<OrderedItem>,
}

/// One outbox entry.
///
/// The variant is chosen by the shape of `object`: reference string for
/// `Boost`, anything else for `Status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrderedItem {
    Status(Status),
    Boost(Boost),
}

impl<'de> Deserialize<'de> for OrderedItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let item_id = value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<missing id>")
            .to_string();
        let is_boost = value.get("object").is_some_and(Value::is_string);

        let decoded = if is_boost {
            Boost::deserialize(value).map(Self::Boost)
        } else {
            Status::deserialize(value).map(Self::Status)
        };
        decoded.map_err(|err| D::Error::custom(format!("outbox item `{item_id}`: {err}")))
    }
}

/// Envelope fields shared by every outbox activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actor: String,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cc: Vec<String>,
}

/// An original post (`Create` activity with an embedded note).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(flatten)]
    pub activity: Activity,
    pub object: StatusObject,
}

/// A reshare of another object, known only by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boost {
    #[serde(flatten)]
    pub activity: Activity,
    /// URI of the reshared object.
    pub object: String,
}

/// Embedded post object carried by a `Status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusObject {
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub in_reply_to: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub attributed_to: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cc: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sensitive: bool,
    /// HTML body as exported.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachment: Vec<Attachment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: Vec<Tag>,
}

/// Media file linked from a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub blurhash: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub focal_point: Option<Vec<f64>>,
}

/// Hashtag, mention or emoji reference on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Coarse media class derived from `mediaType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }
}

impl OrderedItem {
    /// Returns whether this entry is an original post.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    /// Returns whether this entry is a reshare.
    pub fn is_boost(&self) -> bool {
        matches!(self, Self::Boost(_))
    }

    pub fn as_status(&self) -> Option<&Status> {
        match self {
            Self::Status(status) => Some(status),
            Self::Boost(_) => None,
        }
    }

    pub fn as_boost(&self) -> Option<&Boost> {
        match self {
            Self::Boost(boost) => Some(boost),
            Self::Status(_) => None,
        }
    }

    /// Envelope of either variant.
    pub fn activity(&self) -> &Activity {
        match self {
            Self::Status(status) => &status.activity,
            Self::Boost(boost) => &boost.activity,
        }
    }
}

impl Status {
    /// Returns the trailing `/` segment of `object.id`.
    ///
    /// Empty when the id ends with `/`.
    pub fn post_id(&self) -> &str {
        last_path_segment(&self.object.id)
    }
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.media_type.starts_with("video/")
    }

    pub fn is_audio(&self) -> bool {
        self.media_type.starts_with("audio/")
    }

    pub fn media_kind(&self) -> MediaKind {
        if self.is_image() {
            MediaKind::Image
        } else if self.is_video() {
            MediaKind::Video
        } else if self.is_audio() {
            MediaKind::Audio
        } else {
            MediaKind::Other
        }
    }
}

/// Returns the text after the last `/`, or the whole value when no `/`.
pub(crate) fn last_path_segment(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::{last_path_segment, Attachment, MediaKind, OrderedItem};
    use serde_json::json;

    fn attachment(media_type: &str) -> Attachment {
        serde_json::from_value(json!({
            "type": "Document",
            "mediaType": media_type,
            "url": "/media_attachments/files/1.bin"
        }))
        .expect("attachment fixture should decode")
    }

    #[test]
    fn string_object_decodes_as_boost() {
        let item: OrderedItem = serde_json::from_value(json!({
            "id": "https://social.example/users/alice/statuses/1/activity",
            "type": "Announce",
            "object": "https://elsewhere.example/notes/9"
        }))
        .unwrap();
        assert!(item.is_boost());
        assert_eq!(
            item.as_boost().map(|boost| boost.object.as_str()),
            Some("https://elsewhere.example/notes/9")
        );
    }

    #[test]
    fn embedded_object_decodes_as_status() {
        let item: OrderedItem = serde_json::from_value(json!({
            "id": "https://social.example/users/alice/statuses/2/activity",
            "type": "Create",
            "object": {
                "id": "https://social.example/users/alice/statuses/2",
                "type": "Note",
                "inReplyTo": null,
                "to": ["https://www.w3.org/ns/activitystreams#Public"],
                "cc": []
            }
        }))
        .unwrap();
        let status = item.as_status().expect("should be a status");
        assert_eq!(status.post_id(), "2");
        assert!(status.object.attachment.is_empty());
    }

    #[test]
    fn null_collections_and_content_decode_as_empty() {
        let item: OrderedItem = serde_json::from_value(json!({
            "id": "a1",
            "type": "Create",
            "to": null,
            "object": {
                "id": "https://s.example/s/1",
                "content": null,
                "attachment": null,
                "tag": null,
                "sensitive": null
            }
        }))
        .unwrap();
        let status = item.as_status().expect("should be a status");
        assert!(status.object.content.is_empty());
        assert!(status.object.attachment.is_empty());
        assert!(status.object.tag.is_empty());
        assert!(!status.object.sensitive);
        assert!(status.activity.to.is_empty());
    }

    #[test]
    fn status_decode_error_names_item_and_field() {
        let err = serde_json::from_value::<OrderedItem>(json!({
            "id": "a2",
            "type": "Create",
            "object": { "id": "https://s.example/s/2", "attachment": "oops" }
        }))
        .unwrap_err()
        .to_string();
        assert!(err.contains("outbox item `a2`"), "unexpected error: {err}");
        assert!(!err.contains("untagged"), "unexpected error: {err}");
    }

    #[test]
    fn media_kind_uses_media_type_prefix() {
        assert_eq!(attachment("image/png").media_kind(), MediaKind::Image);
        assert_eq!(attachment("video/mp4").media_kind(), MediaKind::Video);
        assert_eq!(attachment("audio/ogg").media_kind(), MediaKind::Audio);
        assert_eq!(attachment("text/plain").media_kind(), MediaKind::Other);
        assert!(!attachment("imagex/png").is_image());
    }

    #[test]
    fn last_path_segment_matches_trailing_component() {
        assert_eq!(last_path_segment("https://a.example/s/42"), "42");
        assert_eq!(last_path_segment("https://a.example/s/"), "");
        assert_eq!(last_path_segment("plain"), "plain");
    }
}
