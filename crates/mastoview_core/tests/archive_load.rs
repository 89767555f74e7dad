use mastoview_core::{
    ArchiveError, ArchiveRepository, DirArchiveRepository, MediaKind, PostService,
    VisibilityPolicy,
};
use serde_json::json;
use std::fs;

fn write_archive(dir: &std::path::Path, actor_url: &str) {
    let actor = json!({
        "@context": ["https://www.w3.org/ns/activitystreams"],
        "id": "https://social.example/users/alice",
        "type": "Person",
        "preferredUsername": "alice",
        "name": "Alice",
        "summary": "<p>hello</p>",
        "url": actor_url,
        "published": "2022-11-01T00:00:00Z",
        "icon": { "type": "Image", "mediaType": "image/png", "url": "avatar.png" },
        "image": { "type": "Image", "mediaType": "image/jpeg", "url": "header.jpg" },
        "attachment": [
            { "type": "PropertyValue", "name": "Site", "value": "<a href=\"https://alice.example\">alice.example</a>" }
        ]
    });
    let outbox = json!({
        "@context": "https://www.w3.org/ns/activitystreams",
        "id": "outbox.json",
        "type": "OrderedCollection",
        "totalItems": 2,
        "orderedItems": [
            {
                "id": "https://social.example/users/alice/statuses/10/activity",
                "type": "Create",
                "actor": "https://social.example/users/alice",
                "published": "2022-11-02T00:00:00Z",
                "to": ["https://www.w3.org/ns/activitystreams#Public"],
                "cc": ["https://social.example/users/alice/followers"],
                "object": {
                    "id": "https://social.example/users/alice/statuses/10",
                    "type": "Note",
                    "summary": null,
                    "inReplyTo": null,
                    "published": "2022-11-02T00:00:00Z",
                    "url": "https://social.example/@alice/10",
                    "attributedTo": "https://social.example/users/alice",
                    "to": ["https://www.w3.org/ns/activitystreams#Public"],
                    "cc": ["https://social.example/users/alice/followers"],
                    "sensitive": false,
                    "content": "<p>first</p>",
                    "contentMap": { "en": "<p>first</p>" },
                    "attachment": [
                        {
                            "type": "Document",
                            "mediaType": "video/mp4",
                            "url": "/media_attachments/files/1/clip.mp4",
                            "name": null,
                            "blurhash": "U00000fQfQfQfQfQfQfQfQfQfQfQ",
                            "width": 640,
                            "height": 480
                        }
                    ],
                    "tag": [
                        { "type": "Hashtag", "href": "https://social.example/tags/rust", "name": "#rust" }
                    ],
                    "replies": { "id": "https://social.example/users/alice/statuses/10/replies" }
                }
            },
            {
                "id": "https://social.example/users/alice/statuses/11/activity",
                "type": "Announce",
                "actor": "https://social.example/users/alice",
                "published": "2022-11-03T00:00:00Z",
                "to": ["https://www.w3.org/ns/activitystreams#Public"],
                "cc": [],
                "object": "https://other.example/users/bob/statuses/5"
            }
        ]
    });
    fs::write(dir.join("actor.json"), actor.to_string()).unwrap();
    fs::write(dir.join("outbox.json"), outbox.to_string()).unwrap();
}

#[test]
fn loads_real_shaped_export() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), "https://social.example/@alice");

    let archive = DirArchiveRepository::new(dir.path()).load_archive().unwrap();
    assert_eq!(archive.domain(), "social.example");
    assert_eq!(archive.outbox.ordered_items.len(), 2);
    assert_eq!(archive.actor.attachment[0].name, "Site");

    let service = PostService::new(archive, VisibilityPolicy::default());
    assert!(service.posts()[0].is_boost());
    let status = service.post_by_id("10").unwrap();
    assert_eq!(status.object.attachment[0].media_kind(), MediaKind::Video);
    assert_eq!(status.object.attachment[0].width, Some(640));
    assert_eq!(status.object.tag[0].name.as_deref(), Some("#rust"));
}

#[test]
fn missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = DirArchiveRepository::new(dir.path().join("nope"));
    let err = repo.load_archive().unwrap_err();
    assert!(matches!(err, ArchiveError::Io { .. }));
    assert!(err.to_string().contains("actor.json"));
}

#[test]
fn malformed_outbox_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), "https://social.example/@alice");
    fs::write(dir.path().join("outbox.json"), r#"{"orderedItems": 3}"#).unwrap();

    let err = DirArchiveRepository::new(dir.path())
        .load_archive()
        .unwrap_err();
    assert!(matches!(err, ArchiveError::Json { .. }));
}

#[test]
fn actor_url_without_host_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), "/@alice");

    let err = DirArchiveRepository::new(dir.path())
        .load_archive()
        .unwrap_err();
    assert!(matches!(err, ArchiveError::InvalidActorUrl(_)));
}

#[test]
fn null_attachment_content_and_tag_load_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), "https://social.example/@alice");
    let outbox = json!({
        "orderedItems": [
            {
                "id": "https://social.example/users/alice/statuses/20/activity",
                "type": "Create",
                "object": {
                    "id": "https://social.example/users/alice/statuses/20",
                    "to": ["https://www.w3.org/ns/activitystreams#Public"],
                    "cc": null,
                    "content": null,
                    "attachment": null,
                    "tag": null
                }
            }
        ]
    });
    fs::write(dir.path().join("outbox.json"), outbox.to_string()).unwrap();

    let archive = DirArchiveRepository::new(dir.path()).load_archive().unwrap();
    let service = PostService::new(archive, VisibilityPolicy::default());
    let status = service.post_by_id("20").expect("public post should be listed");
    assert!(status.object.content.is_empty());
    assert!(status.object.attachment.is_empty());
    assert!(status.object.tag.is_empty());
}

#[test]
fn bad_item_error_names_the_item() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), "https://social.example/@alice");
    let outbox = json!({
        "orderedItems": [
            {
                "id": "https://social.example/users/alice/statuses/21/activity",
                "type": "Create",
                "object": {
                    "id": "https://social.example/users/alice/statuses/21",
                    "attachment": [{ "url": 7 }]
                }
            }
        ]
    });
    fs::write(dir.path().join("outbox.json"), outbox.to_string()).unwrap();

    let err = DirArchiveRepository::new(dir.path())
        .load_archive()
        .unwrap_err();
    assert!(matches!(err, ArchiveError::Json { .. }));
    let message = err.to_string();
    assert!(
        message.contains("statuses/21/activity"),
        "unexpected error: {message}"
    );
}
