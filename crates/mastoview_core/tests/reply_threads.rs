use mastoview_core::{Archive, Outbox, PostService, VisibilityPolicy, PUBLIC_RECIPIENT};
use serde_json::{json, Value};

const FOLLOWERS: &str = "https://social.example/users/alice/followers";

fn post_uri(id: &str) -> String {
    format!("https://social.example/users/alice/statuses/{id}")
}

fn status(id: &str, in_reply_to: Option<String>, public: bool) -> Value {
    let (to, cc) = if public {
        (vec![PUBLIC_RECIPIENT], vec![FOLLOWERS])
    } else {
        (vec![FOLLOWERS], vec![])
    };
    json!({
        "id": format!("{}/activity", post_uri(id)),
        "type": "Create",
        "object": {
            "id": post_uri(id),
            "type": "Note",
            "inReplyTo": in_reply_to,
            "to": to,
            "cc": cc
        }
    })
}

fn service(items: Vec<Value>, include_private_posts: bool) -> PostService {
    let actor = serde_json::from_value(json!({
        "id": "https://social.example/users/alice",
        "preferredUsername": "alice",
        "url": "https://social.example/@alice"
    }))
    .unwrap();
    let outbox: Outbox = serde_json::from_value(json!({ "orderedItems": items })).unwrap();
    PostService::new(
        Archive::new(actor, outbox).unwrap(),
        VisibilityPolicy::new(include_private_posts),
    )
}

fn chain_ids(service: &PostService, target: &str) -> Vec<String> {
    let post = service.post_by_id(target).expect("target should be listed");
    service
        .previous_posts(post)
        .iter()
        .map(|status| status.post_id().to_string())
        .collect()
}

#[test]
fn local_chain_is_returned_oldest_first() {
    let service = service(
        vec![
            status("a", None, true),
            status("b", Some(post_uri("a")), true),
            status("c", Some(post_uri("b")), true),
        ],
        false,
    );
    assert_eq!(chain_ids(&service, "c"), vec!["a", "b", "c"]);
    assert_eq!(chain_ids(&service, "b"), vec!["a", "b"]);
    assert_eq!(chain_ids(&service, "a"), vec!["a"]);
}

#[test]
fn reply_to_external_domain_stops_immediately() {
    let service = service(
        vec![
            status("a", None, true),
            status(
                "b",
                Some("https://elsewhere.example/users/bob/statuses/a".to_string()),
                true,
            ),
        ],
        false,
    );
    assert_eq!(chain_ids(&service, "b"), vec!["b"]);
}

#[test]
fn missing_parent_truncates_chain() {
    let service = service(
        vec![
            status("b", Some(post_uri("gone")), true),
            status("c", Some(post_uri("b")), true),
        ],
        false,
    );
    assert_eq!(chain_ids(&service, "c"), vec!["b", "c"]);
}

#[test]
fn parent_hidden_by_policy_truncates_chain() {
    let items = vec![
        status("a", None, true),
        status("b", Some(post_uri("a")), false),
        status("c", Some(post_uri("b")), true),
    ];

    let filtered = service(items.clone(), false);
    assert_eq!(chain_ids(&filtered, "c"), vec!["c"]);

    let unfiltered = service(items, true);
    assert_eq!(chain_ids(&unfiltered, "c"), vec!["a", "b", "c"]);
}

#[test]
fn domain_comparison_ignores_host_case() {
    let service = service(
        vec![
            status("a", None, true),
            status(
                "b",
                Some("https://SOCIAL.example/users/alice/statuses/a".to_string()),
                true,
            ),
        ],
        false,
    );
    assert_eq!(chain_ids(&service, "b"), vec!["a", "b"]);
}
