//! Serde representation of document trees.

use upkeep::{
    Document, route,
    node::{CommentPlacement, Node},
    route::Key,
};

#[test]
fn test_document_round_trips_through_json() {
    let mut doc = Document::new();
    doc.set(&route!["name"], "custom").unwrap();
    doc.set(&route!["nested", "a"], 1i64).unwrap();
    doc.set(&route!["ratio"], 0.5f64).unwrap();
    doc.set(&route!["flags"], vec![Node::from(true), Node::from(false)])
        .unwrap();

    let bytes = serde_json::to_vec(&doc).unwrap();
    let restored: Document = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(restored, doc);
}

#[test]
fn test_comments_survive_round_trip() {
    let mut doc = Document::new();
    doc.set(&route!["port"], 8080i64).unwrap();
    doc.set_comment(&route!["port"], CommentPlacement::Block, "Listen port.");
    doc.set_comment(&route!["port"], CommentPlacement::Inline, "default");

    let bytes = serde_json::to_vec(&doc).unwrap();
    let restored: Document = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        restored.comment(&route!["port"], CommentPlacement::Block),
        Some("Listen port.")
    );
    assert_eq!(
        restored.comment(&route!["port"], CommentPlacement::Inline),
        Some("default")
    );
}

#[test]
fn test_typed_keys_survive_round_trip() {
    let mut doc = Document::new();
    doc.set(&route!["levels", 1], "first").unwrap();
    doc.set(&route!["levels", 2], "second").unwrap();

    let bytes = serde_json::to_vec(&doc).unwrap();
    let restored: Document = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(restored, doc);
    // The integer key is still an integer key, not its text rendering.
    let levels = restored.get(&route!["levels"]).unwrap().as_mapping().unwrap();
    assert!(levels.contains_key(&Key::Int(1)));
    assert!(!levels.contains_key(&Key::Text("1".into())));
}

#[test]
fn test_key_order_survives_round_trip() {
    let mut doc = Document::new();
    doc.set(&route!["zeta"], 1i64).unwrap();
    doc.set(&route!["alpha"], 2i64).unwrap();
    doc.set(&route!["mid"], 3i64).unwrap();

    let bytes = serde_json::to_vec(&doc).unwrap();
    let restored: Document = serde_json::from_slice(&bytes).unwrap();

    let keys: Vec<String> = restored.root().keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}
