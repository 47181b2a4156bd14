//! Update engine scenarios: coordinator, relocator and merger working
//! together on realistic document pairs.

use upkeep::{
    Document, route,
    node::{CommentPlacement, Node, Scalar},
    update::{Relocation, SequencePolicy, UpdateOutcome, UpdateSettings, VersionAheadPolicy},
    version::Pattern,
};

use crate::helpers::{int_at, integer_settings, root_keys, text_at, version_route};

fn defaults_v2() -> Document {
    let mut defaults = Document::new();
    defaults.set(&version_route(), 2i64).unwrap();
    defaults.set(&route!["name"], "default").unwrap();
    defaults.set(&route!["nested", "a"], 1i64).unwrap();
    defaults
}

#[test]
fn test_relocated_key_survives_release_bump() {
    // A release-1 document whose `old-key` moved to `nested.a` in release 2.
    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["name"], "custom").unwrap();
    user.set(&route!["old-key"], "keep").unwrap();

    let pattern = Pattern::integer();
    let v2 = pattern.parse("2").unwrap();
    let settings = UpdateSettings::versioned(version_route(), pattern)
        .with_relocations(v2, [Relocation::new(route!["old-key"], route!["nested", "a"])]);

    let outcome = user.update(&defaults_v2(), &settings).unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated);

    assert_eq!(int_at(&user, &version_route()), 2);
    assert_eq!(text_at(&user, &route!["name"]), "custom");
    assert_eq!(text_at(&user, &route!["nested", "a"]), "keep");
    assert!(!user.contains(&route!["old-key"]));
}

#[test]
fn test_missing_keys_supplied_with_comments() {
    let mut defaults = Document::new();
    defaults.set(&version_route(), 1i64).unwrap();
    defaults.set(&route!["timeout"], 30i64).unwrap();
    defaults.set_comment(
        &route!["timeout"],
        CommentPlacement::Block,
        "Seconds before giving up.",
    );

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();

    user.update(&defaults, &integer_settings()).unwrap();

    assert_eq!(int_at(&user, &route!["timeout"]), 30);
    assert_eq!(
        user.comment(&route!["timeout"], CommentPlacement::Block),
        Some("Seconds before giving up.")
    );
}

#[test]
fn test_customized_leaves_and_their_comments_are_preserved() {
    let mut defaults = Document::new();
    defaults.set(&version_route(), 1i64).unwrap();
    defaults.set(&route!["limits", "workers"], 4i64).unwrap();

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["limits", "workers"], 32i64).unwrap();
    user.set_comment(
        &route!["limits", "workers"],
        CommentPlacement::Inline,
        "tuned for the big box",
    );

    user.update(&defaults, &integer_settings()).unwrap();

    assert_eq!(int_at(&user, &route!["limits", "workers"]), 32);
    assert_eq!(
        user.comment(&route!["limits", "workers"], CommentPlacement::Inline),
        Some("tuned for the big box")
    );
}

#[test]
fn test_obsolete_keys_are_pruned() {
    let mut user = Document::new();
    user.set(&version_route(), 2i64).unwrap();
    user.set(&route!["name"], "custom").unwrap();
    user.set(&route!["retired"], "stale").unwrap();
    user.set(&route!["nested", "a"], 9i64).unwrap();
    user.set(&route!["nested", "gone"], true).unwrap();

    user.update(&defaults_v2(), &integer_settings()).unwrap();

    assert!(!user.contains(&route!["retired"]));
    assert!(!user.contains(&route!["nested", "gone"]));
    assert_eq!(int_at(&user, &route!["nested", "a"]), 9);
}

#[test]
fn test_ignored_routes_shield_user_extensions() {
    let pattern = Pattern::integer();
    let v2 = pattern.parse("2").unwrap();
    let settings = UpdateSettings::versioned(version_route(), pattern)
        .with_ignored_routes(v2, [route!["plugins"]]);

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["plugins", "custom", "enabled"], true).unwrap();
    user.set(&route!["stale"], "x").unwrap();

    user.update(&defaults_v2(), &settings).unwrap();

    // Everything under the ignored route survives, the rest is pruned.
    assert!(user.contains(&route!["plugins", "custom", "enabled"]));
    assert!(!user.contains(&route!["stale"]));
}

#[test]
fn test_ignored_routes_accumulate_across_transitions() {
    let pattern = Pattern::integer();
    let v2 = pattern.parse("2").unwrap();
    let v3 = pattern.parse("3").unwrap();

    let mut defaults = Document::new();
    defaults.set(&version_route(), 3i64).unwrap();

    let settings = UpdateSettings::versioned(version_route(), pattern)
        .with_ignored_routes(v2, [route!["from-two"]])
        .with_ignored_routes(v3, [route!["from-three"]]);

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["from-two"], "a").unwrap();
    user.set(&route!["from-three"], "b").unwrap();
    user.set(&route!["unprotected"], "c").unwrap();

    user.update(&defaults, &settings).unwrap();

    assert!(user.contains(&route!["from-two"]));
    assert!(user.contains(&route!["from-three"]));
    assert!(!user.contains(&route!["unprotected"]));
}

#[test]
fn test_relocations_chain_across_transitions() {
    let pattern = Pattern::integer();
    let v2 = pattern.parse("2").unwrap();
    let v3 = pattern.parse("3").unwrap();

    let mut defaults = Document::new();
    defaults.set(&version_route(), 3i64).unwrap();
    defaults.set(&route!["third"], "default").unwrap();

    // Release 2 renamed first -> second, release 3 renamed second -> third.
    let settings = UpdateSettings::versioned(version_route(), pattern)
        .with_relocations(v2, [Relocation::new(route!["first"], route!["second"])])
        .with_relocations(v3, [Relocation::new(route!["second"], route!["third"])]);

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["first"], "value").unwrap();

    user.update(&defaults, &settings).unwrap();

    assert_eq!(text_at(&user, &route!["third"]), "value");
    assert!(!user.contains(&route!["first"]));
    assert!(!user.contains(&route!["second"]));
    assert_eq!(int_at(&user, &version_route()), 3);
}

#[test]
fn test_structural_conflict_favors_defaults() {
    let mut defaults = Document::new();
    defaults.set(&version_route(), 1i64).unwrap();
    defaults.set(&route!["limits", "workers"], 4i64).unwrap();

    // The user flattened `limits` into a scalar; the template wins.
    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["limits"], "broken").unwrap();

    user.update(&defaults, &integer_settings()).unwrap();

    assert!(user.get(&route!["limits"]).unwrap().is_mapping());
    assert_eq!(int_at(&user, &route!["limits", "workers"]), 4);
}

#[test]
fn test_scalar_vs_sequence_is_a_structural_conflict() {
    let mut defaults = Document::new();
    defaults.set(&version_route(), 1i64).unwrap();
    defaults
        .set(&route!["hosts"], vec![Node::from("a"), Node::from("b")])
        .unwrap();

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["hosts"], "not-a-list").unwrap();

    user.update(&defaults, &integer_settings()).unwrap();

    assert_eq!(user.get(&route!["hosts"]).unwrap().as_sequence().unwrap().len(), 2);
}

#[test]
fn test_result_follows_defaults_key_order() {
    let mut defaults = Document::new();
    defaults.set(&version_route(), 2i64).unwrap();
    defaults.set(&route!["alpha"], 1i64).unwrap();
    defaults.set(&route!["beta"], 2i64).unwrap();

    let pattern = Pattern::integer();
    let v2 = pattern.parse("2").unwrap();
    let settings = UpdateSettings::versioned(version_route(), pattern)
        .with_ignored_routes(v2, [route!["zeta"], route!["eta"]]);

    // A release-1 user wrote keys in a different order and added two
    // extensions that release 2 whitelists.
    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["zeta"], 1i64).unwrap();
    user.set(&route!["beta"], 20i64).unwrap();
    user.set(&route!["eta"], 2i64).unwrap();
    user.set(&route!["alpha"], 10i64).unwrap();

    user.update(&defaults, &settings).unwrap();

    // Defaults order first, surviving user keys after in their own order.
    assert_eq!(
        root_keys(&user),
        vec!["config-version", "alpha", "beta", "zeta", "eta"]
    );
}

#[test]
fn test_equal_versions_still_merge_template_additions() {
    let mut defaults = defaults_v2();
    defaults.set(&route!["added-later"], true).unwrap();

    let mut user = Document::new();
    user.set(&version_route(), 2i64).unwrap();
    user.set(&route!["name"], "custom").unwrap();

    let outcome = user.update(&defaults, &integer_settings()).unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated);
    assert!(user.contains(&route!["added-later"]));
    assert_eq!(text_at(&user, &route!["name"]), "custom");
}

#[test]
fn test_version_ahead_fails_by_default() {
    let mut user = Document::new();
    user.set(&version_route(), 5i64).unwrap();
    user.set(&route!["name"], "from the future").unwrap();
    let before = user.clone();

    let err = user.update(&defaults_v2(), &integer_settings()).unwrap_err();
    assert!(err.is_version_ahead());
    // A failed pass leaves the document untouched.
    assert_eq!(user, before);
}

#[test]
fn test_version_ahead_skip_policy_leaves_document_alone() {
    let settings = integer_settings().with_version_ahead(VersionAheadPolicy::SkipUpdate);

    let mut user = Document::new();
    user.set(&version_route(), 5i64).unwrap();
    user.set(&route!["only-here"], 1i64).unwrap();
    let before = user.clone();

    let outcome = user.update(&defaults_v2(), &settings).unwrap();

    assert_eq!(outcome, UpdateOutcome::Skipped);
    assert_eq!(user, before);
}

#[test]
fn test_missing_user_marker_merges_without_relocations() {
    let pattern = Pattern::integer();
    let v2 = pattern.parse("2").unwrap();
    let settings = UpdateSettings::versioned(version_route(), pattern)
        .with_relocations(v2, [Relocation::new(route!["old-key"], route!["nested", "a"])]);

    let mut user = Document::new();
    user.set(&route!["old-key"], "keep").unwrap();

    user.update(&defaults_v2(), &settings).unwrap();

    // No starting version, so the relocation did not run and `old-key` was
    // pruned as obsolete; the defaults version was stamped.
    assert!(!user.contains(&route!["old-key"]));
    assert_eq!(int_at(&user, &route!["nested", "a"]), 1);
    assert_eq!(int_at(&user, &version_route()), 2);
}

#[test]
fn test_missing_defaults_marker_is_fatal() {
    let mut defaults = Document::new();
    defaults.set(&route!["name"], "default").unwrap();

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();

    let err = user.update(&defaults, &integer_settings()).unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_unversioned_settings_merge_directly() {
    let mut defaults = Document::new();
    defaults.set(&route!["a"], 1i64).unwrap();

    let mut user = Document::new();
    user.set(&route!["a"], 10i64).unwrap();
    user.set(&route!["stale"], true).unwrap();

    let outcome = user.update(&defaults, &UpdateSettings::unversioned()).unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated);
    assert_eq!(int_at(&user, &route!["a"]), 10);
    assert!(!user.contains(&route!["stale"]));
    // No marker appears out of nowhere.
    assert!(!user.contains(&version_route()));
}

#[test]
fn test_update_is_idempotent() {
    let pattern = Pattern::integer();
    let v2 = pattern.parse("2").unwrap();
    let settings = UpdateSettings::versioned(version_route(), pattern)
        .with_relocations(v2, [Relocation::new(route!["old-key"], route!["nested", "a"])]);

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["name"], "custom").unwrap();
    user.set(&route!["old-key"], "keep").unwrap();

    let defaults = defaults_v2();
    user.update(&defaults, &settings).unwrap();
    let first_pass = user.clone();

    user.update(&defaults, &settings).unwrap();
    assert_eq!(user, first_pass);
}

#[test]
fn test_completeness_every_defaults_route_resolves() {
    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["name"], "custom").unwrap();

    let defaults = defaults_v2();
    user.update(&defaults, &integer_settings()).unwrap();

    for route in defaults.routes() {
        assert!(user.contains(&route), "route {route} missing from result");
    }
}

#[test]
fn test_atomic_sequences_are_kept_verbatim() {
    let mut defaults = Document::new();
    defaults.set(&version_route(), 1i64).unwrap();
    defaults
        .set(&route!["hosts"], vec![Node::from("a"), Node::from("b")])
        .unwrap();

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["hosts"], vec![Node::from("mine")]).unwrap();

    user.update(&defaults, &integer_settings()).unwrap();

    let hosts = user.get(&route!["hosts"]).unwrap().as_sequence().unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].as_scalar(), Some(&Scalar::Text("mine".into())));
}

#[test]
fn test_elementwise_sequences_merge_per_index() {
    let settings = integer_settings().with_sequence_policy(SequencePolicy::Elementwise);

    let mut defaults = Document::new();
    defaults.set(&version_route(), 1i64).unwrap();
    defaults
        .set(
            &route!["endpoints"],
            vec![
                Node::from("https://primary"),
                Node::from("https://secondary"),
                Node::from("https://tertiary"),
            ],
        )
        .unwrap();

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(
        &route!["endpoints"],
        vec![
            Node::from("https://mine-0"),
            Node::from("https://mine-1"),
            Node::from("https://mine-2"),
            Node::from("https://extra"),
        ],
    )
    .unwrap();

    user.update(&defaults, &settings).unwrap();

    let endpoints = user.get(&route!["endpoints"]).unwrap().as_sequence().unwrap();
    // Per-index leaves keep the user value; trailing extras are pruned.
    assert_eq!(endpoints.len(), 3);
    assert_eq!(endpoints[0].as_scalar(), Some(&Scalar::Text("https://mine-0".into())));
    assert_eq!(endpoints[2].as_scalar(), Some(&Scalar::Text("https://mine-2".into())));
}

#[test]
fn test_elementwise_supplies_missing_elements() {
    let settings = integer_settings().with_sequence_policy(SequencePolicy::Elementwise);

    let mut defaults = Document::new();
    defaults.set(&version_route(), 1i64).unwrap();
    defaults
        .set(&route!["steps"], vec![Node::from(1), Node::from(2)])
        .unwrap();

    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set(&route!["steps"], vec![Node::from(10)]).unwrap();

    user.update(&defaults, &settings).unwrap();

    let steps = user.get(&route!["steps"]).unwrap().as_sequence().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].as_scalar(), Some(&Scalar::Int(10)));
    assert_eq!(steps[1].as_scalar(), Some(&Scalar::Int(2)));
}

#[test]
fn test_stamp_keeps_marker_comments() {
    let mut user = Document::new();
    user.set(&version_route(), 1i64).unwrap();
    user.set_comment(
        &version_route(),
        CommentPlacement::Block,
        "Managed by the updater, do not edit.",
    );

    user.update(&defaults_v2(), &integer_settings()).unwrap();

    assert_eq!(int_at(&user, &version_route()), 2);
    assert_eq!(
        user.comment(&version_route(), CommentPlacement::Block),
        Some("Managed by the updater, do not edit.")
    );
}

#[test]
fn test_dotted_version_chain_end_to_end() {
    let pattern = Pattern::new(vec![
        upkeep::version::Segment::range(1, 10).unwrap(),
        upkeep::version::Segment::literal(["."]).unwrap(),
        upkeep::version::Segment::range(0, 10).unwrap(),
    ])
    .unwrap();
    let v2_0 = pattern.parse("2.0").unwrap();

    let mut defaults = Document::new();
    defaults.set(&version_route(), "2.0").unwrap();
    defaults.set(&route!["renamed"], "default").unwrap();

    let settings = UpdateSettings::versioned(version_route(), pattern)
        .with_relocations(v2_0, [Relocation::new(route!["original"], route!["renamed"])]);

    let mut user = Document::new();
    user.set(&version_route(), "1.9").unwrap();
    user.set(&route!["original"], "mine").unwrap();

    user.update(&defaults, &settings).unwrap();

    assert_eq!(text_at(&user, &route!["renamed"]), "mine");
    // Non-integer markers stamp as text.
    assert_eq!(text_at(&user, &version_route()), "2.0");
}
