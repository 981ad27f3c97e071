//! Integration tests for the filter helper.
//!
//! These tests drive the public surface the way a list view would: set
//! criteria, react to notifications, filter a catalog.

use catalog::parser::parse_entries_json;
use catalog::{Catalog, Entry, EntryId, TagIndex};
use filters::{Criteria, FilterConfig, FilterError, FilterHelper, FilterKind, TagSelection};
use fuzzy::NucleoSearch;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn create_test_entries() -> Vec<Entry> {
    vec![
        Entry::character(1, "Alice", "alice.png").with_fav(true),
        Entry::character(2, "Bob", "bob.png"),
        Entry::group("g1", "Alice's Group"),
    ]
}

fn create_test_catalog() -> Catalog {
    let entries = parse_entries_json(
        r#"[
            {"type": "character", "id": 1, "item": {"name": "Alice", "avatar": "alice.png", "fav": true}},
            {"type": "character", "id": 2, "item": {"name": "Bob", "avatar": "bob.png", "fav": "false"}},
            {"type": "character", "id": 3, "item": {"name": "Carol", "avatar": "carol.png", "fav": "true"}},
            {"type": "group", "id": "g1", "item": {"name": "Alice's Group", "fav": false}},
            {"type": "tag", "id": "t1", "item": {"name": "fantasy"}},
            {"type": "deck", "id": "d1", "item": {"name": "Party", "characters": ["3"]}},
            {"type": "world_info", "item": {"uid": 7, "key": ["dragon"], "comment": "Dragons"}},
            {"type": "world_info", "item": {"uid": 8, "key": ["harbor"], "comment": "Port town"}}
        ]"#,
        "catalog.json",
    )
    .unwrap();

    let mut tags = TagIndex::new();
    tags.insert("alice.png", vec!["a".to_string(), "b".to_string()]);
    tags.insert("bob.png", vec!["a".to_string()]);
    tags.insert("carol.png", vec!["a".to_string(), "b".to_string(), "nsfw".to_string()]);
    tags.insert("g1", vec!["b".to_string()]);

    Catalog::new(entries, tags)
}

fn ids(entries: &[Entry]) -> Vec<String> {
    entries.iter().map(|e| e.label()).collect()
}

fn counting_helper() -> (FilterHelper, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let helper = FilterHelper::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (helper, count)
}

#[test]
fn test_defaults_are_identity() {
    let catalog = create_test_catalog();
    let (helper, _) = counting_helper();
    let helper = helper.with_tag_index(Arc::new(catalog.tag_index().clone()));

    let filtered = helper.apply_filters(catalog.entries());
    assert_eq!(filtered, catalog.entries());
    assert!(!helper.is_filtered());
}

#[test]
fn test_filtering_is_idempotent() {
    let catalog = create_test_catalog();
    let (helper, _) = counting_helper();
    let mut helper = helper
        .with_tag_index(Arc::new(catalog.tag_index().clone()))
        .with_config(FilterConfig {
            fuzzy_search: false,
            hide_deck_members: true,
        });

    helper
        .set_criteria(FilterKind::Tag, TagSelection::default().select("a").into(), false)
        .unwrap();
    helper
        .set_criteria(FilterKind::Search, Criteria::search("o"), false)
        .unwrap();

    let once = helper.apply_filters(catalog.entries());
    let twice = helper.apply_filters(&once);
    assert_eq!(once, twice);
    assert_eq!(ids(&once), vec!["character 2 (Bob)", "character 3 (Carol)"]);
}

#[test]
fn test_search_scenario() {
    let (mut helper, _) = counting_helper();
    helper
        .set_criteria(FilterKind::Search, Criteria::search("alice"), false)
        .unwrap();

    let filtered = helper.apply_filters(&create_test_entries());
    assert_eq!(
        filtered,
        vec![
            Entry::character(1, "Alice", "alice.png").with_fav(true),
            Entry::group("g1", "Alice's Group"),
        ]
    );
}

#[test]
fn test_favorite_scenario() {
    let (mut helper, _) = counting_helper();
    helper
        .set_criteria(FilterKind::Favorite, Criteria::Favorite(true), false)
        .unwrap();

    let filtered = helper.apply_filters(&create_test_entries());
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, Some(EntryId::Int(1)));
}

#[test]
fn test_favorite_accepts_legacy_strings() {
    let catalog = create_test_catalog();
    let (mut helper, _) = counting_helper();
    helper
        .set_criteria(FilterKind::Favorite, Criteria::Favorite(true), false)
        .unwrap();

    let filtered = helper.apply_filters(catalog.entries());
    assert_eq!(
        ids(&filtered),
        vec!["character 1 (Alice)", "character 3 (Carol)"]
    );
}

#[test]
fn test_deck_scenario() {
    let mut entries = vec![
        Entry::character(1, "Alice", "alice.png"),
        Entry::character(2, "Bob", "bob.png"),
    ];
    let deck = r#"[{"type": "deck", "item": {"characters": ["1"]}}]"#;
    entries.extend(parse_entries_json(deck, "deck.json").unwrap());

    let (helper, _) = counting_helper();
    let helper = helper.with_config(FilterConfig {
        fuzzy_search: false,
        hide_deck_members: true,
    });

    let filtered = helper.apply_filters(&entries);
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].id, Some(EntryId::Int(2)));
    assert_eq!(filtered[1], entries[2]);
}

#[test]
fn test_deck_sees_only_surviving_entries() {
    let catalog = create_test_catalog();
    let (helper, _) = counting_helper();
    let mut helper = helper.with_config(FilterConfig {
        fuzzy_search: false,
        hide_deck_members: true,
    });

    // Carol is hidden by the deck while the deck is listed
    let all = helper.apply_filters(catalog.entries());
    assert!(!ids(&all).contains(&"character 3 (Carol)".to_string()));

    // Search drops the deck upstream, so Carol comes back
    helper
        .set_criteria(FilterKind::Search, Criteria::search("carol"), false)
        .unwrap();
    let filtered = helper.apply_filters(catalog.entries());
    assert_eq!(ids(&filtered), vec!["character 3 (Carol)"]);
}

#[test]
fn test_tag_exclusion_scenario() {
    let catalog = create_test_catalog();
    let (helper, _) = counting_helper();
    let mut helper = helper.with_tag_index(Arc::new(catalog.tag_index().clone()));

    helper
        .set_criteria(
            FilterKind::Tag,
            TagSelection::default().exclude("nsfw").into(),
            false,
        )
        .unwrap();

    let filtered = helper.apply_filters(catalog.entries());
    let labels = ids(&filtered);
    assert!(!labels.contains(&"character 3 (Carol)".to_string()));
    // Not in the tag index at all
    assert!(labels.contains(&"tag t1 (fantasy)".to_string()));
    assert_eq!(filtered.len(), catalog.entries().len() - 1);
}

#[test]
fn test_tag_exclusion_beats_selection() {
    let catalog = create_test_catalog();
    let (helper, _) = counting_helper();
    let mut helper = helper.with_tag_index(Arc::new(catalog.tag_index().clone()));

    helper
        .set_criteria(
            FilterKind::Tag,
            TagSelection::new(["a", "b"], ["nsfw"]).into(),
            false,
        )
        .unwrap();

    let filtered = helper.apply_filters(catalog.entries());
    assert_eq!(ids(&filtered), vec!["character 1 (Alice)"]);
}

#[test]
fn test_selected_tags_combine_with_and() {
    let catalog = create_test_catalog();
    let (helper, _) = counting_helper();
    let mut helper = helper.with_tag_index(Arc::new(catalog.tag_index().clone()));

    helper
        .set_criteria(FilterKind::Tag, TagSelection::new(["a"], Vec::<String>::new()).into(), false)
        .unwrap();
    let only_a = helper.apply_filters(catalog.entries());
    assert_eq!(only_a.len(), 3);

    helper
        .set_criteria(FilterKind::Tag, TagSelection::new(["a", "b"], Vec::<String>::new()).into(), false)
        .unwrap();
    let a_and_b = helper.apply_filters(catalog.entries());
    assert_eq!(
        ids(&a_and_b),
        vec!["character 1 (Alice)", "character 3 (Carol)"]
    );
}

#[test]
fn test_notification_contract() {
    let (mut helper, count) = counting_helper();

    helper
        .set_criteria(FilterKind::Search, Criteria::search("alice"), false)
        .unwrap();
    helper
        .set_criteria(FilterKind::Search, Criteria::search("alice"), false)
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);

    helper
        .set_criteria(FilterKind::Tag, TagSelection::new(["x", "y"], ["z"]).into(), false)
        .unwrap();
    helper
        .set_criteria(FilterKind::Tag, TagSelection::new(["y", "x"], ["z"]).into(), false)
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);

    helper
        .set_criteria(FilterKind::Group, Criteria::Group(true), true)
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);

    helper.clear_filters();
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
fn test_unregistered_kind_is_an_error() {
    let mut helper = FilterHelper::with_kinds([FilterKind::WorldInfoSearch], || {});

    let err = helper.get_criteria(FilterKind::Favorite).unwrap_err();
    assert_eq!(err, FilterError::UnknownFilterKind(FilterKind::Favorite));
    assert_eq!(err.to_string(), "Unknown filter kind: favorite");

    assert!(helper
        .set_criteria(FilterKind::Favorite, Criteria::Favorite(true), false)
        .is_err());

    // Unregistered stages never run
    let catalog = create_test_catalog();
    let filtered = helper.apply_filters(catalog.entries());
    assert_eq!(filtered, catalog.entries());
}

#[test]
fn test_world_info_search_with_nucleo() {
    let catalog = create_test_catalog();
    let (helper, _) = counting_helper();
    let mut helper = helper.with_fuzzy_search(Arc::new(NucleoSearch::from_entries(catalog.entries())));

    helper
        .set_criteria(
            FilterKind::WorldInfoSearch,
            Criteria::world_info_search("dragon"),
            false,
        )
        .unwrap();

    let filtered = helper.apply_filters(catalog.entries());
    assert_eq!(ids(&filtered), vec!["world_info uid:7 (Dragons)"]);
}

#[test]
fn test_fuzzy_name_search_with_nucleo() {
    let catalog = create_test_catalog();
    let (helper, _) = counting_helper();
    let mut helper = helper
        .with_fuzzy_search(Arc::new(NucleoSearch::from_entries(catalog.entries())))
        .with_config(FilterConfig {
            fuzzy_search: true,
            hide_deck_members: false,
        });

    helper
        .set_criteria(FilterKind::Search, Criteria::search("alc"), false)
        .unwrap();

    let filtered = helper.apply_filters(catalog.entries());
    // Fuzzy search only ever yields characters and groups
    assert_eq!(
        ids(&filtered),
        vec!["character 1 (Alice)", "group g1 (Alice's Group)"]
    );
}
