use chrono::{Duration, TimeZone, Utc};
use vdrive::error::MutationError;
use vdrive::mutation;
use vdrive::store::NodeStore;
use vdrive::tree::node::NodeKind;
use vdrive::types::{NodeID, Timestamp};
use vdrive::upload::{UploadPayload, UploadedFile};
use vdrive::views::{self, ListingQuery, SortConfig, SortDirection, SortKey};

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Root with `/docs` and `/readme.txt`.
fn docs_store() -> (NodeStore, NodeID) {
    let store = NodeStore::new();
    let (store, docs) = mutation::create(&store, "/", "docs", NodeKind::Folder, t0()).unwrap();
    let (store, _) = mutation::create(&store, "/", "readme.txt", NodeKind::Text, t0()).unwrap();
    (store, docs)
}

#[test]
fn docs_to_reports_walkthrough() {
    let (store, docs) = docs_store();

    let (store, notes) = mutation::create(&store, "/docs", "notes", NodeKind::Text, t0()).unwrap();
    let node = store.get(&notes).unwrap();
    assert_eq!(node.path, "/docs/notes");
    assert_eq!(node.parent_id, Some(docs));
    assert_eq!(node.size, 0);
    assert_eq!(node.content.as_deref(), Some(""));

    let later = t0() + Duration::minutes(5);
    let store = mutation::rename(&store, &docs, "reports", later).unwrap();
    assert_eq!(store.get(&docs).unwrap().path, "/reports");
    assert_eq!(store.get(&notes).unwrap().path, "/reports/notes");
    assert_eq!(store.get(&docs).unwrap().modified_at, later);

    // /reports already sits at the root: its own path occupies the target.
    let err = mutation::move_node(&store, &docs, "/", later).unwrap_err();
    assert!(matches!(err, MutationError::Collision(_)));

    // Searching inside /reports.
    let listing = views::project(
        &store,
        &ListingQuery {
            directory: Some(docs),
            search: "note".to_string(),
            sort: SortConfig::default(),
        },
    );
    let names: Vec<&str> = listing.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["notes"]);

    let (store, removed) = mutation::delete(&store, &[docs]);
    assert_eq!(removed.len(), 2);
    assert!(store.find_by_path("/reports").is_none());
    assert!(store.find_by_path("/reports/notes").is_none());
    assert!(store.find_by_path("/readme.txt").is_some());
}

#[test]
fn move_from_nested_folder_to_root_cascades() {
    let (store, docs) = docs_store();
    let (store, archive) =
        mutation::create(&store, "/docs", "archive", NodeKind::Folder, t0()).unwrap();
    let (store, old) =
        mutation::create(&store, "/docs/archive", "old.txt", NodeKind::Text, t0()).unwrap();

    let store = mutation::move_node(&store, &archive, "/", t0()).unwrap();
    assert_eq!(store.get(&archive).unwrap().path, "/archive");
    assert_eq!(store.get(&archive).unwrap().parent_id, None);
    assert_eq!(store.get(&old).unwrap().path, "/archive/old.txt");
    assert_eq!(store.get(&old).unwrap().parent_id, Some(archive));
    assert!(store.children_of(Some(&docs)).is_empty());
    assert!(store.check_invariants().is_empty());
}

#[test]
fn folders_sort_first_regardless_of_size() {
    let store = NodeStore::new();
    let (store, _) = mutation::create(&store, "/", "zeta", NodeKind::Folder, t0()).unwrap();
    let (store, file) = mutation::insert_uploaded(
        &store,
        "/",
        &UploadedFile {
            name: "alpha.txt".to_string(),
            kind: NodeKind::Text,
            size: 10,
            modified_at: t0(),
        },
    )
    .unwrap();
    assert_eq!(store.get(&file).unwrap().size, 10);

    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let listing = views::project(
            &store,
            &ListingQuery {
                directory: None,
                search: String::new(),
                sort: SortConfig::new(SortKey::Size, direction),
            },
        );
        assert_eq!(listing[0].name, "zeta");
        assert_eq!(listing[1].name, "alpha.txt");
    }
}

#[test]
fn similar_prefix_is_not_a_cycle() {
    let store = NodeStore::new();
    let (store, docs) = mutation::create(&store, "/", "docs", NodeKind::Folder, t0()).unwrap();
    let (store, _) = mutation::create(&store, "/", "docs2", NodeKind::Folder, t0()).unwrap();

    let store = mutation::move_node(&store, &docs, "/docs2", t0()).unwrap();
    assert_eq!(store.get(&docs).unwrap().path, "/docs2/docs");
}

#[test]
fn moving_into_own_subtree_is_cyclic() {
    let store = NodeStore::seeded().unwrap();
    let docs = store.find_by_path("/Documents").unwrap().id;
    for target in ["/Documents", "/Documents/Work"] {
        let err = mutation::move_node(&store, &docs, target, t0()).unwrap_err();
        assert!(matches!(err, MutationError::CyclicMove { .. }), "{}", target);
    }
}

#[test]
fn failed_mutations_leave_store_untouched() {
    let store = NodeStore::seeded().unwrap();
    let before = store.clone();
    let work = store.find_by_path("/Documents/Work").unwrap().id;

    assert!(mutation::rename(&store, &work, "Personal", t0()).is_err());
    assert!(mutation::rename(&store, &work, "  ", t0()).is_err());
    assert!(mutation::move_node(&store, &work, "/Nowhere", t0()).is_err());
    assert!(mutation::move_node(&store, &work, "/readme.txt", t0()).is_err());
    assert!(mutation::create(&store, "/Documents", "Work", NodeKind::Folder, t0()).is_err());

    assert_eq!(store, before);
}

#[test]
fn deleted_node_drops_late_payload() {
    let store = NodeStore::seeded().unwrap();
    let readme = store.find_by_path("/readme.txt").unwrap().id;
    let (store, _) = mutation::delete(&store, &[readme]);
    let (after, applied) =
        mutation::apply_payload(&store, &readme, UploadPayload::Content("late".into()), t0());
    assert!(!applied);
    assert_eq!(after, store);
}
