use vdrive::store::NodeStore;
use vdrive::tree::node::NodeKind;

#[test]
fn seeded_store_satisfies_invariants() {
    let store = NodeStore::seeded().unwrap();
    assert_eq!(store.len(), 17);
    assert!(store.check_invariants().is_empty(), "{:?}", store.check_invariants());
}

#[test]
fn root_never_resolves_to_a_node() {
    let store = NodeStore::seeded().unwrap();
    assert!(store.find_by_path("/").is_none());
    assert!(store.find_by_path("/Documents/Missing").is_none());
}

#[test]
fn folder_paths_start_with_root_and_are_sorted() {
    let store = NodeStore::seeded().unwrap();
    let folders = store.list_folder_paths();
    assert_eq!(folders.first().map(String::as_str), Some("/"));
    let mut sorted = folders.clone();
    sorted.sort();
    assert_eq!(folders, sorted);
    assert!(folders.contains(&"/Images/Screenshots".to_string()));
    assert!(!folders.contains(&"/readme.txt".to_string()));
}

#[test]
fn children_by_parent_agree_with_children_by_path() {
    let store = NodeStore::seeded().unwrap();
    for folder in store.iter().filter(|n| n.kind == NodeKind::Folder) {
        let mut by_parent: Vec<&str> = store
            .children_of(Some(&folder.id))
            .into_iter()
            .map(|n| n.path.as_str())
            .collect();
        let mut by_path: Vec<&str> = vdrive::views::membership_by_path(&store, &folder.path)
            .into_iter()
            .map(|n| n.path.as_str())
            .collect();
        by_parent.sort();
        by_path.sort();
        assert_eq!(by_parent, by_path, "membership mismatch under {}", folder.path);
    }
}

#[test]
fn root_children_have_no_parent() {
    let store = NodeStore::seeded().unwrap();
    let names: Vec<&str> = store
        .children_of(None)
        .into_iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names.len(), 4);
    assert!(names.contains(&"readme.txt"));
    assert!(names.contains(&"Projects"));
}

#[test]
fn descendants_use_separator_boundaries() {
    let store = NodeStore::seeded().unwrap();
    let under_docs = store.descendants_of("/Documents");
    assert_eq!(under_docs.len(), 5);
    assert!(under_docs.iter().all(|n| n.path.starts_with("/Documents/")));
}
