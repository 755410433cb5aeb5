use chrono::Utc;
use vdrive::config::ExplorerConfig;
use vdrive::error::{ApiError, MutationError};
use vdrive::session::ExplorerSession;
use vdrive::store::NodeStore;
use vdrive::tree::node::NodeKind;
use vdrive::upload::{UploadPayload, UploadedFile};
use vdrive::views::{SortDirection, SortKey};

fn session() -> ExplorerSession {
    ExplorerSession::open(&ExplorerConfig::default()).unwrap()
}

fn names(session: &ExplorerSession) -> Vec<String> {
    session.current_files().into_iter().map(|n| n.name).collect()
}

#[test]
fn loading_state_until_initialized() {
    let mut session = ExplorerSession::new(&ExplorerConfig::default());
    assert!(session.is_loading());
    assert!(session.current_files().is_empty());
    session.initialize().unwrap();
    assert!(!session.is_loading());
    assert_eq!(names(&session), vec!["Documents", "Images", "Projects", "readme.txt"]);

    // A second initialize keeps user edits.
    session.create_node("extra", NodeKind::Folder).unwrap();
    session.initialize().unwrap();
    assert!(session.store().find_by_path("/extra").is_some());
}

#[test]
fn unseeded_session_starts_empty() {
    let config = ExplorerConfig {
        seed: false,
        ..Default::default()
    };
    let session = ExplorerSession::open(&config).unwrap();
    assert!(session.store().is_empty());
    assert_eq!(session.folder_paths(), vec!["/".to_string()]);
}

#[test]
fn browse_search_and_sort() {
    let mut session = session();
    session.change_directory("/Images").unwrap();
    assert_eq!(names(&session), vec!["Screenshots", "profile.png", "vacation.jpg"]);

    session.search("PRO");
    assert_eq!(names(&session), vec!["profile.png"]);
    session.search("");

    session.set_sort_config(SortKey::Name, SortDirection::Descending);
    assert_eq!(names(&session), vec!["Screenshots", "vacation.jpg", "profile.png"]);

    session.toggle_sort(SortKey::Name);
    assert_eq!(session.sort_config().direction, SortDirection::Ascending);
}

#[test]
fn change_directory_rejects_files_and_missing_paths() {
    let mut session = session();
    assert!(matches!(
        session.change_directory("/readme.txt"),
        Err(ApiError::Mutation(MutationError::NotFound(_)))
    ));
    assert!(session.change_directory("/Nope").is_err());
    assert_eq!(session.current_directory(), "/");
}

#[test]
fn current_directory_follows_rename_of_ancestor() {
    let mut session = session();
    session.change_directory("/Documents/Work").unwrap();
    let docs = session.store().find_by_path("/Documents").unwrap().id;
    session.rename_node(&docs, "Papers").unwrap();
    assert_eq!(session.current_directory(), "/Papers/Work");
    assert_eq!(names(&session), vec!["meeting-notes.txt", "quarterly-report.pdf"]);
}

#[test]
fn deleting_current_directory_returns_to_root() {
    let mut session = session();
    session.change_directory("/Projects/website").unwrap();
    let projects = session.store().find_by_path("/Projects").unwrap().id;
    assert_eq!(session.delete_nodes(&[projects]), 5);
    assert_eq!(session.current_directory(), "/");
}

#[test]
fn selection_cleared_on_navigation_and_delete() {
    let mut session = session();
    session.change_directory("/Images").unwrap();
    let ids: Vec<_> = session.current_files().iter().map(|n| n.id).collect();
    session.select_range(&ids[1..]);
    assert_eq!(session.selection().len(), 2);

    assert!(session.toggle_selection(ids[0]));
    assert!(!session.toggle_selection(ids[0]));

    assert_eq!(session.delete_selected(), 2);
    assert!(session.selection().is_empty());
    assert_eq!(names(&session), vec!["Screenshots"]);

    session.toggle_selection(ids[0]);
    session.navigate_up().unwrap();
    assert!(session.selection().is_empty());
    assert!(!session.clear_selection());
}

#[test]
fn shift_click_range_uses_listing_order() {
    let mut session = session();
    let listing = session.current_files();
    session.select_range_to(&listing[3].id, &listing[1].id);
    assert_eq!(session.selection().len(), 3);
    assert!(!session.selection().contains(&listing[0].id));
}

#[test]
fn upload_then_decode_payload() {
    let mut session = session();
    session.change_directory("/Images").unwrap();
    let id = session
        .insert_upload(&UploadedFile {
            name: "cat.png".to_string(),
            kind: NodeKind::Image,
            size: 2048,
            modified_at: Utc::now(),
        })
        .unwrap();
    assert_eq!(session.store().get(&id).unwrap().path, "/Images/cat.png");

    // Text payload does not fit an image.
    assert!(!session.complete_upload(&id, UploadPayload::Content("x".into())));
    assert!(session.complete_upload(&id, UploadPayload::Url("data:image/png;base64,AA".into())));
    assert!(session.store().get(&id).unwrap().url.is_some());

    session.delete_nodes(&[id]);
    assert!(!session.complete_upload(&id, UploadPayload::Url("late".into())));
}

#[test]
fn collisions_surface_as_errors() {
    let mut session = ExplorerSession::with_store(NodeStore::seeded().unwrap());
    assert!(matches!(
        session.create_node("readme.txt", NodeKind::Text),
        Err(ApiError::Mutation(MutationError::Collision(_)))
    ));
    assert!(matches!(
        session.create_node("", NodeKind::Folder),
        Err(ApiError::Mutation(MutationError::Validation(_)))
    ));
    let readme = session.store().find_by_path("/readme.txt").unwrap().id;
    session.move_node(&readme, "/Documents").unwrap();
    assert!(session.store().find_by_path("/Documents/readme.txt").is_some());
}
