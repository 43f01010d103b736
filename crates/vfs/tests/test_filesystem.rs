use cyac_storage::{keys, KeyValueStore, LocalStore, MemoryStore};
use cyac_vfs::{FileNode, FileSystem, MetaValue, NodeKind, VfsError, ACCESS_DENIED_NAME};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_list_restricted_directory_logged_out() {
    let fs = FileSystem::new();
    let entries = fs.list_directory("/home/restricted");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name(), ACCESS_DENIED_NAME);
    assert_eq!(entries[0].kind(), NodeKind::File);
}

#[test]
fn test_list_restricted_directory_logged_in() {
    let mut fs = FileSystem::new();
    fs.login();
    let names: Vec<_> = fs
        .list_directory("/home/restricted")
        .iter()
        .map(|node| node.name().to_string())
        .collect();
    assert_eq!(names, vec!["admin_panel", "secret_files"]);
}

#[test]
fn test_list_missing_or_file_is_empty() {
    let fs = FileSystem::new();
    assert!(fs.list_directory("/home/nope").is_empty());
    assert!(fs.list_directory("/home/documents/readme.txt").is_empty());
}

#[test]
fn test_list_root() {
    let fs = FileSystem::new();
    let entries = fs.list_directory("/");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name(), "home");
}

#[test]
fn test_create_rules() {
    let mut fs = FileSystem::new();

    fs.create_directory("/home/documents", "drafts").unwrap();
    fs.create_file("/home/documents/drafts", "memo.txt", "hello").unwrap();
    assert_eq!(
        fs.read_file("/home/documents/drafts/memo.txt").as_deref(),
        Some("hello")
    );

    let before = fs.tree().clone();
    assert!(matches!(
        fs.create_file("/home/documents", "readme.txt", "dup"),
        Err(VfsError::AlreadyExists(_))
    ));
    assert!(matches!(
        fs.create_directory("/home/missing", "x"),
        Err(VfsError::NotFound(_))
    ));
    assert!(matches!(
        fs.create_file("/home/documents/readme.txt", "x", ""),
        Err(VfsError::NotADirectory(_))
    ));
    assert!(matches!(
        fs.create_file("/home/restricted", "x", ""),
        Err(VfsError::AccessDenied(_))
    ));
    assert_eq!(fs.tree(), &before);

    fs.login();
    fs.create_file("/home/restricted", "x", "").unwrap();
}

#[test]
fn test_update_rules() {
    let mut fs = FileSystem::new();
    fs.update_file("/home/documents/readme.txt", "rewritten").unwrap();
    assert_eq!(
        fs.read_file("/home/documents/readme.txt").as_deref(),
        Some("rewritten")
    );

    assert!(matches!(
        fs.update_file("/home/documents", "x"),
        Err(VfsError::IsADirectory(_))
    ));
    assert!(matches!(
        fs.update_file("/home/documents/none.txt", "x"),
        Err(VfsError::NotFound(_))
    ));
    assert!(matches!(
        fs.update_file("/home/system/security/access_log.txt", "x"),
        Err(VfsError::AccessDenied(_))
    ));
}

#[test]
fn test_delete_protected_paths_regardless_of_session() {
    let mut fs = FileSystem::new();
    for logged_in in [false, true] {
        if logged_in {
            fs.login();
        }
        assert!(matches!(fs.delete_item("/"), Err(VfsError::Protected(_))));
        assert!(matches!(fs.delete_item("/home"), Err(VfsError::Protected(_))));
        assert!(fs.get_node_at_path("/home").is_some());
    }
}

#[test]
fn test_delete_rules() {
    let mut fs = FileSystem::new();

    assert!(matches!(
        fs.delete_item("/home/restricted/admin_panel"),
        Err(VfsError::AccessDenied(_))
    ));
    assert!(matches!(
        fs.delete_item("/home/system/security"),
        Err(VfsError::AccessDenied(_))
    ));
    assert!(matches!(
        fs.delete_item("/home/documents/ghost.txt"),
        Err(VfsError::NotFound(_))
    ));
    assert!(matches!(fs.delete_item("/nowhere/x"), Err(VfsError::NotFound(_))));

    fs.delete_item("/home/documents/user_manual.txt").unwrap();
    assert!(fs.get_node_at_path("/home/documents/user_manual.txt").is_none());
    assert!(fs.get_node_at_path("/home/documents/readme.txt").is_some());
}

#[test]
fn test_search_hides_restricted_subtrees() {
    let mut fs = FileSystem::new();

    // "omega" only appears under /home/restricted/secret_files
    assert!(fs.search("omega").is_empty());
    assert!(fs.search("access_log").is_empty());
    assert!(fs
        .search("a")
        .iter()
        .all(|hit| match hit.metadata().get("path") {
            Some(MetaValue::Text(path)) =>
                !path.starts_with("/home/restricted") && !path.starts_with("/home/system/security"),
            _ => false,
        }));

    fs.login();
    let hits = fs.search("omega");
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits[0].metadata().get("path"),
        Some(&MetaValue::from("/home/restricted/secret_files/project_omega.txt"))
    );
}

#[test]
fn test_search_content_match() {
    let fs = FileSystem::new();
    let hits = fs.search("holographic");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name(), "system_info.txt");
    assert_eq!(hits[0].metadata().get("matchesContent"), Some(&MetaValue::Bool(true)));
}

#[test]
fn test_insert_launchable_node() {
    let mut fs = FileSystem::new();
    fs.insert_node(
        "/home/programs",
        FileNode::launchable("radar", NodeKind::Program, None),
    )
    .unwrap();
    let node = fs.get_node_at_path("/home/programs/radar").unwrap();
    assert_eq!(node.kind(), NodeKind::Program);
    assert!(node.payload().is_none());
}

#[test]
fn test_changes_persist_through_store() {
    let temp = TempDir::new().unwrap();
    {
        let store: Arc<dyn KeyValueStore> = Arc::new(LocalStore::new(temp.path()).unwrap());
        let mut fs = FileSystem::load(store);
        fs.create_file("/home/documents", "diary.txt", "day one").unwrap();
        fs.login();
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(LocalStore::new(temp.path()).unwrap());
    let fs = FileSystem::load(store);
    assert!(fs.is_logged_in());
    assert_eq!(
        fs.read_file("/home/documents/diary.txt").as_deref(),
        Some("day one")
    );
}

#[test]
fn test_login_flag_stored_as_string() {
    let store = Arc::new(MemoryStore::new());
    let mut fs = FileSystem::load(store.clone());
    fs.login();
    assert_eq!(store.get(keys::LOGGED_IN).unwrap().as_deref(), Some("true"));
    fs.logout();
    assert_eq!(store.get(keys::LOGGED_IN).unwrap().as_deref(), Some("false"));
}

#[test]
fn test_malformed_snapshot_falls_back_to_seed() {
    let store = Arc::new(MemoryStore::new());
    store.set(keys::FILESYSTEM, "[{\"name\": 12}").unwrap();
    store.set(keys::LOGGED_IN, "maybe").unwrap();

    let fs = FileSystem::load(store);
    assert!(!fs.is_logged_in());
    assert!(fs.get_node_at_path("/home/programs/games/tetris").is_some());
    assert_eq!(fs.current_path(), "/home");
}
