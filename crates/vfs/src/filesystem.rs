use crate::path::{self, HOME, ROOT};
use crate::tree::FileTree;
use crate::types::{FileNode, VfsError};
use cyac_storage::{keys, load_json, save_json, KeyValueStore};
use std::sync::Arc;

pub const ACCESS_DENIED_NAME: &str = "ACCESS_DENIED";
const ACCESS_DENIED_DIR: &str = "You need to be logged in to access this directory.";
const ACCESS_DENIED_FILE: &str = "ACCESS DENIED: You need to be logged in to access this file.";

/// The tree together with the terminal cursor, the login session and the
/// store every change is written through to.
pub struct FileSystem {
    tree: FileTree,
    current_path: String,
    logged_in: bool,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    /// Seed tree, cursor at `/home`, logged out, nothing persisted.
    pub fn new() -> Self {
        Self::with_tree(FileTree::default())
    }

    pub fn with_tree(tree: FileTree) -> Self {
        let mut fs = Self {
            tree,
            current_path: HOME.to_string(),
            logged_in: false,
            store: None,
        };
        fs.ensure_cursor();
        fs
    }

    /// Restore tree and login state from `store`, falling back to the seed
    /// tree and a logged-out session.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let tree = match load_json::<Vec<FileNode>>(store.as_ref(), keys::FILESYSTEM) {
            Some(nodes) => FileTree::from_nodes(nodes),
            None => FileTree::default(),
        };

        let logged_in = match store.get(keys::LOGGED_IN) {
            Ok(value) => value.as_deref().map(str::trim) == Some("true"),
            Err(e) => {
                tracing::warn!("Failed to read login state: {}", e);
                false
            }
        };

        let mut fs = Self::with_tree(tree);
        fs.logged_in = logged_in;
        fs.store = Some(store);
        tracing::info!(
            "File system loaded ({} top-level entries, logged_in={})",
            fs.tree.nodes().len(),
            fs.logged_in
        );
        fs
    }

    fn ensure_cursor(&mut self) {
        if !self.tree.get(&self.current_path).is_some_and(FileNode::is_directory) {
            self.current_path = ROOT.to_string();
        }
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    fn accessible(&self, node: &FileNode) -> bool {
        !node.is_restricted() || self.logged_in
    }

    pub fn get_node_at_path(&self, path: &str) -> Option<&FileNode> {
        self.tree.get(path)
    }

    /// Move the cursor. Only existing directories are accepted.
    pub fn navigate_to(&mut self, path: &str) -> bool {
        match self.tree.get(path) {
            Some(node) if node.is_directory() => {
                self.current_path = path::normalize(path);
                tracing::debug!("Cursor moved to {}", self.current_path);
                true
            }
            _ => false,
        }
    }

    /// Children of a directory. A restricted directory seen while logged out
    /// yields a single `ACCESS_DENIED` placeholder instead.
    pub fn list_directory(&self, path: &str) -> Vec<FileNode> {
        match self.tree.get(path) {
            Some(node) if node.is_directory() => {
                if !self.accessible(node) {
                    return vec![FileNode::file(ACCESS_DENIED_NAME, ACCESS_DENIED_DIR)];
                }
                node.children().to_vec()
            }
            _ => Vec::new(),
        }
    }

    pub fn read_file(&self, path: &str) -> Option<String> {
        let node = self.tree.get(path)?;
        if node.is_directory() {
            return None;
        }
        if !self.accessible(node) {
            return Some(ACCESS_DENIED_FILE.to_string());
        }
        node.content().map(str::to_string)
    }

    fn writable_directory(&self, parent: &str) -> Result<(), VfsError> {
        let dir = self
            .tree
            .get(parent)
            .ok_or_else(|| VfsError::NotFound(parent.to_string()))?;
        if !dir.is_directory() {
            return Err(VfsError::NotADirectory(parent.to_string()));
        }
        if !self.accessible(dir) {
            return Err(VfsError::AccessDenied(parent.to_string()));
        }
        Ok(())
    }

    /// Append any node under `parent`, subject to the same rules as
    /// [`FileSystem::create_file`].
    pub fn insert_node(&mut self, parent: &str, node: FileNode) -> Result<(), VfsError> {
        self.writable_directory(parent)?;
        let name = node.name().to_string();
        self.tree.insert(parent, node)?;
        tracing::info!("Created {} under {}", name, parent);
        self.persist_tree();
        Ok(())
    }

    pub fn create_directory(&mut self, parent: &str, name: &str) -> Result<(), VfsError> {
        self.insert_node(parent, FileNode::directory(name, Vec::new()))
    }

    pub fn create_file(&mut self, parent: &str, name: &str, content: &str) -> Result<(), VfsError> {
        self.insert_node(parent, FileNode::file(name, content))
    }

    pub fn update_file(&mut self, path: &str, content: &str) -> Result<(), VfsError> {
        let node = self
            .tree
            .get(path)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        if node.is_directory() {
            return Err(VfsError::IsADirectory(path.to_string()));
        }
        if !self.accessible(node) {
            return Err(VfsError::AccessDenied(path.to_string()));
        }

        self.tree.set_content(path, content.to_string())?;
        tracing::info!("Updated {}", path);
        self.persist_tree();
        Ok(())
    }

    /// Remove a node. `/` and `/home` can never be deleted.
    pub fn delete_item(&mut self, path: &str) -> Result<(), VfsError> {
        let normalized = path::normalize(path);
        if normalized == ROOT || normalized == HOME {
            return Err(VfsError::Protected(normalized));
        }

        let (parent_path, name) = path::parent_and_name(&normalized)
            .ok_or_else(|| VfsError::Protected(normalized.clone()))?;
        let parent = self
            .tree
            .get(&parent_path)
            .ok_or_else(|| VfsError::NotFound(parent_path.clone()))?;
        if !self.accessible(parent) {
            return Err(VfsError::AccessDenied(parent_path));
        }
        let item = parent
            .child(&name)
            .ok_or_else(|| VfsError::NotFound(normalized.clone()))?;
        if !self.accessible(item) {
            return Err(VfsError::AccessDenied(normalized));
        }

        self.tree.remove(&normalized)?;
        tracing::info!("Deleted {}", normalized);
        self.persist_tree();
        Ok(())
    }

    pub fn search(&self, query: &str) -> Vec<FileNode> {
        self.tree.search(query, self.logged_in)
    }

    pub fn login(&mut self) {
        self.logged_in = true;
        tracing::info!("Session logged in");
        self.persist_login();
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        tracing::info!("Session logged out");
        self.persist_login();
    }

    fn persist_tree(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = save_json(store.as_ref(), keys::FILESYSTEM, self.tree.nodes()) {
            tracing::warn!("Failed to persist file system: {}", e);
        }
    }

    fn persist_login(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let value = if self.logged_in { "true" } else { "false" };
        if let Err(e) = store.set(keys::LOGGED_IN, value) {
            tracing::warn!("Failed to persist login state: {}", e);
        }
    }
}
