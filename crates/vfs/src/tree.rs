use crate::path::{self, segments};
use crate::types::{FileNode, MetaValue, NodeKind, VfsError};

/// Owned tree of nodes under an implicit, unnamed root directory.
///
/// Structural operations only; access rules live in [`crate::FileSystem`].
#[derive(Debug, Clone, PartialEq)]
pub struct FileTree {
    root: FileNode,
}

impl Default for FileTree {
    fn default() -> Self {
        crate::seed::initial_tree()
    }
}

impl FileTree {
    pub fn from_nodes(nodes: Vec<FileNode>) -> Self {
        Self {
            root: FileNode::directory("", nodes),
        }
    }

    pub fn empty() -> Self {
        Self::from_nodes(Vec::new())
    }

    /// The top-level entries, i.e. the persisted snapshot.
    pub fn nodes(&self) -> &[FileNode] {
        self.root.children()
    }

    /// Walk child-by-name from the root. `/` and `""` yield the root itself.
    pub fn get(&self, path: &str) -> Option<&FileNode> {
        let mut current = &self.root;
        for segment in segments(path) {
            if !current.is_directory() {
                return None;
            }
            current = current.child(segment)?;
        }
        Some(current)
    }

    fn get_mut(&mut self, path: &str) -> Option<&mut FileNode> {
        let mut current = &mut self.root;
        for segment in segments(path) {
            if !current.is_directory() {
                return None;
            }
            current = current.child_mut(segment)?;
        }
        Some(current)
    }

    /// Append `node` to the directory at `parent`.
    pub fn insert(&mut self, parent: &str, node: FileNode) -> Result<(), VfsError> {
        if node.name().is_empty() || node.name().contains('/') {
            return Err(VfsError::InvalidName(node.name().to_string()));
        }

        let dir = self
            .get_mut(parent)
            .ok_or_else(|| VfsError::NotFound(parent.to_string()))?;
        if !dir.is_directory() {
            return Err(VfsError::NotADirectory(parent.to_string()));
        }
        if dir.child(node.name()).is_some() {
            return Err(VfsError::AlreadyExists(path::join(
                &path::normalize(parent),
                node.name(),
            )));
        }

        dir.children_mut().push(node);
        Ok(())
    }

    pub fn set_content(&mut self, path: &str, content: String) -> Result<(), VfsError> {
        let node = self
            .get_mut(path)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        if node.is_directory() {
            return Err(VfsError::IsADirectory(path.to_string()));
        }
        node.set_content(content);
        Ok(())
    }

    /// Detach and return the node at `path`. The root cannot be removed.
    pub fn remove(&mut self, path: &str) -> Result<FileNode, VfsError> {
        let (parent, name) = path::parent_and_name(path)
            .ok_or_else(|| VfsError::Protected(path.to_string()))?;
        let dir = self
            .get_mut(&parent)
            .ok_or_else(|| VfsError::NotFound(parent.clone()))?;
        let children = dir.children_mut();
        let index = children
            .iter()
            .position(|child| child.name() == name)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        Ok(children.remove(index))
    }

    /// Case-insensitive depth-first search over names and file contents.
    ///
    /// Restricted nodes and their whole subtree are invisible unless
    /// `logged_in`. Every hit carries its absolute path in `path` metadata.
    pub fn search(&self, query: &str, logged_in: bool) -> Vec<FileNode> {
        let mut results = Vec::new();
        if query.trim().is_empty() {
            return results;
        }
        let query = query.to_lowercase();

        for node in self.nodes() {
            search_node(node, "", &query, logged_in, &mut results);
        }
        results
    }
}

fn search_node(
    node: &FileNode,
    parent_path: &str,
    query: &str,
    logged_in: bool,
    results: &mut Vec<FileNode>,
) {
    if node.is_restricted() && !logged_in {
        return;
    }

    let node_path = format!("{}/{}", parent_path, node.name());

    if node.name().to_lowercase().contains(query) {
        let mut hit = node.clone();
        hit.insert_metadata("path", MetaValue::Text(node_path.clone()));
        results.push(hit);
    } else if node.kind() == NodeKind::File
        && node
            .content()
            .is_some_and(|content| content.to_lowercase().contains(query))
    {
        let mut hit = node.clone();
        hit.insert_metadata("path", MetaValue::Text(node_path.clone()));
        hit.insert_metadata("matchesContent", MetaValue::Bool(true));
        results.push(hit);
    }

    for child in node.children() {
        search_node(child, &node_path, query, logged_in, results);
    }
}
