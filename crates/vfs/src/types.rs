use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VfsError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Not a directory: {0}")]
    NotADirectory(String),
    #[error("Is a directory: {0}")]
    IsADirectory(String),
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Protected path: {0}")]
    Protected(String),
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
    Scene,
    Subscene,
    Program,
}

impl NodeKind {
    /// Scenes, sub-scenes and programs open a window instead of printing content.
    pub fn is_launchable(self) -> bool {
        matches!(self, NodeKind::Scene | NodeKind::Subscene | NodeKind::Program)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
            NodeKind::Scene => "scene",
            NodeKind::Subscene => "subscene",
            NodeKind::Program => "program",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Number(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

pub type Metadata = BTreeMap<String, MetaValue>;

/// A named entry in the virtual tree.
///
/// Only directories carry children. Launchable nodes reference their UI unit
/// through an opaque payload id resolved elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileNode {
    name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<FileNode>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    restricted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    metadata: Metadata,
}

impl FileNode {
    fn bare(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            content: None,
            children: Vec::new(),
            restricted: false,
            payload: None,
            metadata: Metadata::new(),
        }
    }

    pub fn directory(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        Self {
            children,
            ..Self::bare(name, NodeKind::Directory)
        }
    }

    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::bare(name, NodeKind::File)
        }
    }

    /// A scene, sub-scene or program. Passing a non-launchable kind yields a
    /// plain node of that kind without a payload.
    pub fn launchable(name: impl Into<String>, kind: NodeKind, payload: Option<&str>) -> Self {
        let mut node = Self::bare(name, kind);
        if kind.is_launchable() {
            node.payload = payload.map(str::to_string);
        }
        node
    }

    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn children(&self) -> &[FileNode] {
        &self.children
    }

    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn child(&self, name: &str) -> Option<&FileNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut FileNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<FileNode> {
        &mut self.children
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = Some(content);
    }

    pub(crate) fn insert_metadata(&mut self, key: &str, value: MetaValue) {
        self.metadata.insert(key.to_string(), value);
    }
}
