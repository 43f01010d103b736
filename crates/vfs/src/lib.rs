//! Virtual file system for the CyberAcme desktop: an in-memory tree of
//! directories, text files and launchable scenes, navigated by a cursor and
//! gated by a login session.

pub mod filesystem;
pub mod path;
pub mod seed;
pub mod tree;
pub mod types;

pub use filesystem::{FileSystem, ACCESS_DENIED_NAME};
pub use path::resolve;
pub use tree::FileTree;
pub use types::{FileNode, MetaValue, Metadata, NodeKind, VfsError};
