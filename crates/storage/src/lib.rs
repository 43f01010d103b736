pub mod settings;
pub mod store;

pub use settings::{keys, Bookmark, CrtEffect, CrtEffects, Game, GameLibrary, HistoryItem, Theme};
pub use store::{load_json, save_json, KeyValueStore, LocalStore, MemoryStore, StorageError};
