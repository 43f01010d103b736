//! Cosmetic desktop settings and the keys they are persisted under.

use crate::store::{load_json, save_json, KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod keys {
    pub const FILESYSTEM: &str = "cyberacme_filesystem";
    pub const LOGGED_IN: &str = "cyberacme_logged_in";
    pub const THEME: &str = "cyberacmeTheme";
    pub const CRT_EFFECTS: &str = "crtEffects";
    pub const BOOKMARKS: &str = "cyberacme_browser_bookmarks";
    pub const HISTORY: &str = "cyberacme_browser_history";
    pub const GAMES: &str = "cyberacme_games";
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "high-contrast")]
    HighContrast,
    #[serde(rename = "blue-tint")]
    BlueTint,
    #[serde(rename = "green-matrix")]
    GreenMatrix,
    #[serde(rename = "amber-terminal")]
    AmberTerminal,
    #[serde(rename = "red-alert")]
    RedAlert,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Default,
        Theme::HighContrast,
        Theme::BlueTint,
        Theme::GreenMatrix,
        Theme::AmberTerminal,
        Theme::RedAlert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::HighContrast => "high-contrast",
            Theme::BlueTint => "blue-tint",
            Theme::GreenMatrix => "green-matrix",
            Theme::AmberTerminal => "amber-terminal",
            Theme::RedAlert => "red-alert",
        }
    }

    /// The theme name is stored as a bare string; unknown names fall back to the default.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(keys::THEME) {
            Ok(Some(raw)) => raw.trim().trim_matches('"').parse().unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("Failed to read theme: {}", e);
                Theme::default()
            }
        }
    }

    pub fn save(self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(keys::THEME, self.name())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name() == s)
            .ok_or_else(|| format!("Unknown theme: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrtEffect {
    Scanlines,
    VerticalLines,
    PaintLine,
    Vignette,
    Glow,
    Flicker,
    Glitch,
    Curvature,
    DotPattern,
}

impl FromStr for CrtEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scanlines" => Ok(CrtEffect::Scanlines),
            "verticallines" | "vertical_lines" => Ok(CrtEffect::VerticalLines),
            "paintline" | "paint_line" => Ok(CrtEffect::PaintLine),
            "vignette" => Ok(CrtEffect::Vignette),
            "glow" => Ok(CrtEffect::Glow),
            "flicker" => Ok(CrtEffect::Flicker),
            "glitch" => Ok(CrtEffect::Glitch),
            "curvature" => Ok(CrtEffect::Curvature),
            "dotpattern" | "dot_pattern" => Ok(CrtEffect::DotPattern),
            other => Err(format!("Unknown CRT effect: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CrtEffects {
    pub enabled: bool,
    pub scanlines: bool,
    pub vertical_lines: bool,
    pub paint_line: bool,
    pub vignette: bool,
    pub glow: bool,
    pub flicker: bool,
    pub glitch: bool,
    pub curvature: bool,
    pub dot_pattern: bool,
}

impl Default for CrtEffects {
    fn default() -> Self {
        Self::all_on()
    }
}

impl CrtEffects {
    fn all_on() -> Self {
        Self {
            enabled: true,
            scanlines: true,
            vertical_lines: true,
            paint_line: true,
            vignette: true,
            glow: true,
            flicker: true,
            glitch: true,
            curvature: true,
            dot_pattern: true,
        }
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        load_json(store, keys::CRT_EFFECTS).unwrap_or_default()
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, keys::CRT_EFFECTS, self)
    }

    fn flag_mut(&mut self, effect: CrtEffect) -> &mut bool {
        match effect {
            CrtEffect::Scanlines => &mut self.scanlines,
            CrtEffect::VerticalLines => &mut self.vertical_lines,
            CrtEffect::PaintLine => &mut self.paint_line,
            CrtEffect::Vignette => &mut self.vignette,
            CrtEffect::Glow => &mut self.glow,
            CrtEffect::Flicker => &mut self.flicker,
            CrtEffect::Glitch => &mut self.glitch,
            CrtEffect::Curvature => &mut self.curvature,
            CrtEffect::DotPattern => &mut self.dot_pattern,
        }
    }

    pub fn is_active(&self, effect: CrtEffect) -> bool {
        let flag = match effect {
            CrtEffect::Scanlines => self.scanlines,
            CrtEffect::VerticalLines => self.vertical_lines,
            CrtEffect::PaintLine => self.paint_line,
            CrtEffect::Vignette => self.vignette,
            CrtEffect::Glow => self.glow,
            CrtEffect::Flicker => self.flicker,
            CrtEffect::Glitch => self.glitch,
            CrtEffect::Curvature => self.curvature,
            CrtEffect::DotPattern => self.dot_pattern,
        };
        self.enabled && flag
    }

    pub fn toggle_effect(&mut self, effect: CrtEffect) {
        let flag = self.flag_mut(effect);
        *flag = !*flag;
    }

    /// Flip the master switch. Re-enabling turns every effect back on;
    /// disabling keeps individual flags so they survive the next re-enable.
    pub fn toggle_all(&mut self) {
        if self.enabled {
            self.enabled = false;
        } else {
            *self = Self::all_on();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub title: String,
    pub url: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
}

impl Bookmark {
    fn new(title: &str, url: &str, icon: &str, bg_color: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
            bg_color: Some(bg_color.to_string()),
        }
    }
}

pub fn default_bookmarks() -> Vec<Bookmark> {
    vec![
        Bookmark::new("Home", "home.html", "🏠", "#001800"),
        Bookmark::new("Factions", "factions/factions.html", "📊", "#180018"),
        Bookmark::new("Propaganda", "propaganda/propaganda.html", "📢", "#181800"),
        Bookmark::new("Games", "games.html", "🎮", "#001818"),
        Bookmark::new("News", "news.html", "📰", "#180000"),
        Bookmark::new("Tools", "tools.html", "🔧", "#101010"),
    ]
}

pub fn load_bookmarks(store: &dyn KeyValueStore) -> Vec<Bookmark> {
    load_json(store, keys::BOOKMARKS).unwrap_or_else(default_bookmarks)
}

pub fn save_bookmarks(store: &dyn KeyValueStore, bookmarks: &[Bookmark]) -> Result<(), StorageError> {
    save_json(store, keys::BOOKMARKS, bookmarks)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    pub title: String,
    pub url: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

pub fn load_history(store: &dyn KeyValueStore) -> Vec<HistoryItem> {
    load_json(store, keys::HISTORY).unwrap_or_default()
}

/// Append a page visit to the browser history and persist the whole list.
pub fn record_visit(
    store: &dyn KeyValueStore,
    title: &str,
    url: &str,
) -> Result<HistoryItem, StorageError> {
    let mut history = load_history(store);
    let item = HistoryItem {
        title: title.to_string(),
        url: url.to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    };
    history.push(item.clone());
    save_json(store, keys::HISTORY, &history)?;
    Ok(item)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub image: String,
    pub installed: bool,
    pub launchable: bool,
}

impl Game {
    fn new(id: &str, title: &str, installed: bool) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            image: format!("/programIcons/{}-icon.png", id),
            installed,
            launchable: installed,
        }
    }
}

pub fn default_games() -> Vec<Game> {
    vec![
        Game::new("tetris", "Tetris", true),
        Game::new("snake", "Snake", true),
        Game::new("pong", "Pong", false),
        Game::new("space-invaders", "Space Invaders", false),
        Game::new("pacman", "Pac-Man", false),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLibrary {
    games: Vec<Game>,
}

impl GameLibrary {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            games: load_json(store, keys::GAMES).unwrap_or_else(default_games),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, keys::GAMES, &self.games)
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn installed(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|game| game.installed)
    }

    /// Returns false if no game has this id.
    pub fn install(&mut self, id: &str) -> bool {
        match self.games.iter_mut().find(|game| game.id == id) {
            Some(game) => {
                game.installed = true;
                game.launchable = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_theme_defaults_and_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(Theme::load(&store), Theme::Default);

        Theme::AmberTerminal.save(&store).unwrap();
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("amber-terminal"));
        assert_eq!(Theme::load(&store), Theme::AmberTerminal);

        store.set(keys::THEME, "vaporwave").unwrap();
        assert_eq!(Theme::load(&store), Theme::Default);
    }

    #[test]
    fn test_crt_toggle_all_restores_effects() {
        let mut effects = CrtEffects::default();
        effects.toggle_effect(CrtEffect::Glitch);
        assert!(!effects.glitch);

        effects.toggle_all();
        assert!(!effects.enabled);
        assert!(!effects.glitch);
        assert!(!effects.is_active(CrtEffect::Scanlines));

        effects.toggle_all();
        assert_eq!(effects, CrtEffects::default());
    }

    #[test]
    fn test_crt_serialized_field_names() {
        let value = serde_json::to_value(CrtEffects::default()).unwrap();
        assert_eq!(value["verticalLines"], true);
        assert_eq!(value["dotPattern"], true);
    }

    #[test]
    fn test_bookmarks_default_when_missing() {
        let store = MemoryStore::new();
        let bookmarks = load_bookmarks(&store);
        assert_eq!(bookmarks.len(), 6);
        assert_eq!(bookmarks[0].title, "Home");
    }

    #[test]
    fn test_record_visit_appends() {
        let store = MemoryStore::new();
        record_visit(&store, "Browser Home", "home.html").unwrap();
        record_visit(&store, "News", "news.html").unwrap();

        let history = load_history(&store);
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].url, "news.html");
        assert!(history[1].timestamp >= history[0].timestamp);
    }

    #[test]
    fn test_game_install() {
        let store = MemoryStore::new();
        let mut library = GameLibrary::load(&store);
        assert_eq!(library.installed().count(), 2);

        assert!(library.install("pong"));
        assert!(!library.install("doom"));
        library.save(&store).unwrap();

        let reloaded = GameLibrary::load(&store);
        assert_eq!(reloaded.installed().count(), 3);
    }
}
