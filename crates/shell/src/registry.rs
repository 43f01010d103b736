use serde_json::{Map, Value};
use std::collections::HashMap;

/// What a launchable payload id turns into when it is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct UiUnit {
    pub component: String,
    pub props: Map<String, Value>,
}

/// Maps payload ids stored on tree nodes to the windows they open.
#[derive(Debug, Clone, Default)]
pub struct PayloadRegistry {
    units: HashMap<String, UiUnit>,
}

const BUILTIN_PAYLOADS: &[&str] = &[
    "TETRIS_GAME_COMPONENT",
    "SNAKE_GAME_COMPONENT",
    "CALCULATOR_COMPONENT",
    "CLOCK_COMPONENT",
    "BROWSER_COMPONENT",
    "WELCOME_SCREEN_COMPONENT",
    "ADMIN_PANEL_COMPONENT",
];

impl PayloadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every payload the seed tree refers to, each bound to a
    /// component of the same name.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for id in BUILTIN_PAYLOADS {
            registry.register(id, id, Map::new());
        }
        registry
    }

    pub fn register(&mut self, id: &str, component: &str, props: Map<String, Value>) {
        self.units.insert(
            id.to_string(),
            UiUnit {
                component: component.to_string(),
                props,
            },
        );
    }

    pub fn unregister(&mut self, id: &str) -> Option<UiUnit> {
        self.units.remove(id)
    }

    pub fn resolve(&self, id: &str) -> Option<&UiUnit> {
        self.units.get(id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
