use serde::{Deserialize, Serialize};

/// The surface that receives keystrokes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFocus {
    #[default]
    Terminal,
    Window(String),
    Nobody,
}

impl InputFocus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, InputFocus::Terminal)
    }

    pub fn is_window(&self, id: &str) -> bool {
        matches!(self, InputFocus::Window(owner) if owner == id)
    }
}
