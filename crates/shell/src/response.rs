use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowTarget {
    All,
    Id(String),
}

/// Side effect requested by a command, applied by whoever owns the windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    Navigate(String),
    OpenWindow {
        id: String,
        title: String,
        component: String,
        props: Map<String, Value>,
    },
    CloseWindow(WindowTarget),
    MinimizeWindow(WindowTarget),
    ClearTerminal,
    Login,
    Logout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResponse {
    pub output: Vec<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl Default for CommandResponse {
    fn default() -> Self {
        Self::ok(Vec::new())
    }
}

impl CommandResponse {
    pub fn ok(output: Vec<String>) -> Self {
        Self {
            output,
            success: true,
            action: None,
        }
    }

    pub fn line(line: impl Into<String>) -> Self {
        Self::ok(vec![line.into()])
    }

    /// A single failure line.
    pub fn error(line: impl Into<String>) -> Self {
        Self {
            output: vec![line.into()],
            success: false,
            action: None,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}
