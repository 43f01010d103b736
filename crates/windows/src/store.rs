use crate::focus::InputFocus;
use serde::Serialize;
use serde_json::{Map, Value};

const BASE_Z_INDEX: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: String,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    pub maximized: bool,
    pub minimized: bool,
    pub component: String,
    pub props: Map<String, Value>,
}

/// Ordered collection of open windows.
///
/// The z-order counter only grows: every creation and every focus takes the
/// next value, so the focused window is always strictly on top.
#[derive(Debug)]
pub struct WindowStore {
    windows: Vec<WindowRecord>,
    active: Option<String>,
    highest_z: i64,
    input: InputFocus,
}

impl Default for WindowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowStore {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            highest_z: BASE_Z_INDEX,
            input: InputFocus::Terminal,
        }
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn active_window_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn input_focus(&self) -> &InputFocus {
        &self.input
    }

    /// Hand keyboard input to another surface.
    pub fn claim_input(&mut self, owner: InputFocus) {
        tracing::debug!("Input focus: {:?} -> {:?}", self.input, owner);
        self.input = owner;
    }

    fn next_z(&mut self) -> i64 {
        let top = self.windows.iter().map(|w| w.z_index).max().unwrap_or(BASE_Z_INDEX);
        self.highest_z = self.highest_z.max(top) + 1;
        self.highest_z
    }

    /// Open a window, or restore and raise it if `id` is already open.
    pub fn open(
        &mut self,
        id: &str,
        title: &str,
        component: &str,
        props: Option<Map<String, Value>>,
        geometry: Option<Geometry>,
    ) {
        let z_index = self.next_z();

        if let Some(existing) = self.get_mut(id) {
            existing.minimized = false;
            existing.z_index = z_index;
            tracing::debug!("Raised existing window {} to z={}", id, z_index);
        } else {
            let geometry = geometry.unwrap_or_default();
            self.windows.push(WindowRecord {
                id: id.to_string(),
                title: title.to_string(),
                x: geometry.x,
                y: geometry.y,
                width: geometry.width,
                height: geometry.height,
                z_index,
                maximized: false,
                minimized: false,
                component: component.to_string(),
                props: props.unwrap_or_default(),
            });
            tracing::info!("Opened window {} ({})", id, component);
        }

        self.active = Some(id.to_string());
        self.input = InputFocus::Window(id.to_string());
    }

    /// Topmost visible window, skipping `excluding`.
    fn topmost_visible(&self, excluding: &str) -> Option<String> {
        self.windows
            .iter()
            .filter(|w| w.id != excluding && !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id.clone())
    }

    fn release_input_from(&mut self, id: &str) {
        if self.input.is_window(id) {
            self.input = InputFocus::Terminal;
        }
    }

    pub fn close(&mut self, id: &str) {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        if self.windows.len() == before {
            return;
        }

        if self.active.as_deref() == Some(id) {
            self.active = self.topmost_visible(id);
        }
        self.release_input_from(id);
        tracing::info!("Closed window {}", id);
    }

    pub fn minimize(&mut self, id: &str) {
        let Some(window) = self.get_mut(id) else {
            return;
        };
        window.minimized = true;

        if self.active.as_deref() == Some(id) {
            self.active = self.topmost_visible(id);
        }
        self.release_input_from(id);
    }

    /// Toggle maximized; the window becomes active either way.
    pub fn maximize(&mut self, id: &str) {
        let Some(window) = self.get_mut(id) else {
            return;
        };
        window.maximized = !window.maximized;
        self.active = Some(id.to_string());
    }

    /// Bring to front: the primitive behind click, drag-start and resize-start.
    pub fn focus(&mut self, id: &str) {
        if self.get(id).is_none() {
            return;
        }
        let z_index = self.next_z();
        if let Some(window) = self.get_mut(id) {
            window.z_index = z_index;
        }
        self.active = Some(id.to_string());
        self.input = InputFocus::Window(id.to_string());
    }

    /// Change the active window without restacking.
    pub fn set_active(&mut self, id: Option<&str>) {
        self.active = id.map(str::to_string);
    }

    pub fn move_to(&mut self, id: &str, x: f64, y: f64) {
        if let Some(window) = self.get_mut(id) {
            window.x = x;
            window.y = y;
        }
    }

    pub fn resize(&mut self, id: &str, width: f64, height: f64) {
        if let Some(window) = self.get_mut(id) {
            window.width = width;
            window.height = height;
        }
    }

    pub fn close_all(&mut self) {
        self.windows.clear();
        self.active = None;
        self.input = InputFocus::Terminal;
        tracing::info!("Closed all windows");
    }

    pub fn minimize_all(&mut self) {
        for window in &mut self.windows {
            window.minimized = true;
        }
        self.active = None;
        self.input = InputFocus::Terminal;
    }
}
