use crate::interpreter::CommandInterpreter;
use crate::response::{Action, CommandResponse, WindowTarget};
use cyac_vfs::FileSystem;
use cyac_windows::WindowStore;

pub const BANNER: &[&str] = &[
    "CYBER ACME OS v3.4.0 - (c) 2025 CyberAcme Technologies",
    "---------------------------------------------------",
    "Type \"help\" for a list of available commands",
];

/// Owns everything a terminal session touches and applies the actions the
/// interpreter asks for.
pub struct Shell {
    fs: FileSystem,
    windows: WindowStore,
    interpreter: CommandInterpreter,
    scrollback: Vec<String>,
}

impl Shell {
    pub fn new(fs: FileSystem) -> Self {
        Self::with_interpreter(fs, CommandInterpreter::new())
    }

    pub fn with_interpreter(fs: FileSystem, interpreter: CommandInterpreter) -> Self {
        Self {
            fs,
            windows: WindowStore::new(),
            interpreter,
            scrollback: BANNER.iter().map(|line| line.to_string()).collect(),
        }
    }

    pub fn fs(&self) -> &FileSystem {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut FileSystem {
        &mut self.fs
    }

    pub fn windows(&self) -> &WindowStore {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowStore {
        &mut self.windows
    }

    pub fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    pub fn scrollback(&self) -> &[String] {
        &self.scrollback
    }

    pub fn prompt(&self) -> String {
        let user = if self.fs.is_logged_in() { "ADMIN" } else { "GUEST" };
        format!("{}@CYAC:{}$", user, self.fs.current_path())
    }

    /// Echo, dispatch, record output and apply the resulting action.
    pub fn run(&mut self, line: &str) -> CommandResponse {
        let echo = format!("{} {}", self.prompt(), line);
        self.scrollback.push(echo);

        let response = self.interpreter.execute(line, &mut self.fs);
        self.scrollback.extend(response.output.iter().cloned());

        if let Some(action) = &response.action {
            self.apply(action);
        }
        response
    }

    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::OpenWindow {
                id,
                title,
                component,
                props,
            } => self
                .windows
                .open(id, title, component, Some(props.clone()), None),
            Action::CloseWindow(WindowTarget::All) => self.windows.close_all(),
            Action::CloseWindow(WindowTarget::Id(id)) => self.windows.close(id),
            Action::MinimizeWindow(WindowTarget::All) => self.windows.minimize_all(),
            Action::MinimizeWindow(WindowTarget::Id(id)) => self.windows.minimize(id),
            Action::ClearTerminal => self.scrollback.clear(),
            // cursor and session already changed; login is verified by the front end
            Action::Navigate(_) | Action::Login | Action::Logout => {}
        }
    }

    /// Complete a login the front end has verified.
    pub fn login(&mut self) {
        self.fs.login();
    }

    pub fn print(&mut self, line: impl Into<String>) {
        self.scrollback.push(line.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyac_windows::InputFocus;

    #[test]
    fn test_banner_seeds_scrollback() {
        let shell = Shell::new(FileSystem::new());
        assert_eq!(shell.scrollback().len(), 3);
        assert!(shell.scrollback()[0].starts_with("CYBER ACME OS v3.4.0"));
    }

    #[test]
    fn test_run_echoes_prompt() {
        let mut shell = Shell::new(FileSystem::new());
        shell.run("pwd");
        let tail = &shell.scrollback()[3..];
        assert_eq!(tail, ["GUEST@CYAC:/home$ pwd", "/home"]);

        shell.login();
        assert_eq!(shell.prompt(), "ADMIN@CYAC:/home$");
    }

    #[test]
    fn test_clear_empties_scrollback() {
        let mut shell = Shell::new(FileSystem::new());
        shell.run("clear");
        assert!(shell.scrollback().is_empty());
    }

    #[test]
    fn test_cat_scene_opens_window_once() {
        let mut shell = Shell::new(FileSystem::new());
        shell.run("cd programs/games");
        shell.run("cat tetris");
        shell.run("cat tetris");

        assert_eq!(shell.windows().len(), 1);
        let window = shell.windows().get("window-tetris").unwrap();
        assert_eq!(window.component, "TETRIS_GAME_COMPONENT");
        assert_eq!(shell.windows().active_window_id(), Some("window-tetris"));
        assert!(shell.windows().input_focus().is_window("window-tetris"));
    }

    #[test]
    fn test_bulk_window_commands() {
        let mut shell = Shell::new(FileSystem::new());
        shell.run("cd programs/utilities");
        shell.run("cat calculator");
        shell.run("cat clock");

        shell.run("minimizeall");
        assert!(shell.windows().windows().iter().all(|w| w.minimized));
        assert_eq!(shell.windows().input_focus(), &InputFocus::Terminal);

        shell.run("closeall");
        assert!(shell.windows().is_empty());
    }
}
