use crate::handlers;
use crate::parser::{parse, ParsedCommand};
use crate::registry::PayloadRegistry;
use crate::response::{Action, CommandResponse, WindowTarget};
use cyac_vfs::FileSystem;

const HELP: &[&str] = &[
    "CYBER ACME OS v3.4.0 - HELP",
    "----------------------------",
    "Available commands:",
    "",
    "COMMAND: ls [directory]",
    "DESCRIPTION: List files and directories in the current or specified directory",
    "",
    "COMMAND: cd [directory]",
    "DESCRIPTION: Change to specified directory",
    "",
    "COMMAND: cat [file]",
    "DESCRIPTION: Display file contents or run program/scene",
    "",
    "COMMAND: pwd",
    "DESCRIPTION: Print current working directory",
    "",
    "COMMAND: clear",
    "DESCRIPTION: Clear terminal screen",
    "",
    "COMMAND: login",
    "DESCRIPTION: Login to access restricted areas",
    "",
    "COMMAND: logout",
    "DESCRIPTION: Log out of the system",
    "",
    "COMMAND: home",
    "DESCRIPTION: Return to the home directory",
    "",
    "COMMAND: minimizeall",
    "DESCRIPTION: Minimize all open windows",
    "",
    "COMMAND: closeall",
    "DESCRIPTION: Close all open windows",
    "",
    "COMMAND: help",
    "DESCRIPTION: Display this help information",
    "",
    "HINT: Files with .txt extension are text files, others are usually programs or scenes",
];

/// Turns command lines into responses. Every failure comes back as output
/// with `success == false`; nothing escapes as an error or a panic.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    registry: PayloadRegistry,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::with_registry(PayloadRegistry::with_builtins())
    }

    pub fn with_registry(registry: PayloadRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PayloadRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PayloadRegistry {
        &mut self.registry
    }

    pub fn execute(&self, line: &str, fs: &mut FileSystem) -> CommandResponse {
        self.dispatch(&parse(line), fs)
    }

    /// Run several lines in order; each sees the state the previous one left.
    pub fn execute_commands<S: AsRef<str>>(
        &self,
        lines: &[S],
        fs: &mut FileSystem,
    ) -> Vec<CommandResponse> {
        lines
            .iter()
            .map(|line| self.execute(line.as_ref(), fs))
            .collect()
    }

    pub fn dispatch(&self, command: &ParsedCommand, fs: &mut FileSystem) -> CommandResponse {
        tracing::debug!("Dispatching '{}' {:?}", command.verb, command.args);

        match command.verb.as_str() {
            "" => CommandResponse::default(),
            "ls" => handlers::ls(&command.args, fs),
            "cd" => handlers::cd(&command.args, fs),
            "cat" => handlers::cat(&command.args, fs, &self.registry),
            "pwd" => CommandResponse::line(fs.current_path()),
            "clear" => CommandResponse::default().with_action(Action::ClearTerminal),
            "help" => CommandResponse::ok(HELP.iter().map(|line| line.to_string()).collect()),
            "login" => {
                if fs.is_logged_in() {
                    CommandResponse::line("Already logged in as ADMIN")
                } else {
                    CommandResponse::line("LOGIN ATTEMPT").with_action(Action::Login)
                }
            }
            "logout" => {
                if fs.is_logged_in() {
                    fs.logout();
                    CommandResponse::line("Logged out successfully").with_action(Action::Logout)
                } else {
                    CommandResponse::line("Not currently logged in")
                }
            }
            "home" => {
                fs.navigate_to("/home");
                CommandResponse::line("Returning to home screen")
                    .with_action(Action::Navigate("/home".to_string()))
            }
            "minimizeall" => CommandResponse::line("Minimizing all windows")
                .with_action(Action::MinimizeWindow(WindowTarget::All)),
            "closeall" => CommandResponse::line("Closing all windows")
                .with_action(Action::CloseWindow(WindowTarget::All)),
            unknown => CommandResponse::error(format!("ERROR: Unknown command '{}'", unknown)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_empty_success() {
        let interpreter = CommandInterpreter::new();
        let mut fs = FileSystem::new();
        let response = interpreter.execute("   ", &mut fs);
        assert!(response.success);
        assert!(response.output.is_empty());
        assert!(response.action.is_none());
    }

    #[test]
    fn test_unknown_verb() {
        let interpreter = CommandInterpreter::new();
        let mut fs = FileSystem::new();
        let response = interpreter.execute("Hack the planet", &mut fs);
        assert!(!response.success);
        assert_eq!(response.output, vec!["ERROR: Unknown command 'hack'"]);
    }

    #[test]
    fn test_clear_has_no_output() {
        let interpreter = CommandInterpreter::new();
        let mut fs = FileSystem::new();
        let response = interpreter.execute("clear", &mut fs);
        assert!(response.output.is_empty());
        assert_eq!(response.action, Some(Action::ClearTerminal));
    }

    #[test]
    fn test_help_lists_every_verb() {
        let interpreter = CommandInterpreter::new();
        let mut fs = FileSystem::new();
        let response = interpreter.execute("help", &mut fs);
        for verb in [
            "ls",
            "cd",
            "cat",
            "pwd",
            "clear",
            "login",
            "logout",
            "home",
            "minimizeall",
            "closeall",
            "help",
        ] {
            assert!(response
                .output
                .iter()
                .any(|line| line.starts_with(&format!("COMMAND: {}", verb))));
        }
    }

    #[test]
    fn test_login_and_logout_messages() {
        let interpreter = CommandInterpreter::new();
        let mut fs = FileSystem::new();

        let response = interpreter.execute("logout", &mut fs);
        assert_eq!(response.output, vec!["Not currently logged in"]);
        assert!(response.action.is_none());

        let response = interpreter.execute("login", &mut fs);
        assert_eq!(response.output, vec!["LOGIN ATTEMPT"]);
        assert_eq!(response.action, Some(Action::Login));
        assert!(!fs.is_logged_in());

        fs.login();
        let response = interpreter.execute("login", &mut fs);
        assert_eq!(response.output, vec!["Already logged in as ADMIN"]);

        let response = interpreter.execute("logout", &mut fs);
        assert_eq!(response.output, vec!["Logged out successfully"]);
        assert_eq!(response.action, Some(Action::Logout));
        assert!(!fs.is_logged_in());
    }

    #[test]
    fn test_home_moves_cursor() {
        let interpreter = CommandInterpreter::new();
        let mut fs = FileSystem::new();
        fs.navigate_to("/home/programs/games");
        let response = interpreter.execute("home", &mut fs);
        assert_eq!(response.output, vec!["Returning to home screen"]);
        assert_eq!(fs.current_path(), "/home");
    }

    #[test]
    fn test_bulk_window_verbs() {
        let interpreter = CommandInterpreter::new();
        let mut fs = FileSystem::new();
        assert_eq!(
            interpreter.execute("minimizeall", &mut fs).action,
            Some(Action::MinimizeWindow(WindowTarget::All))
        );
        assert_eq!(
            interpreter.execute("CLOSEALL", &mut fs).action,
            Some(Action::CloseWindow(WindowTarget::All))
        );
    }

    #[test]
    fn test_execute_commands_in_order() {
        let interpreter = CommandInterpreter::new();
        let mut fs = FileSystem::new();
        let responses = interpreter.execute_commands(&["cd programs", "cd games", "pwd"], &mut fs);
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[2].output, vec!["/home/programs/games"]);
    }
}
