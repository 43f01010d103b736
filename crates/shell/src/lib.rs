//! Faux terminal for the CyberAcme desktop: command parsing and dispatch,
//! the inline markup language, the state-owning shell and the paced queue.

pub mod handlers;
pub mod interpreter;
pub mod markup;
pub mod parser;
pub mod queue;
pub mod registry;
pub mod response;
pub mod shell;

pub use interpreter::CommandInterpreter;
pub use parser::{parse, ParsedCommand};
pub use queue::{CommandQueue, CommandSink, DEFAULT_DELAY};
pub use registry::{PayloadRegistry, UiUnit};
pub use response::{Action, CommandResponse, WindowTarget};
pub use shell::Shell;
