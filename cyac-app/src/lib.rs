pub mod config;
pub mod login;
pub mod repl;

pub use config::{Config, ConfigError};
pub use repl::Repl;
