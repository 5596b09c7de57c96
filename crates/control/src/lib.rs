pub mod commands;
pub mod listener;

pub use commands::{parse_command, Command};
pub use listener::{spawn_listener, spawn_stdin_listener};
