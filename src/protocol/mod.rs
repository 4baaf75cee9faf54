//! UI host protocol
//!
//! Handles command parsing, reply formatting, and dispatch of commands to
//! session operations.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::{Connection, greeting, handle_command};
