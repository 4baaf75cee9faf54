//! Module `commands`
//!
//! Defines the commands a client sends and the result of executing one.

/// A command parsed from one line of client input.
///
/// `User` and `Pass` fill in the login form; `Submit` sends it. `Nav` and
/// `Logout` are the sidebar buttons.
#[derive(Debug, PartialEq)]
pub enum Command {
    User(String),
    Pass(String),
    Submit,
    Nav(String),
    Logout,
    Show,
    Quit,
    Unknown(String),
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses a raw line received from a client into a `Command`.
///
/// Verbs are case-insensitive; the argument is the rest of the line and may be empty.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "USER" => Command::User(arg.to_string()),
        "PASS" => Command::Pass(arg.to_string()),
        "SUBMIT" | "LOGIN" => Command::Submit,
        "NAV" => Command::Nav(arg.to_string()),
        "LOGOUT" => Command::Logout,
        "SHOW" => Command::Show,
        "QUIT" | "Q" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}
