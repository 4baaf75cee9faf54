//! Command handlers
//!
//! Binds protocol commands to session operations. Every successful
//! transition replaces the connection's snapshot and replies with the
//! freshly rendered page; failures reply with the user-visible notice and
//! leave the snapshot untouched.

use log::debug;

use crate::auth::LoadedCredentials;
use crate::error::handlers::{error_to_reply_code, handle_error};
use crate::error::{AppError, AuthError};
use crate::pages;
use crate::protocol::responses::{self, format_multiline, format_response};
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::session::{self, Page, SessionState};

/// The login form fields as the client has filled them in so far.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Per-connection UI state: the session snapshot plus the login form.
#[derive(Debug, Default)]
pub struct Connection {
    session: SessionState,
    form: LoginForm,
}

impl Connection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }
}

/// The reply sent when a client connects: the login page.
pub fn greeting(credentials: &LoadedCredentials) -> String {
    let page = pages::render(&SessionState::default(), credentials.error.as_ref());
    format_multiline(responses::READY, &page, "Welcome to RAX Gallery")
}

/// Dispatches a received command to its handler.
pub fn handle_command(
    conn: &mut Connection,
    command: &Command,
    credentials: &LoadedCredentials,
) -> CommandResult {
    debug!("Handling {:?} on {} page", command, conn.session.current_page());

    match command {
        Command::User(username) => handle_cmd_user(conn, username),
        Command::Pass(password) => handle_cmd_pass(conn, password),
        Command::Submit => handle_cmd_submit(conn, credentials),
        Command::Nav(target) => handle_cmd_nav(conn, target, credentials),
        Command::Logout => handle_cmd_logout(conn, credentials),
        Command::Show => handle_cmd_show(conn, credentials),
        Command::Quit => handle_cmd_quit(),
        Command::Unknown(_) => handle_cmd_unknown(),
    }
}

fn success(reply: String) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(reply),
    }
}

fn failure(err: AppError) -> CommandResult {
    failure_with(err, &[])
}

/// A failure reply, with `extra` notices shown above the error's own.
fn failure_with(err: AppError, extra: &[String]) -> CommandResult {
    handle_error(&err);
    let notice = err.notice();
    CommandResult {
        status: CommandStatus::Failure(err.to_string()),
        message: Some(format_multiline(error_to_reply_code(&err), extra, &notice)),
    }
}

/// Renders the connection's current page as a reply with `code` and `message`.
fn page_reply(
    conn: &Connection,
    credentials: &LoadedCredentials,
    code: u16,
    message: &str,
) -> String {
    let page = pages::render(&conn.session, credentials.error.as_ref());
    format_multiline(code, &page, message)
}

fn ensure_on_login_page(conn: &Connection) -> Result<(), AppError> {
    if conn.session.is_authenticated() {
        return Err(AuthError::InvalidState("login form is not shown".into()).into());
    }
    Ok(())
}

/// Handles USER: fills in the username field of the login form.
fn handle_cmd_user(conn: &mut Connection, username: &str) -> CommandResult {
    if let Err(e) = ensure_on_login_page(conn) {
        return failure(e);
    }
    conn.form.username = username.to_string();
    success(format_response(responses::OK, "Username entered"))
}

/// Handles PASS: fills in the password field of the login form.
fn handle_cmd_pass(conn: &mut Connection, password: &str) -> CommandResult {
    if let Err(e) = ensure_on_login_page(conn) {
        return failure(e);
    }
    conn.form.password = password.to_string();
    success(format_response(responses::OK, "Password entered"))
}

/// Handles SUBMIT: authenticates the form contents.
///
/// With a broken credential store no record can match; the store notice is
/// shown alongside the rejection.
fn handle_cmd_submit(conn: &mut Connection, credentials: &LoadedCredentials) -> CommandResult {
    match session::submit_credentials(
        &conn.session,
        &credentials.store,
        &conn.form.username,
        &conn.form.password,
    ) {
        Ok(next) => {
            conn.session = next;
            conn.form = LoginForm::default();
            success(page_reply(
                conn,
                credentials,
                responses::LOGIN_SUCCESS,
                "Login successful",
            ))
        }
        Err(e) => {
            let extra: Vec<String> = credentials
                .error
                .iter()
                .map(|store_err| format!("[error] {}", store_err.notice()))
                .collect();
            failure_with(e.into(), &extra)
        }
    }
}

/// Handles NAV: switches to another page from the sidebar menu.
fn handle_cmd_nav(
    conn: &mut Connection,
    target: &str,
    credentials: &LoadedCredentials,
) -> CommandResult {
    let result = target
        .parse::<Page>()
        .and_then(|page| session::navigate(&conn.session, page));

    match result {
        Ok(next) => {
            conn.session = next;
            let message = format!("{} page", conn.session.current_page());
            success(page_reply(conn, credentials, responses::NAVIGATED, &message))
        }
        Err(e) => failure(e.into()),
    }
}

/// Handles LOGOUT: resets the session and returns to the login page.
fn handle_cmd_logout(conn: &mut Connection, credentials: &LoadedCredentials) -> CommandResult {
    match session::logout(&conn.session) {
        Ok(next) => {
            conn.session = next;
            conn.form = LoginForm::default();
            success(page_reply(conn, credentials, responses::LOGGED_OUT, "Logged out"))
        }
        Err(e) => failure(e.into()),
    }
}

/// Handles SHOW: re-renders the current page without changing state.
fn handle_cmd_show(conn: &Connection, credentials: &LoadedCredentials) -> CommandResult {
    let message = format!("{} page", conn.session.current_page());
    success(page_reply(conn, credentials, responses::OK, &message))
}

/// Handles QUIT: signals connection close.
fn handle_cmd_quit() -> CommandResult {
    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(format_response(responses::GOODBYE, "Goodbye")),
    }
}

fn handle_cmd_unknown() -> CommandResult {
    failure(AppError::ProtocolError("Unknown command".into()))
}
