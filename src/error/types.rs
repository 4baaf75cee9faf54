//! Error types
//!
//! Defines domain-specific error types for each module of the gallery server.
//! Every domain error carries a `notice()`, the text shown to the user.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::session::Page;

/// Authentication and credential store errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credential table does not exist
    MissingStore(PathBuf),
    /// The credential table exists but could not be used
    MalformedStore { path: PathBuf, reason: String },
    /// Username or password was blank after trimming
    EmptyField,
    UnknownUser(String),
    WrongPassword(String),
    InvalidState(String),
}

impl AuthError {
    /// True for the failures that mean "these credentials do not log anyone in".
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, AuthError::UnknownUser(_) | AuthError::WrongPassword(_))
    }

    /// True when the credential table could not be loaded.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingStore(_) | AuthError::MalformedStore { .. }
        )
    }

    pub fn notice(&self) -> String {
        match self {
            AuthError::MissingStore(path) => format!(
                "The credential file {} was not found. Make sure it is next to the application.",
                path.display()
            ),
            AuthError::MalformedStore { path, .. } => format!(
                "The credential file {} could not be read.",
                path.display()
            ),
            AuthError::EmptyField => "Username and password must both be filled in".to_string(),
            AuthError::UnknownUser(_) => "Unknown user or bad password".to_string(),
            AuthError::WrongPassword(_) => "Wrong password".to_string(),
            AuthError::InvalidState(_) => "Already logged in".to_string(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingStore(p) => write!(f, "Credential store not found: {}", p.display()),
            AuthError::MalformedStore { path, reason } => {
                write!(f, "Credential store {} unusable: {}", path.display(), reason)
            }
            AuthError::EmptyField => write!(f, "Empty username or password"),
            AuthError::UnknownUser(u) => write!(f, "User not found: {}", u),
            AuthError::WrongPassword(u) => write!(f, "Invalid password for user: {}", u),
            AuthError::InvalidState(s) => write!(f, "Invalid state: {}", s),
        }
    }
}

impl std::error::Error for AuthError {}

/// Session lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    NotLoggedIn,
}

impl SessionError {
    pub fn notice(&self) -> String {
        match self {
            SessionError::NotLoggedIn => "You are not logged in".to_string(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotLoggedIn => write!(f, "User not logged in"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Page navigation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateError {
    NotAuthenticated,
    NotNavigable(Page),
    UnknownPage(String),
}

impl NavigateError {
    pub fn notice(&self) -> String {
        match self {
            NavigateError::NotAuthenticated => "Please log in first".to_string(),
            NavigateError::NotNavigable(page) => format!("The {} page is not in the menu", page),
            NavigateError::UnknownPage(name) => format!("No such page: {}", name),
        }
    }
}

impl fmt::Display for NavigateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigateError::NotAuthenticated => write!(f, "Navigation requires authentication"),
            NavigateError::NotNavigable(page) => write!(f, "Page not navigable: {}", page),
            NavigateError::UnknownPage(name) => write!(f, "Unknown page: {}", name),
        }
    }
}

impl std::error::Error for NavigateError {}

/// General application error that encompasses all error types
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Session(SessionError),
    Navigate(NavigateError),
    IoError(io::Error),
    Config(config::ConfigError),
    ProtocolError(String),
}

impl AppError {
    /// User-visible text for the error
    pub fn notice(&self) -> String {
        match self {
            AppError::Auth(e) => e.notice(),
            AppError::Session(e) => e.notice(),
            AppError::Navigate(e) => e.notice(),
            AppError::IoError(_) | AppError::Config(_) => "Internal server error".to_string(),
            AppError::ProtocolError(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Auth(e) => write!(f, "Authentication error: {}", e),
            AppError::Session(e) => write!(f, "Session error: {}", e),
            AppError::Navigate(e) => write!(f, "Navigate error: {}", e),
            AppError::IoError(e) => write!(f, "I/O error: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::ProtocolError(e) => write!(f, "Protocol error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        AppError::Auth(error)
    }
}

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        AppError::Session(error)
    }
}

impl From<NavigateError> for AppError {
    fn from(error: NavigateError) -> Self {
        AppError::Navigate(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        AppError::IoError(error)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error)
    }
}
