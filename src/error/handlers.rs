//! Error handlers
//!
//! Logs errors and maps them to protocol reply codes.

use crate::error::types::{AppError, AuthError, NavigateError};
use crate::protocol::responses;
use log::{error, warn};

/// Log an application error at a level matching its severity
pub fn handle_error(err: &AppError) {
    match err {
        AppError::IoError(_) | AppError::Config(_) => error!("Gallery Server Error: {}", err),
        AppError::Auth(e) if e.is_store_error() => error!("Gallery Server Error: {}", err),
        _ => warn!("{}", err),
    }
}

/// Convert error to protocol reply code
pub fn error_to_reply_code(err: &AppError) -> u16 {
    match err {
        AppError::Auth(AuthError::EmptyField) => responses::EMPTY_FIELD,
        AppError::Auth(AuthError::InvalidState(_)) => responses::BAD_SEQUENCE,
        AppError::Auth(e) if e.is_store_error() => responses::STORE_UNAVAILABLE,
        AppError::Auth(_) => responses::AUTH_FAILED,
        AppError::Session(_) => responses::BAD_SEQUENCE,
        AppError::Navigate(NavigateError::NotAuthenticated) => responses::AUTH_FAILED,
        AppError::Navigate(_) => responses::PAGE_NOT_NAVIGABLE,
        AppError::IoError(_) | AppError::Config(_) => responses::SERVICE_UNAVAILABLE,
        AppError::ProtocolError(_) => responses::UNKNOWN_COMMAND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::session::Page;

    #[test]
    fn test_reply_codes() {
        assert_eq!(error_to_reply_code(&AuthError::EmptyField.into()), 501);
        assert_eq!(
            error_to_reply_code(&AuthError::UnknownUser("eve".into()).into()),
            530
        );
        assert_eq!(
            error_to_reply_code(&AuthError::WrongPassword("alice".into()).into()),
            530
        );
        assert_eq!(
            error_to_reply_code(&AuthError::MissingStore("users.csv".into()).into()),
            451
        );
        assert_eq!(error_to_reply_code(&SessionError::NotLoggedIn.into()), 503);
        assert_eq!(
            error_to_reply_code(&NavigateError::NotAuthenticated.into()),
            530
        );
        assert_eq!(
            error_to_reply_code(&NavigateError::NotNavigable(Page::Login).into()),
            504
        );
    }

    #[test]
    fn test_internal_error_codes() {
        let protocol = AppError::ProtocolError("Command too long".into());
        assert_eq!(error_to_reply_code(&protocol), 500);
        assert_eq!(protocol.notice(), "Command too long");

        let io: AppError = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use").into();
        assert_eq!(error_to_reply_code(&io), 421);
        assert_eq!(io.notice(), "Internal server error");

        let config: AppError = config::ConfigError::Message("bad port".into()).into();
        assert_eq!(error_to_reply_code(&config), 421);
        assert_eq!(config.notice(), "Internal server error");
    }

    #[test]
    fn test_invalid_credentials_grouping() {
        assert!(AuthError::UnknownUser("eve".into()).is_invalid_credentials());
        assert!(AuthError::WrongPassword("alice".into()).is_invalid_credentials());
        assert!(!AuthError::EmptyField.is_invalid_credentials());
        assert!(!AuthError::MissingStore("users.csv".into()).is_invalid_credentials());
    }
}
