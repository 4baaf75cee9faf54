//! Authentication validator
//!
//! Checks submitted credentials against the credential store. Passwords are
//! compared as plain trimmed strings.

use super::credentials::CredentialStore;
use crate::error::AuthError;

/// Validates a login form submission.
///
/// Returns the trimmed username on success.
pub fn validate_credentials(
    store: &CredentialStore,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let username = username.trim();
    let password = password.trim();

    if username.is_empty() || password.is_empty() {
        return Err(AuthError::EmptyField);
    }

    match store.find_by_name(username) {
        Some(record) if record.password == password => Ok(username.to_string()),
        Some(_) => Err(AuthError::WrongPassword(username.to_string())),
        None => Err(AuthError::UnknownUser(username.to_string())),
    }
}
