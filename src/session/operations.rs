//! Session operations
//!
//! Login, logout and navigation transitions. Each takes the current snapshot
//! and returns the next one; on error the caller keeps the snapshot it has.

use log::info;

use crate::auth::{CredentialStore, validate_credentials};
use crate::error::{AuthError, NavigateError, SessionError};
use crate::session::state::{Page, SessionState};

/// Handles a login form submission
pub fn submit_credentials(
    state: &SessionState,
    store: &CredentialStore,
    username: &str,
    password: &str,
) -> Result<SessionState, AuthError> {
    if state.is_authenticated() {
        return Err(AuthError::InvalidState("already logged in".into()));
    }

    let username = validate_credentials(store, username, password)?;
    info!("User {} logged in", username);

    Ok(SessionState::signed_in(username, Page::Home))
}

/// Handles the logout button
pub fn logout(state: &SessionState) -> Result<SessionState, SessionError> {
    match state.username() {
        Some(username) => {
            info!("User {} logged out", username);
            Ok(SessionState::default())
        }
        None => Err(SessionError::NotLoggedIn),
    }
}

/// Handles a sidebar navigation button
pub fn navigate(state: &SessionState, target: Page) -> Result<SessionState, NavigateError> {
    if !state.is_authenticated() {
        return Err(NavigateError::NotAuthenticated);
    }

    if !target.is_navigable() {
        return Err(NavigateError::NotNavigable(target));
    }

    Ok(state.with_page(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialRecord;

    fn store() -> CredentialStore {
        CredentialStore::from_records(vec![CredentialRecord::new(" alice ", "secret")])
    }

    fn logged_in() -> SessionState {
        submit_credentials(&SessionState::default(), &store(), "alice", "secret").unwrap()
    }

    #[test]
    fn test_empty_fields_leave_state_unchanged() {
        let state = SessionState::default();

        assert_eq!(
            submit_credentials(&state, &store(), "", "x"),
            Err(AuthError::EmptyField)
        );
        assert_eq!(
            submit_credentials(&state, &store(), "x", ""),
            Err(AuthError::EmptyField)
        );
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let err = submit_credentials(&SessionState::default(), &store(), "alice", "wrongpass")
            .unwrap_err();
        assert!(err.is_invalid_credentials());
        assert_eq!(err.notice(), "Wrong password");
    }

    #[test]
    fn test_unknown_user_is_rejected() {
        let err = submit_credentials(&SessionState::default(), &store(), "bob", "secret")
            .unwrap_err();
        assert!(err.is_invalid_credentials());
        assert_eq!(err.notice(), "Unknown user or bad password");
    }

    #[test]
    fn test_successful_login() {
        let state = logged_in();
        assert!(state.is_authenticated());
        assert_eq!(state.username(), Some("alice"));
        assert_eq!(state.current_page(), Page::Home);
    }

    #[test]
    fn test_login_trims_username() {
        let state =
            submit_credentials(&SessionState::default(), &store(), "  alice ", " secret").unwrap();
        assert_eq!(state.username(), Some("alice"));
    }

    #[test]
    fn test_login_while_logged_in_is_rejected() {
        let state = logged_in();
        assert!(matches!(
            submit_credentials(&state, &store(), "alice", "secret"),
            Err(AuthError::InvalidState(_))
        ));
    }

    #[test]
    fn test_navigate_keeps_identity() {
        let state = navigate(&logged_in(), Page::Gallery).unwrap();
        assert_eq!(state.current_page(), Page::Gallery);
        assert!(state.is_authenticated());
        assert_eq!(state.username(), Some("alice"));

        let state = navigate(&state, Page::Home).unwrap();
        assert_eq!(state.current_page(), Page::Home);
    }

    #[test]
    fn test_navigate_to_login_is_rejected() {
        assert_eq!(
            navigate(&logged_in(), Page::Login),
            Err(NavigateError::NotNavigable(Page::Login))
        );
    }

    #[test]
    fn test_logout_resets_and_blocks_navigation() {
        let state = logout(&navigate(&logged_in(), Page::Gallery).unwrap()).unwrap();
        assert_eq!(state, SessionState::default());

        assert_eq!(
            navigate(&state, Page::Home),
            Err(NavigateError::NotAuthenticated)
        );
        assert_eq!(state.current_page(), Page::Login);
    }

    #[test]
    fn test_logout_when_anonymous_is_rejected() {
        assert_eq!(
            logout(&SessionState::default()),
            Err(SessionError::NotLoggedIn)
        );
    }

    #[test]
    fn test_empty_store_rejects_every_login() {
        let err = submit_credentials(
            &SessionState::default(),
            &CredentialStore::default(),
            "alice",
            "secret",
        )
        .unwrap_err();
        assert!(err.is_invalid_credentials());
    }
}
