//! Session state
//!
//! Defines the immutable per-session snapshot and the pages it can select.

use std::fmt;
use std::str::FromStr;

use crate::error::NavigateError;

/// One of the views the UI host can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Login,
    Home,
    Gallery,
}

impl Page {
    /// Pages reachable from the sidebar menu.
    pub const MENU: [Page; 2] = [Page::Home, Page::Gallery];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Home => "home",
            Page::Gallery => "gallery",
        }
    }

    pub fn is_navigable(&self) -> bool {
        Page::MENU.contains(self)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = NavigateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" => Ok(Page::Login),
            "home" => Ok(Page::Home),
            "gallery" | "album" | "photos" => Ok(Page::Gallery),
            other => Err(NavigateError::UnknownPage(other.to_string())),
        }
    }
}

/// Snapshot of one session.
///
/// Fields are private so only valid combinations exist: an anonymous session
/// is always on the login page, and an authenticated one always has a username.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    username: Option<String>,
    current_page: Page,
}

impl SessionState {
    /// A freshly authenticated session for `username`, on `page`.
    pub(crate) fn signed_in(username: String, page: Page) -> Self {
        debug_assert!(page.is_navigable());
        Self {
            username: Some(username),
            current_page: page,
        }
    }

    /// Same user, different page.
    pub(crate) fn with_page(&self, page: Page) -> Self {
        Self {
            username: self.username.clone(),
            current_page: page,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous_login() {
        let state = SessionState::default();
        assert!(!state.is_authenticated());
        assert_eq!(state.username(), None);
        assert_eq!(state.current_page(), Page::Login);
    }

    #[test]
    fn test_parse_page() {
        assert_eq!("home".parse::<Page>(), Ok(Page::Home));
        assert_eq!(" Gallery ".parse::<Page>(), Ok(Page::Gallery));
        assert_eq!("LOGIN".parse::<Page>(), Ok(Page::Login));
        assert_eq!(
            "attic".parse::<Page>(),
            Err(NavigateError::UnknownPage("attic".into()))
        );
    }

    #[test]
    fn test_menu_excludes_login() {
        assert!(Page::Home.is_navigable());
        assert!(Page::Gallery.is_navigable());
        assert!(!Page::Login.is_navigable());
    }
}
