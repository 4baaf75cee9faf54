//! Page rendering
//!
//! Turns a session snapshot into the lines of text the client displays:
//! the login form, or the sidebar followed by the home or gallery content.

use crate::error::AuthError;
use crate::session::{Page, SessionState};

/// An image shown on a page, referenced by URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Picture {
    pub url: &'static str,
    pub caption: &'static str,
}

pub const HOME_BANNER: Picture = Picture {
    url: "https://placehold.co/800x200/50C878/white?text=Home+Content",
    caption: "Your dashboard",
};

pub const GALLERY: [Picture; 3] = [
    Picture {
        url: "https://cdn.generationvoyage.fr/2025/02/Golden-Gate-de-San-Francisco-1000x649.jpeg",
        caption: "San Francisco",
    },
    Picture {
        url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcSd49EOl1Bj7_yT7CqK-6Z8ZeGYUSyA4NkUaw&s",
        caption: "Moab",
    },
    Picture {
        url: "https://cdn.generationvoyage.fr/2023/10/skyline-las-vegas-nuit-750x497.jpg",
        caption: "Las Vegas",
    },
];

const RULE: &str = "----------------------------------------";

/// Renders the page selected by `state`.
///
/// `store_error` is the credential load failure, if any; it replaces the
/// login form so no login can be attempted from a broken store.
pub fn render(state: &SessionState, store_error: Option<&AuthError>) -> Vec<String> {
    match state.username() {
        None => render_login(store_error),
        Some(username) => {
            let mut lines = render_sidebar(username, state.current_page());
            lines.push(RULE.to_string());
            match state.current_page() {
                Page::Gallery => lines.extend(render_gallery()),
                // An authenticated session never sits on Login; fall back to Home.
                Page::Home | Page::Login => lines.extend(render_home(username)),
            }
            lines
        }
    }
}

fn render_login(store_error: Option<&AuthError>) -> Vec<String> {
    let mut lines = vec!["# Login".to_string()];
    match store_error {
        Some(e) => lines.push(format!("[error] {}", e.notice())),
        None => {
            lines.push("Username: USER <name>".to_string());
            lines.push("Password: PASS <password>".to_string());
            lines.push("[ Login ]: SUBMIT".to_string());
        }
    }
    lines
}

fn render_sidebar(username: &str, current: Page) -> Vec<String> {
    let mut lines = vec![
        "[ Log out ]: LOGOUT".to_string(),
        format!("**Welcome {}**", username),
        RULE.to_string(),
        "## Menu".to_string(),
    ];
    for page in Page::MENU {
        let marker = if page == current { "*" } else { " " };
        lines.push(format!(
            "{} [ {} ]: NAV {}",
            marker,
            menu_label(page),
            page.as_str()
        ));
    }
    lines
}

fn menu_label(page: Page) -> &'static str {
    match page {
        Page::Home => "Home",
        Page::Gallery => "Travel photos",
        Page::Login => "Login",
    }
}

fn render_home(username: &str) -> Vec<String> {
    vec![
        format!("# Welcome, {}, to my home page", username),
        "This is the main page of your secure application.".to_string(),
        "Use the side menu to navigate.".to_string(),
        render_picture(&HOME_BANNER),
    ]
}

fn render_gallery() -> Vec<String> {
    let mut lines = vec!["# Welcome to my travel journal album".to_string()];
    lines.extend(
        GALLERY
            .iter()
            .enumerate()
            .map(|(i, picture)| format!("({}) {}", i + 1, render_picture(picture))),
    );
    lines
}

fn render_picture(picture: &Picture) -> String {
    format!("[image] {} <{}>", picture.caption, picture.url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialRecord, CredentialStore};
    use crate::session::{navigate, submit_credentials};

    fn alice() -> SessionState {
        let store = CredentialStore::from_records(vec![CredentialRecord::new("alice", "secret")]);
        submit_credentials(&SessionState::default(), &store, "alice", "secret").unwrap()
    }

    #[test]
    fn test_login_page_shows_form() {
        let lines = render(&SessionState::default(), None);
        assert_eq!(lines[0], "# Login");
        assert!(lines.iter().any(|l| l.contains("SUBMIT")));
        assert!(!lines.iter().any(|l| l.contains("LOGOUT")));
    }

    #[test]
    fn test_missing_store_replaces_form() {
        let error = AuthError::MissingStore("users.csv".into());
        let lines = render(&SessionState::default(), Some(&error));
        assert!(lines.iter().any(|l| l.starts_with("[error]") && l.contains("users.csv")));
        assert!(!lines.iter().any(|l| l.contains("SUBMIT")));
    }

    #[test]
    fn test_home_page_has_sidebar() {
        let lines = render(&alice(), None);
        assert_eq!(lines[0], "[ Log out ]: LOGOUT");
        assert!(lines.contains(&"**Welcome alice**".to_string()));
        assert!(lines.contains(&"* [ Home ]: NAV home".to_string()));
        assert!(lines.contains(&"  [ Travel photos ]: NAV gallery".to_string()));
        assert!(lines.contains(&"# Welcome, alice, to my home page".to_string()));
    }

    #[test]
    fn test_gallery_page_lists_pictures() {
        let state = navigate(&alice(), Page::Gallery).unwrap();
        let lines = render(&state, None);

        assert!(lines.contains(&"* [ Travel photos ]: NAV gallery".to_string()));
        for picture in GALLERY {
            assert!(lines.iter().any(|l| l.contains(picture.caption) && l.contains(picture.url)));
        }
    }
}
