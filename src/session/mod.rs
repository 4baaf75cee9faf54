//! Session management
//!
//! Holds the per-session state machine (login, home, gallery), its
//! transitions, and the per-connection handler that drives it.

pub mod handler;
pub mod operations;
pub mod registry;
pub mod state;

pub use handler::handle_session;
pub use operations::{logout, navigate, submit_credentials};
pub use registry::SessionRegistry;
pub use state::{Page, SessionState};
