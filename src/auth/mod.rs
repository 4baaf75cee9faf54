//! Authentication system
//!
//! Handles the credential table, its load-once cache, and credential validation.

pub mod cache;
pub mod credentials;
pub mod validator;

pub use cache::{CredentialCache, LoadedCredentials};
pub use credentials::{CredentialRecord, CredentialStore};
pub use validator::validate_credentials;
