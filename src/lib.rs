pub mod auth;
pub mod config;
pub mod error;
pub mod pages;
pub mod protocol;
pub mod server;
pub mod session;

pub use config::AppConfig;
pub use server::Server;
