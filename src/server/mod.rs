//! Server core functionality
//!
//! Accepts connections and hands each one its own session task.

pub mod core;

pub use core::Server;
