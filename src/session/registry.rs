//! Session registry
//!
//! Tracks connected peers so the server can enforce its session limit.
//! Holds no session state; each connection owns its own snapshot.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Registry for tracking active sessions
pub struct SessionRegistry {
    sessions: HashMap<SocketAddr, Instant>,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_sessions,
        }
    }

    /// Registers `addr` unless the registry is full. Returns whether it was admitted.
    pub fn try_register(&mut self, addr: SocketAddr) -> bool {
        if self.sessions.len() >= self.max_sessions && !self.sessions.contains_key(&addr) {
            return false;
        }
        self.sessions.entry(addr).or_insert_with(Instant::now);
        true
    }

    /// Removes `addr`, returning how long its session lasted.
    pub fn remove(&mut self, addr: &SocketAddr) -> Option<Duration> {
        self.sessions.remove(addr).map(|started| started.elapsed())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[test]
    fn test_enforces_limit() {
        let mut registry = SessionRegistry::new(2);
        assert!(registry.try_register(addr(1000)));
        assert!(registry.try_register(addr(1001)));
        assert!(!registry.try_register(addr(1002)));
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(&addr(1000)).is_some());
        assert!(registry.try_register(addr(1002)));
    }

    #[test]
    fn test_remove_unknown() {
        let mut registry = SessionRegistry::new(1);
        assert!(registry.remove(&addr(1000)).is_none());
        assert!(registry.is_empty());
    }
}
