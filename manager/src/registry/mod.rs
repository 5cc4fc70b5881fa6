use dashmap::DashMap;
use shared::GameView;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub mod actions;
pub mod lifecycle;
pub mod session;
#[cfg(test)]
pub mod tests;

pub use session::{LiveGame, Session};

/// Holds every live session, one map entry per key. Lookups on different
/// keys never contend on a shared lock; a session's own moves serialize
/// behind its `RwLock`. `timers` tracks the single eviction task armed
/// for each session.
pub struct Registry {
    pub(crate) sessions: DashMap<String, RwLock<Session>>,
    pub(crate) timers: DashMap<String, JoinHandle<()>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            timers: DashMap::new(),
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.sessions.contains_key(key)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Current display state of a session, if it is still live.
    pub async fn peek(&self, key: &str) -> Option<GameView> {
        let entry = self.sessions.get(key)?;
        let session = entry.read().await;
        Some(session.game.view())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
