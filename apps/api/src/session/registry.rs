use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use super::SessionContext;

pub type SharedSession = Arc<Mutex<SessionContext>>;

/// Sessions untouched for this long are dropped by the sweeper.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Owns every live session. Sessions never share state with one another; each one is
/// behind its own mutex so a single interaction runs at a time per session.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Starts an empty session and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let entry = Entry {
            session: Arc::new(Mutex::new(SessionContext::new(id))),
            last_seen: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        info!("Session {id} created");
        id
    }

    /// Looks up a session and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    /// Ends a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Session {id} ended");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session idle for longer than the TTL. Returns how many were dropped.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.idle_ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            info!(expired, remaining = sessions.len(), "Expired idle sessions");
        }
        expired
    }

    /// Runs `sweep_expired` every `period` until the runtime shuts down.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let expired = registry.sweep_expired().await;
                debug!(expired, "Session sweep finished");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SkillSource;
    use crate::skills::SkillSet;

    #[tokio::test]
    async fn test_create_get_remove() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        assert!(registry.get(id).await.is_some());
        assert_eq!(registry.len().await, 1);

        assert!(registry.remove(id).await);
        assert!(registry.get(id).await.is_none());
        assert!(!registry.remove(id).await);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.create().await;
        let b = registry.create().await;

        {
            let session = registry.get(a).await.unwrap();
            let mut session = session.lock().await;
            session.set_skills(
                SkillSet::from(vec!["Python".to_string()]),
                SkillSource::CareerAssistant,
            );
        }

        let other = registry.get(b).await.unwrap();
        assert!(other.lock().await.skills().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_expire() {
        let registry = SessionRegistry::with_idle_ttl(Duration::from_secs(60));
        let idle = registry.create().await;
        let active = registry.create().await;

        time::advance(Duration::from_secs(45)).await;
        assert!(registry.get(active).await.is_some());

        time::advance(Duration::from_secs(30)).await;
        assert_eq!(registry.sweep_expired().await, 1);
        assert!(registry.get(idle).await.is_none());
        assert!(registry.get(active).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_task_evicts_in_background() {
        let registry = SessionRegistry::with_idle_ttl(Duration::from_secs(10));
        registry.create().await;
        let sweeper = registry.spawn_sweeper(Duration::from_secs(5));

        time::sleep(Duration::from_secs(16)).await;
        assert_eq!(registry.len().await, 0);
        sweeper.abort();
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let registry = SessionRegistry::new();
        assert!(registry.get(Uuid::new_v4()).await.is_none());
    }
}
