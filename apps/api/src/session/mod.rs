pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexSet;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms::FormSet;
use crate::pricing::PaymentForm;
use crate::store::ResumeStore;

/// Everything one user works with: the shared store, the forms seeded from it, and checkout.
#[derive(Debug)]
pub struct Session {
    pub store: ResumeStore,
    pub forms: FormSet,
    pub payment: PaymentForm,
    /// Catalog ids unlocked through checkout, in purchase order.
    pub unlocked: IndexSet<String>,
}

impl Session {
    pub fn new() -> Self {
        let store = ResumeStore::new();
        let forms = FormSet::seeded_from(store.resume_data());
        Self {
            store,
            forms,
            payment: PaymentForm::default(),
            unlocked: IndexSet::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// In-memory session table. Each session has its own lock, so a slow checkout in one
/// session never blocks another. Sessions idle past the configured TTL are evicted by
/// [`SessionRegistry::spawn_idle_sweeper`].
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(
            id,
            SessionEntry {
                handle: Arc::new(Mutex::new(Session::new())),
                last_seen: Instant::now(),
            },
        );
        info!("Created session {id}");
        id
    }

    /// Looks up a session and marks it as seen.
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        entry.last_seen = Instant::now();
        Ok(entry.handle.clone())
    }

    /// Drops a session. Requests already holding its handle finish against the old state.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        if self.sessions.write().await.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("Session {id} not found")));
        }
        info!("Removed session {id}");
        Ok(())
    }

    /// Evicts sessions not seen for `ttl`. A session whose handle is still held elsewhere
    /// (an in-flight checkout, for one) is kept. Returns how many were evicted.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.duration_since(entry.last_seen) < ttl || Arc::strong_count(&entry.handle) > 1
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle sessions ({} remaining)", sessions.len());
        }
        evicted
    }

    /// Sweeps idle sessions every `ttl / 4` (at least once a second) for the life of the
    /// process.
    pub fn spawn_idle_sweeper(&self, ttl: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        let period = (ttl / 4).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut prune_tick = tokio::time::interval(period);
            loop {
                prune_tick.tick().await;
                registry.evict_idle(ttl).await;
            }
        })
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        let handle = registry.get(id).await.unwrap();
        assert_eq!(handle.lock().await.store.current_step(), 0);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let registry = SessionRegistry::new();
        assert!(matches!(
            registry.get(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.create().await;
        let b = registry.create().await;
        registry.get(a).await.unwrap().lock().await.store.set_current_step(4);
        assert_eq!(
            registry.get(b).await.unwrap().lock().await.store.current_step(),
            0
        );
    }

    #[tokio::test]
    async fn test_remove_session() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        registry.remove(id).await.unwrap();
        assert!(matches!(registry.get(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(registry.remove(id).await, Err(AppError::NotFound(_))));
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_idle_keeps_recently_seen() {
        let registry = SessionRegistry::new();
        let ttl = Duration::from_secs(60);
        let stale = registry.create().await;
        let active = registry.create().await;

        tokio::time::advance(Duration::from_secs(45)).await;
        registry.get(active).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(registry.evict_idle(ttl).await, 1);
        assert!(registry.get(stale).await.is_err());
        assert!(registry.get(active).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_idle_skips_sessions_in_use() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        let held = registry.get(id).await.unwrap();

        tokio::time::advance(Duration::from_secs(120)).await;
        assert_eq!(registry.evict_idle(Duration::from_secs(60)).await, 0);

        drop(held);
        assert_eq!(registry.evict_idle(Duration::from_secs(60)).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sweeper_evicts_in_background() {
        let registry = SessionRegistry::new();
        registry.create().await;
        let sweeper = registry.spawn_idle_sweeper(Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(registry.count().await, 0);
        sweeper.abort();
    }
}
