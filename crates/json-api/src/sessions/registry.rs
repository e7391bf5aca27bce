//! Session Registry

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
    sync::Arc,
    time::{Duration, Instant},
};

use folio::session::MemorySession;
use rustc_hash::FxHashMap;
use tokio::{
    sync::{Mutex, MutexGuard, RwLock},
    task::JoinHandle,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SessionId(Uuid);

impl SessionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A session and when it was last used.
#[derive(Debug)]
pub(crate) struct SessionEntry {
    pub(crate) session: MemorySession,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            session: MemorySession::new(),
            last_seen: Instant::now(),
        }
    }
}

/// Shared handle to one session, held for the duration of a request.
#[derive(Debug, Clone)]
pub(crate) struct SessionHandle {
    id: SessionId,
    entry: Arc<Mutex<SessionEntry>>,
}

impl SessionHandle {
    pub(crate) fn id(&self) -> SessionId {
        self.id
    }

    /// Lock the session, serialising access with other requests on it.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, SessionEntry> {
        let mut entry = self.entry.lock().await;

        entry.last_seen = Instant::now();

        entry
    }
}

/// All live sessions.
#[derive(Debug)]
pub(crate) struct SessionRegistry {
    sessions: RwLock<FxHashMap<SessionId, Arc<Mutex<SessionEntry>>>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub(crate) fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(FxHashMap::default()),
            idle_timeout,
        }
    }

    /// Find the requested session, or start a new one if it is missing or unknown.
    pub(crate) async fn resolve(&self, requested: Option<SessionId>) -> SessionHandle {
        if let Some(id) = requested
            && let Some(entry) = self.sessions.read().await.get(&id)
        {
            return SessionHandle {
                id,
                entry: Arc::clone(entry),
            };
        }

        let id = SessionId::new();
        let entry = Arc::new(Mutex::new(SessionEntry::new()));

        self.sessions.write().await.insert(id, Arc::clone(&entry));

        debug!(session = %id, "session started");

        SessionHandle { id, entry }
    }

    /// Number of live sessions.
    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions idle for longer than the timeout, returning how many went.
    ///
    /// Sessions held by an in-flight request are kept regardless of age.
    pub(crate) async fn purge_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_id, entry| {
            if Arc::strong_count(entry) > 1 {
                return true;
            }

            match entry.try_lock() {
                Ok(entry) => entry.last_seen.elapsed() < self.idle_timeout,
                Err(_locked) => true,
            }
        });

        before - sessions.len()
    }

    /// Sweep idle sessions every `period` until the registry is dropped.
    pub(crate) fn spawn_purge_task(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let registry = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);

            loop {
                ticker.tick().await;

                let Some(registry) = registry.upgrade() else {
                    break;
                };

                let purged = registry.purge_idle().await;

                if purged > 0 {
                    let remaining = registry.len().await;

                    info!(purged, remaining, "purged idle sessions");
                }
            }
        })
    }
}
