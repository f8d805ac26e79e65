//! Cyclic page cursors and the registry of live pagination sessions.
//!
//! A session is scoped to one rendered result. Navigation past either end
//! wraps around; idle sessions expire after the configured window and any
//! further navigation fails with a stale-interaction error instead of
//! silently acting on detached state.

use crate::error::ServiceError;
use crate::model::{Page, PageView};
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(180);
pub const DEFAULT_SESSION_CAP: usize = 256;
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Mutable view-state over a fixed page list. The index starts at 0 and
/// moves with modulo wrap-around in both directions.
#[derive(Debug, Clone)]
pub struct PageCursor {
    pages: Vec<Page>,
    index: usize,
}

impl PageCursor {
    /// `pages` must be non-empty; `build_pages` guarantees at least the
    /// synthetic no-results page.
    pub fn new(pages: Vec<Page>) -> Self {
        debug_assert!(!pages.is_empty());
        Self { pages, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn current(&self) -> PageView {
        PageView {
            page: self.pages[self.index].clone(),
            index: self.index,
            total: self.pages.len(),
        }
    }

    pub fn next(&mut self) -> PageView {
        self.index = (self.index + 1) % self.pages.len();
        self.current()
    }

    pub fn prev(&mut self) -> PageView {
        self.index = (self.index + self.pages.len() - 1) % self.pages.len();
        self.current()
    }

    pub fn step(&mut self, direction: Direction) -> PageView {
        match direction {
            Direction::Next => self.next(),
            Direction::Prev => self.prev(),
        }
    }
}

struct PagerSession {
    cursor: PageCursor,
    last_activity: Instant,
}

impl PagerSession {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_activity.elapsed() >= ttl
    }
}

#[derive(Debug, Clone)]
pub struct PagerConfig {
    pub ttl: Duration,
    pub max_sessions: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_sessions: DEFAULT_SESSION_CAP,
        }
    }
}

/// Live pagination sessions keyed by generated id. Expired sessions are
/// evicted inline on every operation and by a periodic cleanup task.
pub struct PagerRegistry {
    sessions: Mutex<HashMap<String, PagerSession>>,
    config: PagerConfig,
}

impl PagerRegistry {
    pub fn new(config: PagerConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                self.evict_expired();
            }
        });
    }

    /// Registers a new session over `pages` and returns its id.
    pub fn open(&self, pages: Vec<Page>) -> String {
        let session_id = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.lock();
        Self::evict_expired_locked(&mut sessions, self.config.ttl);

        // At the cap, the least-recently-active session makes room; a fresh
        // lookup must never fail because old paginators linger.
        if sessions.len() >= self.config.max_sessions {
            if let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_activity)
                .map(|(id, _)| id.clone())
            {
                sessions.remove(&oldest);
                debug!(session_id = %oldest, "evicted oldest pagination session at cap");
            }
        }

        sessions.insert(
            session_id.clone(),
            PagerSession {
                cursor: PageCursor::new(pages),
                last_activity: Instant::now(),
            },
        );
        session_id
    }

    /// Steps the session's cursor and refreshes its activity stamp. Unknown
    /// or expired sessions fail with `StaleInteraction`.
    pub fn navigate(
        &self,
        session_id: &str,
        direction: Direction,
    ) -> Result<PageView, ServiceError> {
        let mut sessions = self.sessions.lock();
        Self::evict_expired_locked(&mut sessions, self.config.ttl);

        let session = sessions
            .get_mut(session_id)
            .ok_or(ServiceError::StaleInteraction)?;
        session.last_activity = Instant::now();
        Ok(session.cursor.step(direction))
    }

    pub fn active_sessions(&self) -> usize {
        let mut sessions = self.sessions.lock();
        Self::evict_expired_locked(&mut sessions, self.config.ttl);
        sessions.len()
    }

    fn evict_expired(&self) {
        let mut sessions = self.sessions.lock();
        Self::evict_expired_locked(&mut sessions, self.config.ttl);
    }

    fn evict_expired_locked(sessions: &mut HashMap<String, PagerSession>, ttl: Duration) {
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, session)| session.is_expired(ttl))
            .map(|(id, _)| id.clone())
            .collect();
        for id in expired {
            sessions.remove(&id);
            debug!(session_id = %id, "evicted expired pagination session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pages(count: usize) -> Vec<Page> {
        (0..count)
            .map(|i| Page {
                title: format!("page {i}"),
                description: None,
                fields: Vec::new(),
                footer: None,
            })
            .collect()
    }

    #[test]
    fn cursor_wraps_both_directions() {
        let mut cursor = PageCursor::new(pages(3));
        assert_eq!(cursor.current().index, 0);
        assert_eq!(cursor.next().index, 1);
        assert_eq!(cursor.next().index, 2);
        assert_eq!(cursor.next().index, 0);
        assert_eq!(cursor.prev().index, 2);
    }

    #[test]
    fn next_n_times_is_identity() {
        let mut cursor = PageCursor::new(pages(5));
        for _ in 0..5 {
            cursor.next();
        }
        assert_eq!(cursor.current().index, 0);
    }

    #[test]
    fn prev_inverts_next() {
        let mut cursor = PageCursor::new(pages(4));
        cursor.next();
        cursor.next();
        cursor.prev();
        cursor.prev();
        assert_eq!(cursor.current().index, 0);
    }

    #[test]
    fn single_page_cursor_stays_put() {
        let mut cursor = PageCursor::new(pages(1));
        assert_eq!(cursor.next().index, 0);
        assert_eq!(cursor.prev().index, 0);
    }

    #[test]
    fn registry_round_trip() {
        let registry = PagerRegistry::new(PagerConfig::default());
        let id = registry.open(pages(3));
        let view = registry.navigate(&id, Direction::Next).unwrap();
        assert_eq!(view.index, 1);
        assert_eq!(view.total, 3);
        let view = registry.navigate(&id, Direction::Prev).unwrap();
        assert_eq!(view.index, 0);
    }

    #[test]
    fn unknown_session_is_stale() {
        let registry = PagerRegistry::new(PagerConfig::default());
        let result = registry.navigate("no-such-session", Direction::Next);
        assert_matches!(result, Err(ServiceError::StaleInteraction));
    }

    #[test]
    fn expired_session_is_stale() {
        let registry = PagerRegistry::new(PagerConfig {
            ttl: Duration::ZERO,
            max_sessions: 8,
        });
        let id = registry.open(pages(2));
        let result = registry.navigate(&id, Direction::Next);
        assert_matches!(result, Err(ServiceError::StaleInteraction));
        assert_eq!(registry.active_sessions(), 0);
    }

    #[test]
    fn cap_evicts_least_recently_active() {
        let registry = PagerRegistry::new(PagerConfig {
            ttl: Duration::from_secs(60),
            max_sessions: 2,
        });
        let first = registry.open(pages(2));
        std::thread::sleep(Duration::from_millis(5));
        let second = registry.open(pages(2));
        std::thread::sleep(Duration::from_millis(5));
        let third = registry.open(pages(2));

        assert_matches!(
            registry.navigate(&first, Direction::Next),
            Err(ServiceError::StaleInteraction)
        );
        assert!(registry.navigate(&second, Direction::Next).is_ok());
        assert!(registry.navigate(&third, Direction::Next).is_ok());
    }
}
