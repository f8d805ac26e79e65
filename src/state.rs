//! Long-lived service state shared across concurrent commands.
//!
//! The boss catalog and the pagination registry are the only mutable state
//! here; everything else is an immutable config plus a shared backend
//! handle. Every spreadsheet fetch crosses a `spawn_blocking` boundary so
//! the cold, synchronous source never stalls the event loop.

use crate::catalog::{BossCatalog, collect_bosses};
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::pager::{PagerConfig, PagerRegistry};
use crate::sheet::SheetBackend;
use anyhow::anyhow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task;
use tracing::{debug, error};

pub struct ServiceState {
    config: Arc<ServiceConfig>,
    backend: Arc<dyn SheetBackend>,
    catalog: BossCatalog,
    pager: Arc<PagerRegistry>,
    /// Serializes catalog refills so concurrent stale detections cost one
    /// backend scan, not one each.
    catalog_refill: tokio::sync::Mutex<()>,
    sheet_fetches: AtomicU64,
    catalog_hits: AtomicU64,
    catalog_refreshes: AtomicU64,
}

impl ServiceState {
    pub fn new(config: Arc<ServiceConfig>, backend: Arc<dyn SheetBackend>) -> Self {
        let catalog = BossCatalog::new(config.boss_cache_ttl);
        let pager = Arc::new(PagerRegistry::new(PagerConfig {
            ttl: config.pager_ttl,
            max_sessions: config.pager_session_cap,
        }));
        Self {
            config,
            backend,
            catalog,
            pager,
            catalog_refill: tokio::sync::Mutex::new(()),
            sheet_fetches: AtomicU64::new(0),
            catalog_hits: AtomicU64::new(0),
            catalog_refreshes: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> Arc<ServiceConfig> {
        self.config.clone()
    }

    pub fn catalog(&self) -> &BossCatalog {
        &self.catalog
    }

    pub fn pager(&self) -> &Arc<PagerRegistry> {
        &self.pager
    }

    /// Fetches an independent snapshot of the whole sheet. Each command
    /// calls this once; two concurrent commands may observe different
    /// snapshots, which is fine — ordering is only guaranteed within one
    /// command's fetch-filter-build sequence.
    pub async fn snapshot(&self) -> Result<Vec<Vec<String>>, ServiceError> {
        self.sheet_fetches.fetch_add(1, Ordering::Relaxed);
        let backend = self.backend.clone();
        let worksheet = self.config.worksheet.clone();

        let raw = task::spawn_blocking(move || backend.fetch_all(&worksheet))
            .await
            .map_err(|join_error| ServiceError::backend(anyhow!(join_error)))?
            .inspect_err(|fetch_error| {
                error!(
                    category = fetch_error.category(),
                    error = %fetch_error,
                    "sheet fetch failed"
                );
            })?;

        debug!(lines = raw.len(), "fetched sheet snapshot");
        Ok(raw)
    }

    /// Returns the boss display list, scanning the backend only when the
    /// catalog is cold or stale. The freshness re-check under the refill
    /// lock keeps concurrent stale detections down to a single scan.
    pub async fn ensure_boss_catalog(&self) -> Result<Vec<String>, ServiceError> {
        if let Some(list) = self.catalog.fresh_list() {
            self.catalog_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(list);
        }

        let _guard = self.catalog_refill.lock().await;
        if let Some(list) = self.catalog.fresh_list() {
            self.catalog_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(list);
        }

        let raw = self.snapshot().await?;
        let names = collect_bosses(&raw, self.config.boss_cache_cap);
        debug!(bosses = names.len(), "refilled boss catalog");
        self.catalog.refill(names);
        self.catalog_refreshes.fetch_add(1, Ordering::Relaxed);
        Ok(self.catalog.fresh_list().unwrap_or_default())
    }

    /// Opportunistic catalog refill from a snapshot some command already
    /// paid for; keeps the boss index warm without a second scan.
    pub fn refill_catalog_from(&self, raw: &[Vec<String>]) {
        if self.catalog.is_fresh() {
            return;
        }
        let names = collect_bosses(raw, self.config.boss_cache_cap);
        debug!(bosses = names.len(), "refilled boss catalog from shared snapshot");
        self.catalog.refill(names);
        self.catalog_refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            sheet_fetches: self.sheet_fetches.load(Ordering::Relaxed),
            catalog_hits: self.catalog_hits.load(Ordering::Relaxed),
            catalog_refreshes: self.catalog_refreshes.load(Ordering::Relaxed),
            active_pager_sessions: self.pager.active_sessions(),
        }
    }
}

/// Counters for monitoring; all best-effort relaxed loads.
#[derive(Debug, Clone)]
pub struct ServiceStats {
    pub sheet_fetches: u64,
    pub catalog_hits: u64,
    pub catalog_refreshes: u64,
    pub active_pager_sessions: usize,
}
