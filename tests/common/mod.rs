#![allow(dead_code)]

use loot_ledger::error::ServiceError;
use loot_ledger::sheet::SheetBackend;
use loot_ledger::{ServiceConfig, ServiceState};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// In-memory backend that counts fetches, for cache-freshness assertions.
pub struct FakeBackend {
    rows: Vec<Vec<String>>,
    fetches: AtomicU64,
}

impl FakeBackend {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            fetches: AtomicU64::new(0),
        }
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl SheetBackend for FakeBackend {
    fn fetch_all(&self, _worksheet: &str) -> Result<Vec<Vec<String>>, ServiceError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.rows.clone())
    }
}

/// Backend that always fails, for error-propagation assertions.
pub struct FailingBackend;

impl SheetBackend for FailingBackend {
    fn fetch_all(&self, _worksheet: &str) -> Result<Vec<Vec<String>>, ServiceError> {
        Err(ServiceError::backend(anyhow::anyhow!("quota exceeded")))
    }
}

pub fn line(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

pub fn header() -> Vec<String> {
    line(&[
        "Character",
        "Spec",
        "Date",
        "Difficulty",
        "Boss",
        "Item",
        "",
        "Upgrade",
        "",
        "Icy Veins",
        "Wowhead",
    ])
}

pub fn wish(
    character: &str,
    spec: &str,
    date: &str,
    difficulty: &str,
    boss: &str,
    item: &str,
    upgrade: &str,
) -> Vec<String> {
    line(&[
        character,
        spec,
        date,
        difficulty,
        boss,
        item,
        "",
        upgrade,
        "",
        "https://icy.example/guide",
        "https://wowhead.example/item",
    ])
}

/// A small sheet with two Onyxia rows (normal and heroic) and one Ragnaros
/// row, plus the header.
pub fn wish_sheet() -> Vec<Vec<String>> {
    vec![
        header(),
        wish(
            "Thrall",
            "Enhancement",
            "2024-03-01T20:15:00.000000Z",
            "Normal",
            "Onyxia",
            "Quel'Serrar",
            "1200",
        ),
        wish(
            "Jaina",
            "Frost",
            "2024-03-02T21:00:00.000000Z",
            "Heroic",
            "Onyxia",
            "Vis'kag",
            "1,450",
        ),
        wish(
            "Uther",
            "Holy",
            "2024-03-03T19:30:00.000000Z",
            "Mythic",
            "Ragnaros",
            "Sulfuras",
            "2000",
        ),
    ]
}

pub fn test_config(boss_cache_ttl: Duration) -> ServiceConfig {
    ServiceConfig {
        workbook_path: PathBuf::from("unused.xlsx"),
        worksheet: "Wishes".to_string(),
        boss_cache_ttl,
        boss_cache_cap: 1000,
        pager_ttl: Duration::from_secs(180),
        pager_session_cap: 256,
        max_chunk: 1900,
    }
}

pub fn state_with(
    backend: Arc<dyn SheetBackend>,
    boss_cache_ttl: Duration,
) -> Arc<ServiceState> {
    Arc::new(ServiceState::new(
        Arc::new(test_config(boss_cache_ttl)),
        backend,
    ))
}
