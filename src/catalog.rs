//! Time-bounded cache of distinct boss names.
//!
//! The catalog is a passive state object: freshness checks and reads are
//! pure, and the refill that replaces a stale snapshot is orchestrated by
//! `ServiceState`, which serializes concurrent refills behind a single
//! async lock. First-seen casing from the sheet scan is the canonical
//! display form when a case-insensitive match comes in later.

use crate::row::COL_BOSS;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(600);
pub const DEFAULT_CAP: usize = 1000;

/// The rendering surface shows at most this many autocomplete options.
pub const SUGGESTION_LIMIT: usize = 25;

struct Snapshot {
    /// Distinct names, sorted case-insensitively for display.
    names: Vec<String>,
    fetched_at: Instant,
}

pub struct BossCatalog {
    ttl: Duration,
    slot: RwLock<Option<Snapshot>>,
}

impl BossCatalog {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.slot
            .read()
            .as_ref()
            .map(|snapshot| snapshot.fetched_at.elapsed() < self.ttl)
            .unwrap_or(false)
    }

    /// The cached display list, or `None` when cold or stale.
    pub fn fresh_list(&self) -> Option<Vec<String>> {
        let slot = self.slot.read();
        let snapshot = slot.as_ref()?;
        if snapshot.fetched_at.elapsed() < self.ttl {
            Some(snapshot.names.clone())
        } else {
            None
        }
    }

    /// Replaces the snapshot with freshly scanned names and restamps the
    /// freshness clock. Names are sorted case-insensitively for display.
    pub fn refill(&self, mut names: Vec<String>) {
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        *self.slot.write() = Some(Snapshot {
            names,
            fetched_at: Instant::now(),
        });
    }

    /// Maps a user-supplied name back to the catalog's canonical casing, or
    /// returns the input unchanged when nothing matches (including when the
    /// catalog is cold).
    pub fn resolve_canonical(&self, name: &str) -> String {
        let needle = name.trim().to_lowercase();
        let slot = self.slot.read();
        slot.as_ref()
            .and_then(|snapshot| {
                snapshot
                    .names
                    .iter()
                    .find(|candidate| candidate.to_lowercase() == needle)
                    .cloned()
            })
            .unwrap_or_else(|| name.to_string())
    }

    /// Autocomplete feed: case-insensitive prefix matches ranked ahead of
    /// substring matches, capped at the surface's option limit. An empty
    /// partial returns the head of the display list.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        let needle = partial.trim().to_lowercase();
        let slot = self.slot.read();
        let Some(snapshot) = slot.as_ref() else {
            return Vec::new();
        };

        if needle.is_empty() {
            return snapshot
                .names
                .iter()
                .take(SUGGESTION_LIMIT)
                .cloned()
                .collect();
        }

        let mut matches: Vec<String> = snapshot
            .names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .take(SUGGESTION_LIMIT)
            .cloned()
            .collect();
        if matches.len() < SUGGESTION_LIMIT {
            for name in &snapshot.names {
                let lower = name.to_lowercase();
                if lower.contains(&needle) && !lower.starts_with(&needle) {
                    matches.push(name.clone());
                    if matches.len() == SUGGESTION_LIMIT {
                        break;
                    }
                }
            }
        }
        matches
    }
}

/// Scans a raw snapshot for distinct boss names: header skipped, first
/// occurrence wins (case-insensitively, preserving its casing), capped at
/// `cap` names in sheet order.
pub fn collect_bosses(raw: &[Vec<String>], cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut bosses = Vec::new();
    for line in raw.iter().skip(1) {
        let Some(cell) = line.get(COL_BOSS) else {
            continue;
        };
        let name = cell.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            bosses.push(name.to_string());
            if bosses.len() == cap {
                break;
            }
        }
    }
    bosses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(bosses: &[&str]) -> Vec<Vec<String>> {
        let mut raw = vec![vec![
            "Character".to_string(),
            "Spec".to_string(),
            "Date".to_string(),
            "Difficulty".to_string(),
            "Boss".to_string(),
        ]];
        for boss in bosses {
            raw.push(vec![
                "x".to_string(),
                "y".to_string(),
                String::new(),
                String::new(),
                boss.to_string(),
            ]);
        }
        raw
    }

    #[test]
    fn collect_dedups_by_first_occurrence() {
        let bosses = collect_bosses(&sheet(&["Onyxia", "Ragnaros", "onyxia", "", "Nefarian"]), 100);
        assert_eq!(bosses, vec!["Onyxia", "Ragnaros", "Nefarian"]);
    }

    #[test]
    fn collect_honors_cap() {
        let bosses = collect_bosses(&sheet(&["A", "B", "C", "D"]), 2);
        assert_eq!(bosses, vec!["A", "B"]);
    }

    #[test]
    fn refill_sorts_case_insensitively() {
        let catalog = BossCatalog::new(DEFAULT_TTL);
        catalog.refill(vec![
            "ragnaros".to_string(),
            "Nefarian".to_string(),
            "Onyxia".to_string(),
        ]);
        assert_eq!(
            catalog.fresh_list().unwrap(),
            vec!["Nefarian", "Onyxia", "ragnaros"]
        );
    }

    #[test]
    fn cold_catalog_reports_stale() {
        let catalog = BossCatalog::new(DEFAULT_TTL);
        assert!(!catalog.is_fresh());
        assert!(catalog.fresh_list().is_none());
        assert!(catalog.suggest("ony").is_empty());
    }

    #[test]
    fn zero_ttl_is_immediately_stale() {
        let catalog = BossCatalog::new(Duration::ZERO);
        catalog.refill(vec!["Onyxia".to_string()]);
        assert!(!catalog.is_fresh());
        assert!(catalog.fresh_list().is_none());
    }

    #[test]
    fn resolve_canonical_restores_sheet_casing() {
        let catalog = BossCatalog::new(DEFAULT_TTL);
        catalog.refill(vec!["Onyxia".to_string(), "Ragnaros".to_string()]);
        assert_eq!(catalog.resolve_canonical("  oNyXiA "), "Onyxia");
        assert_eq!(catalog.resolve_canonical("Nefarian"), "Nefarian");
    }

    #[test]
    fn suggest_ranks_prefix_before_substring() {
        let catalog = BossCatalog::new(DEFAULT_TTL);
        catalog.refill(vec![
            "Ragnaros".to_string(),
            "Onyxia".to_string(),
            "Grand Widow Faerlina".to_string(),
        ]);
        let suggestions = catalog.suggest("ra");
        assert_eq!(suggestions[0], "Ragnaros");
        assert!(suggestions.contains(&"Grand Widow Faerlina".to_string()));
    }

    #[test]
    fn suggest_caps_results() {
        let names: Vec<String> = (0..60).map(|i| format!("Boss {i:02}")).collect();
        let catalog = BossCatalog::new(DEFAULT_TTL);
        catalog.refill(names);
        assert_eq!(catalog.suggest("boss").len(), SUGGESTION_LIMIT);
        assert_eq!(catalog.suggest("").len(), SUGGESTION_LIMIT);
    }
}
