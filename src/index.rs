//! Linear lookups over a raw sheet snapshot.
//!
//! Matching happens on the raw cells rather than parsed rows because the
//! item column is a lookup key that `Row` does not retain. Expected sheet
//! sizes are low thousands of lines, so a scan per query beats maintaining
//! an index structure.

use crate::model::{Difficulty, Row};
use crate::row::{self, COL_BOSS, COL_DIFFICULTY, COL_ITEM};

/// Lines shorter than this cannot carry a boss or item key and are skipped.
const MIN_CELLS: usize = 5;

/// Exact, case-insensitive, whitespace-trimmed item-name match. The header
/// line is always skipped; matches come back in sheet order.
pub fn find_by_item(raw: &[Vec<String>], item_name: &str) -> Vec<Row> {
    let target = item_name.trim().to_lowercase();
    records(raw)
        .filter(|line| cell_matches(line, COL_ITEM, &target))
        .map(|line| row::parse_row(line))
        .collect()
}

/// Exact, case-insensitive, whitespace-trimmed boss-name match, optionally
/// narrowed to one difficulty. Omitting the difficulty passes every row.
pub fn find_by_boss(
    raw: &[Vec<String>],
    boss_name: &str,
    difficulty: Option<Difficulty>,
) -> Vec<Row> {
    let target = boss_name.trim().to_lowercase();
    records(raw)
        .filter(|line| cell_matches(line, COL_BOSS, &target))
        .filter(|line| difficulty_matches(line, difficulty))
        .map(|line| row::parse_row(line))
        .collect()
}

fn records(raw: &[Vec<String>]) -> impl Iterator<Item = &Vec<String>> {
    raw.iter().skip(1).filter(|line| line.len() >= MIN_CELLS)
}

fn cell_matches(line: &[String], column: usize, target: &str) -> bool {
    line.get(column)
        .map(|cell| cell.trim().to_lowercase() == *target)
        .unwrap_or(false)
}

fn difficulty_matches(line: &[String], wanted: Option<Difficulty>) -> bool {
    match wanted {
        None => true,
        Some(difficulty) => line
            .get(COL_DIFFICULTY)
            .map(|cell| cell.trim().eq_ignore_ascii_case(difficulty.as_ref()))
            .unwrap_or(false),
    }
}
