//! Raw sheet line to `Row` conversion and the render-time value formatters.
//!
//! Parsing is total: short lines are padded before indexing, so a `Row` can
//! always be built from whatever the sheet returned. Rejecting lines that are
//! too short to carry a lookup key is the index layer's job.

use crate::model::Row;
use chrono::NaiveDateTime;

/// Rows are padded to this width before indexing by column offset.
pub const ROW_WIDTH: usize = 12;

pub const COL_CHARACTER: usize = 0;
pub const COL_SPEC: usize = 1;
pub const COL_DATE: usize = 2;
pub const COL_DIFFICULTY: usize = 3;
pub const COL_BOSS: usize = 4;
pub const COL_ITEM: usize = 5;
pub const COL_UPGRADE: usize = 7;
pub const COL_ICY_VEINS: usize = 9;
pub const COL_WOWHEAD: usize = 10;

/// Placeholder shown for empty or unusable values.
pub const PLACEHOLDER: &str = "\u{2014}";

const DATE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const DATE_OUTPUT_FORMAT: &str = "%d %b  %H:%M";

/// Builds a `Row` from an ordered cell sequence. Columns 6 and 8 are
/// reserved in the sheet layout and ignored; the item column (5) is consumed
/// by the index as a lookup key and not retained.
pub fn parse_row(cells: &[String]) -> Row {
    let mut padded: Vec<&str> = cells.iter().map(|cell| cell.trim()).collect();
    padded.resize(ROW_WIDTH, "");

    Row {
        character: padded[COL_CHARACTER].to_string(),
        spec: padded[COL_SPEC].to_string(),
        date: padded[COL_DATE].to_string(),
        difficulty: padded[COL_DIFFICULTY].to_string(),
        boss: padded[COL_BOSS].to_string(),
        upgrade: padded[COL_UPGRADE].to_string(),
        icy_veins: padded[COL_ICY_VEINS].to_string(),
        wowhead: padded[COL_WOWHEAD].to_string(),
    }
}

/// Trims and substitutes the em-dash placeholder when empty.
pub fn safe(raw: &str) -> String {
    safe_or(raw, PLACEHOLDER)
}

pub fn safe_or(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Renders a sheet timestamp as `DD Mon  HH:MM`. Anything that does not
/// match the sheet's fixed timestamp pattern passes through unchanged; empty
/// input renders as the placeholder. Never fails.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }
    match NaiveDateTime::parse_from_str(trimmed, DATE_INPUT_FORMAT) {
        Ok(timestamp) => timestamp.format(DATE_OUTPUT_FORMAT).to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Normalizes an upgrade count: separator commas are stripped, numeric
/// values are regrouped with thousands separators (integers without a
/// decimal point, fractions with trailing zeros dropped), non-numeric input
/// passes through unchanged, empty input renders as the placeholder.
pub fn format_upgrade(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let bare = trimmed.replace(',', "");
    match bare.parse::<f64>() {
        Ok(value) if value.is_finite() => group_thousands(value),
        _ => trimmed.to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    // Shortest round-trip repr already has trailing zeros stripped, so
    // "1234.50" comes out of the parse as 1234.5 and "1234.0" as 1234.
    let formatted = format!("{}", value);
    if formatted.contains(['e', 'E']) {
        return formatted;
    }
    match formatted.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_integer(integer), fraction),
        None => group_integer(&formatted),
    }
}

fn group_integer(raw: &str) -> String {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (offset, ch) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parse_row_maps_fixed_columns() {
        let row = parse_row(&cells(&[
            "Thrall",
            "Enhancement",
            "2024-03-01T20:15:00.000000Z",
            "Heroic",
            "Onyxia",
            "Quel'Serrar",
            "reserved",
            "1200",
            "reserved",
            "https://icy.example/a",
            "https://wowhead.example/b",
        ]));
        assert_eq!(row.character, "Thrall");
        assert_eq!(row.spec, "Enhancement");
        assert_eq!(row.difficulty, "Heroic");
        assert_eq!(row.boss, "Onyxia");
        assert_eq!(row.upgrade, "1200");
        assert_eq!(row.icy_veins, "https://icy.example/a");
        assert_eq!(row.wowhead, "https://wowhead.example/b");
    }

    #[test]
    fn parse_row_pads_short_lines() {
        let row = parse_row(&cells(&["Jaina", "Frost"]));
        assert_eq!(row.character, "Jaina");
        assert_eq!(row.spec, "Frost");
        assert_eq!(row.boss, "");
        assert_eq!(row.wowhead, "");
    }

    #[test]
    fn parse_row_trims_cells() {
        let row = parse_row(&cells(&["  Uther  ", " Holy ", "", "  ", " Ragnaros "]));
        assert_eq!(row.character, "Uther");
        assert_eq!(row.spec, "Holy");
        assert_eq!(row.difficulty, "");
        assert_eq!(row.boss, "Ragnaros");
    }

    #[test]
    fn format_date_renders_well_formed_timestamps() {
        assert_eq!(
            format_date("2024-03-01T20:15:00.000000Z"),
            "01 Mar  20:15"
        );
    }

    #[test]
    fn format_date_passes_through_malformed_input() {
        assert_eq!(format_date("next tuesday"), "next tuesday");
        assert_eq!(format_date("2024-03-01"), "2024-03-01");
    }

    #[test]
    fn format_date_placeholder_for_empty() {
        assert_eq!(format_date(""), PLACEHOLDER);
        assert_eq!(format_date("   "), PLACEHOLDER);
    }

    #[test]
    fn format_upgrade_regroups_separators() {
        assert_eq!(format_upgrade("1,234"), "1,234");
        assert_eq!(format_upgrade("1234"), "1,234");
        assert_eq!(format_upgrade("1234567"), "1,234,567");
    }

    #[test]
    fn format_upgrade_drops_integral_fraction() {
        assert_eq!(format_upgrade("1234.0"), "1,234");
        assert_eq!(format_upgrade("1234.50"), "1,234.5");
    }

    #[test]
    fn format_upgrade_passthrough_and_placeholder() {
        assert_eq!(format_upgrade("abc"), "abc");
        assert_eq!(format_upgrade(""), PLACEHOLDER);
        assert_eq!(format_upgrade("-1234"), "-1,234");
    }

    #[test]
    fn safe_substitutes_placeholder() {
        assert_eq!(safe("  Sylvanas "), "Sylvanas");
        assert_eq!(safe("   "), PLACEHOLDER);
        assert_eq!(safe_or("", "Character"), "Character");
    }
}
