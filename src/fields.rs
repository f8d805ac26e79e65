//! Schema-driven field rendering.
//!
//! Every field key is one case of a closed enumeration, each a pure
//! `Row -> Field` renderer. Schemas arrive as ordered key strings so a
//! caller (or a config file) can compose arbitrary layouts; a key that does
//! not resolve is skipped with a warning rather than failing the render.

use crate::model::{Field, Row};
use crate::row::{PLACEHOLDER, format_date, format_upgrade, safe, safe_or};
use strum::{AsRefStr, EnumString};
use tracing::warn;

/// Hard limits of the rendering surface, not stylistic choices.
pub const FIELD_LABEL_MAX: usize = 256;
pub const FIELD_TEXT_MAX: usize = 1024;

pub const COMPACT_SCHEMA: &[&str] = &["character_block", "difficulty", "upgrade_links"];
pub const WIDE_SCHEMA: &[&str] = &["character", "spec", "date", "difficulty", "upgrade_links"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FieldKey {
    CharacterBlock,
    Character,
    Spec,
    Date,
    Difficulty,
    Upgrade,
    UpgradeLinks,
    Links,
    Boss,
}

impl FieldKey {
    pub fn render(self, row: &Row) -> Field {
        match self {
            FieldKey::CharacterBlock => clipped(
                safe_or(&row.character, "Character"),
                format!("*{}*\n{}", safe(&row.spec), format_date(&row.date)),
            ),
            FieldKey::Character => clipped("Character", safe(&row.character)),
            FieldKey::Spec => clipped("Spec", safe(&row.spec)),
            FieldKey::Date => clipped("Date", format_date(&row.date)),
            FieldKey::Difficulty => clipped("Difficulty", safe(&row.difficulty)),
            FieldKey::Upgrade => clipped("Upgrade #", format_upgrade(&row.upgrade)),
            FieldKey::UpgradeLinks => {
                let upgrade = format_upgrade(&row.upgrade);
                let text = match link_line(row) {
                    Some(links) => format!("{}\n{}", upgrade, links),
                    None => upgrade,
                };
                clipped("Upgrade #", text)
            }
            FieldKey::Links => clipped(
                "Links",
                link_line(row).unwrap_or_else(|| PLACEHOLDER.to_string()),
            ),
            FieldKey::Boss => clipped("Boss", safe(&row.boss)),
        }
    }
}

/// Resolves each schema key in order. Unknown keys degrade to a logged
/// warning so a schema typo costs one field, not the whole render.
pub fn fields_from_row(row: &Row, schema: &[String]) -> Vec<Field> {
    schema
        .iter()
        .filter_map(|key| match key.parse::<FieldKey>() {
            Ok(field_key) => Some(field_key.render(row)),
            Err(_) => {
                warn!(key = %key, "unknown field key in schema, skipping");
                None
            }
        })
        .collect()
}

pub fn schema_for(wide: bool) -> Vec<String> {
    let keys = if wide { WIDE_SCHEMA } else { COMPACT_SCHEMA };
    keys.iter().map(|key| key.to_string()).collect()
}

/// Builds a field with both halves clipped to the surface limits.
pub fn clipped(label: impl Into<String>, text: impl Into<String>) -> Field {
    Field {
        label: truncate_chars(label.into(), FIELD_LABEL_MAX),
        text: truncate_chars(text.into(), FIELD_TEXT_MAX),
    }
}

fn truncate_chars(value: String, max: usize) -> String {
    if value.chars().count() <= max {
        value
    } else {
        value.chars().take(max).collect()
    }
}

fn link_line(row: &Row) -> Option<String> {
    let mut links = Vec::new();
    let wowhead = row.wowhead.trim();
    if !wowhead.is_empty() {
        links.push(format!("[Wowhead]({})", wowhead));
    }
    let icy_veins = row.icy_veins.trim();
    if !icy_veins.is_empty() {
        links.push(format!("[Icy Veins]({})", icy_veins));
    }
    if links.is_empty() {
        None
    } else {
        Some(links.join(" | "))
    }
}
