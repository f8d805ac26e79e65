use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// One parsed wish record. All values are trimmed strings; absent cells
/// collapse to the empty string. The item cell is a lookup key only and is
/// never retained here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Row {
    pub character: String,
    pub spec: String,
    pub date: String,
    pub difficulty: String,
    pub boss: String,
    pub upgrade: String,
    pub icy_veins: String,
    pub wowhead: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    ValueEnum,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "title_case")]
pub enum Difficulty {
    Normal,
    Heroic,
    Mythic,
}

/// A rendered (label, text) pair. Construction goes through
/// `fields::clipped` so both halves respect the rendering surface's limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    pub label: String,
    pub text: String,
}

/// One bounded rendering unit: a title, up to 25 fields, and an optional
/// "Page i/N" footer present only for multi-page results. The description
/// slot carries the no-results marker and plain-text fallback content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Page {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<Field>,
    pub footer: Option<String>,
}

/// Navigation handle returned alongside multi-page results. Absent when a
/// single page was produced, which disables the navigation affordances.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PagerHandle {
    pub session_id: String,
    pub page_count: usize,
}

/// The page currently under a cursor, with its position.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageView {
    pub page: Page,
    pub index: usize,
    pub total: usize,
}

/// What a command hands back to the chat gateway: an optional plain
/// informational message, the rendered pages, and the pager handle when
/// navigation applies.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommandReply {
    pub content: Option<String>,
    pub pages: Vec<Page>,
    pub pager: Option<PagerHandle>,
}

impl CommandReply {
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            pages: Vec::new(),
            pager: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("heroic".parse::<Difficulty>().unwrap(), Difficulty::Heroic);
        assert_eq!("HEROIC".parse::<Difficulty>().unwrap(), Difficulty::Heroic);
        assert_eq!("Mythic".parse::<Difficulty>().unwrap(), Difficulty::Mythic);
        assert!("lfr".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_displays_capitalized() {
        assert_eq!(Difficulty::Heroic.to_string(), "Heroic");
        assert_eq!(Difficulty::Normal.as_ref(), "Normal");
    }

    #[test]
    fn difficulty_serde_uses_lowercase() {
        let json = serde_json::to_string(&Difficulty::Mythic).unwrap();
        assert_eq!(json, "\"mythic\"");
        let back: Difficulty = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(back, Difficulty::Normal);
    }
}
