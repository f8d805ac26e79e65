//! The command surface the chat gateway calls into.
//!
//! Each entry point takes plain typed arguments and returns a typed reply;
//! the gateway's defer/send/edit choreography stays on its side of the
//! boundary. Zero matches is an informational reply, never an error.

use crate::error::ServiceError;
use crate::fields::schema_for;
use crate::index;
use crate::model::{CommandReply, Difficulty, Page, PageView, PagerHandle, Row};
use crate::pager::Direction;
use crate::pages::{build_pages, chunk_message};
use crate::state::ServiceState;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ItemParams {
    pub item_name: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub wide: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BossParams {
    pub boss: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub wide: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NavigateParams {
    pub session_id: String,
    pub direction: Direction,
}

/// Look up every wish for an item, optionally narrowed to one difficulty.
pub async fn item(
    state: Arc<ServiceState>,
    params: ItemParams,
) -> Result<CommandReply, ServiceError> {
    let raw = state.snapshot().await?;
    state.refill_catalog_from(&raw);

    let mut rows = index::find_by_item(&raw, &params.item_name);
    if let Some(difficulty) = params.difficulty {
        rows.retain(|row| row.difficulty.trim().eq_ignore_ascii_case(difficulty.as_ref()));
    }

    let item_name = params.item_name.trim();
    let title = match params.difficulty {
        Some(difficulty) => format!("Wishes for {} ({})", item_name, difficulty),
        None => format!("Wishes for {}", item_name),
    };
    info!(item = item_name, matches = rows.len(), "item lookup");

    let content = rows
        .is_empty()
        .then(|| format!("No results found for item '{}'.", item_name));
    reply_with_pages(&state, &rows, &title, params.wide, content)
}

/// Look up every wish for a boss's items, optionally narrowed to one
/// difficulty. The user-supplied name is mapped back to the sheet's
/// canonical casing for the title.
pub async fn boss(
    state: Arc<ServiceState>,
    params: BossParams,
) -> Result<CommandReply, ServiceError> {
    let raw = state.snapshot().await?;
    state.refill_catalog_from(&raw);

    let canonical = state.catalog().resolve_canonical(&params.boss);
    let rows = index::find_by_boss(&raw, &canonical, params.difficulty);

    let title = match params.difficulty {
        Some(difficulty) => format!("{} ({})", canonical, difficulty),
        None => canonical.clone(),
    };
    info!(boss = %canonical, matches = rows.len(), "boss lookup");

    let content = rows
        .is_empty()
        .then(|| format!("No rows found for boss '{}'.", canonical));
    reply_with_pages(&state, &rows, &title, params.wide, content)
}

/// Autocomplete feed for the boss argument.
pub async fn suggest_bosses(
    state: Arc<ServiceState>,
    partial: &str,
) -> Result<Vec<String>, ServiceError> {
    state.ensure_boss_catalog().await?;
    Ok(state.catalog().suggest(partial))
}

/// Render the distinct-boss list as fallback text pages.
pub async fn list_bosses(state: Arc<ServiceState>) -> Result<CommandReply, ServiceError> {
    let bosses = state.ensure_boss_catalog().await?;
    if bosses.is_empty() {
        return Ok(CommandReply::message("No bosses found in the sheet."));
    }

    let listing = bosses.join("\n");
    let max_chunk = state.config().max_chunk;
    let pages: Vec<Page> = chunk_message(&listing, max_chunk)
        .into_iter()
        .map(|chunk| Page {
            title: "Bosses".to_string(),
            description: Some(chunk),
            fields: Vec::new(),
            footer: None,
        })
        .collect();
    Ok(finish_reply(&state, pages, None))
}

/// Step a live pagination session. Fails with a stale-interaction error
/// once the session's inactivity window has elapsed.
pub fn navigate(
    state: &ServiceState,
    params: NavigateParams,
) -> Result<PageView, ServiceError> {
    state.pager().navigate(&params.session_id, params.direction)
}

fn reply_with_pages(
    state: &ServiceState,
    rows: &[Row],
    title: &str,
    wide: bool,
    content: Option<String>,
) -> Result<CommandReply, ServiceError> {
    let schema = schema_for(wide);
    let pages = build_pages(rows, title, &schema)?;
    Ok(finish_reply(state, pages, content))
}

fn finish_reply(state: &ServiceState, pages: Vec<Page>, content: Option<String>) -> CommandReply {
    // Navigation affordances exist only when there is something to turn.
    let pager = (pages.len() > 1).then(|| PagerHandle {
        session_id: state.pager().open(pages.clone()),
        page_count: pages.len(),
    });
    CommandReply {
        content,
        pages,
        pager,
    }
}
