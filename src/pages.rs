//! Packs row lists into bounded display pages.

use crate::error::ServiceError;
use crate::fields::fields_from_row;
use crate::model::{Page, Row};

/// The rendering surface refuses more than this many fields per page.
pub const MAX_FIELDS_PER_PAGE: usize = 25;

const PAGE_TITLE_MAX: usize = 256;

pub const NO_RESULTS_MARKER: &str = "No results.";

/// Default ceiling for any non-schema fallback rendering, kept under the
/// surface's message-size limit with room for code fences.
pub const DEFAULT_MAX_CHUNK: usize = 1900;

/// Partitions `rows` into pages of `floor(25 / schema.len())` rows each
/// (minimum one row per page). The "Page i/N" footer appears only when the
/// result spans more than one page. Empty input yields a single synthetic
/// page carrying the no-results marker, so callers never special-case the
/// empty path. An empty schema is a caller error.
pub fn build_pages(
    rows: &[Row],
    title: &str,
    schema: &[String],
) -> Result<Vec<Page>, ServiceError> {
    if schema.is_empty() {
        return Err(ServiceError::EmptySchema);
    }
    let title = clip_title(title);

    if rows.is_empty() {
        return Ok(vec![Page {
            title,
            description: Some(NO_RESULTS_MARKER.to_string()),
            fields: Vec::new(),
            footer: None,
        }]);
    }

    let rows_per_page = (MAX_FIELDS_PER_PAGE / schema.len()).max(1);
    let total = rows.len().div_ceil(rows_per_page);

    let pages = rows
        .chunks(rows_per_page)
        .enumerate()
        .map(|(number, chunk)| {
            let fields = chunk
                .iter()
                .flat_map(|row| fields_from_row(row, schema))
                .collect();
            Page {
                title: title.clone(),
                description: None,
                fields,
                footer: (total > 1).then(|| format!("Page {}/{}", number + 1, total)),
            }
        })
        .collect();

    Ok(pages)
}

fn clip_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.chars().count() <= PAGE_TITLE_MAX {
        trimmed.to_string()
    } else {
        trimmed.chars().take(PAGE_TITLE_MAX).collect()
    }
}

/// Plain-text fallback rendering of a page, for surfaces without field
/// support (and for the console runner).
pub fn page_text(page: &Page) -> String {
    let mut out = String::new();
    out.push_str(&page.title);
    out.push('\n');
    if let Some(description) = &page.description {
        out.push_str(description);
        out.push('\n');
    }
    for field in &page.fields {
        out.push_str(&field.label);
        out.push_str(": ");
        out.push_str(&field.text.replace('\n', " / "));
        out.push('\n');
    }
    if let Some(footer) = &page.footer {
        out.push_str(footer);
        out.push('\n');
    }
    out
}

/// Splits fallback text into chunks the message surface will accept.
/// Boundaries are character-based, never mid-code-point.
pub fn chunk_message(text: &str, max_chunk: usize) -> Vec<String> {
    let max_chunk = max_chunk.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    chars
        .chunks(max_chunk)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
