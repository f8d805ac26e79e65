//! Error taxonomy for the lookup service.
//!
//! Zero matches is not an error: lookups return an empty list and the
//! command layer answers with an informational reply. Parsing and
//! formatting never raise. The variants here are the failures that must
//! cross component boundaries and reach the user.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The spreadsheet fetch failed (I/O, auth, quota). Logged with detail
    /// and surfaced to the user; never silently swallowed, never retried by
    /// the core.
    #[error("spreadsheet backend unavailable: {source}")]
    BackendUnavailable {
        #[source]
        source: anyhow::Error,
    },

    /// The configured worksheet does not exist in the workbook.
    #[error("worksheet {0:?} not found in workbook")]
    WorksheetNotFound(String),

    /// Navigation arrived after the pagination session's inactivity window
    /// expired (or the session never existed).
    #[error("pagination session expired or unknown")]
    StaleInteraction,

    /// A caller asked for pages with an empty schema.
    #[error("schema must contain at least one field key")]
    EmptySchema,
}

impl ServiceError {
    pub fn backend(source: impl Into<anyhow::Error>) -> Self {
        ServiceError::BackendUnavailable {
            source: source.into(),
        }
    }

    /// Category label attached to log fields.
    pub fn category(&self) -> &'static str {
        match self {
            ServiceError::BackendUnavailable { .. } => "backend_error",
            ServiceError::WorksheetNotFound(_) => "not_found",
            ServiceError::StaleInteraction => "stale_interaction",
            ServiceError::EmptySchema => "caller_error",
        }
    }

    /// The text shown on the chat surface when the command fails.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::BackendUnavailable { .. } => {
                "The wish sheet could not be reached. Try again in a moment.".to_string()
            }
            ServiceError::WorksheetNotFound(name) => {
                format!("Worksheet '{name}' was not found in the configured workbook.")
            }
            ServiceError::StaleInteraction => {
                "This result set has expired. Run the command again.".to_string()
            }
            ServiceError::EmptySchema => "Nothing to render: the schema is empty.".to_string(),
        }
    }
}
