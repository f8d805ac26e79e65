//! The spreadsheet boundary.
//!
//! One operation: fetch every row of a named worksheet as ordered string
//! tuples. The source is cold and possibly slow, so implementations are
//! blocking and callers cross the boundary through `spawn_blocking`
//! (`ServiceState::snapshot`). The backend itself is stateless and safe to
//! share across concurrent lookups.

use crate::error::ServiceError;
use anyhow::Context;
use std::path::PathBuf;
use umya_spreadsheet::reader::xlsx;

pub trait SheetBackend: Send + Sync {
    /// Returns all rows of `worksheet`, header line included, each row as
    /// its ordered cell values. Trailing empty cells may be present; the
    /// parser pads and trims, so implementations do not normalize.
    fn fetch_all(&self, worksheet: &str) -> Result<Vec<Vec<String>>, ServiceError>;
}

/// Reads a local `.xlsx` workbook. The file is re-read on every fetch:
/// freshness policy lives in the callers (the boss catalog's TTL and the
/// per-command snapshot), not here.
pub struct XlsxBackend {
    path: PathBuf,
}

impl XlsxBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SheetBackend for XlsxBackend {
    fn fetch_all(&self, worksheet: &str) -> Result<Vec<Vec<String>>, ServiceError> {
        let book = xlsx::read(&self.path)
            .with_context(|| format!("failed to read workbook {:?}", self.path))
            .map_err(|source| ServiceError::BackendUnavailable { source })?;

        let sheet = book
            .get_sheet_by_name(worksheet)
            .ok_or_else(|| ServiceError::WorksheetNotFound(worksheet.to_string()))?;

        let (max_col, max_row) = sheet.get_highest_column_and_row();
        let mut rows = Vec::with_capacity(max_row as usize);
        for row_idx in 1..=max_row {
            let mut line = Vec::with_capacity(max_col as usize);
            for col_idx in 1..=max_col {
                let value = sheet
                    .get_cell((col_idx, row_idx))
                    .map(|cell| cell.get_value().to_string())
                    .unwrap_or_default();
                line.push(value);
            }
            rows.push(line);
        }
        Ok(rows)
    }
}
