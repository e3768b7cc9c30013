// src/export/logic.rs

use crate::core::calculator::classifier::BreakPolicy;
use crate::core::report::{Period, ReportLogic};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::SessionExport;
use crate::ui::messages::warning;
use crate::utils::path::is_absolute;
use chrono::{DateTime, Utc};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the sessions of `period` (with their break verdicts) to `file`.
    /// Returns the number of rows written.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        period: Period,
        now: DateTime<Utc>,
        policy: &BreakPolicy,
        force: bool,
    ) -> AppResult<usize> {
        if !is_absolute(file) {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }
        let path = Path::new(file);

        ensure_writable(path, force)?;

        let rows: Vec<SessionExport> = ReportLogic::period(pool, period, None, now, policy)?
            .iter()
            .flat_map(|e| e.sessions.iter().map(SessionExport::from))
            .collect();

        if rows.is_empty() {
            warning("No sessions found for selected period.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("{} sessions ({}) → {}", rows.len(), period.label(), file),
        )?;

        Ok(rows.len())
    }
}
