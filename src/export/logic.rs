// src/export/logic.rs

use crate::core::aggregator::AggregateOptions;
use crate::core::pipeline::load_work_days;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::WorkDayExport;
use crate::ui::messages::{skipped_records, warning};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Run one aggregation pass and write one row per work day.
    pub fn export<S: RecordStore + ?Sized>(
        store: &S,
        options: AggregateOptions,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let aggregation = load_work_days(store, options)?;
        skipped_records(&aggregation.warnings);

        if aggregation.days.is_empty() {
            warning("No work days found: nothing to export.");
            return Ok(0);
        }

        let rows: Vec<WorkDayExport> = aggregation.days.iter().map(WorkDayExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
