use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::summary::SummarySlice;
use crate::ui::view_model::ViewModel;

/// What a finished scan looked like from the client.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub endpoint: String,
    pub item_count: u64,
    pub total_size: u64,
    pub total_size_human: String,
    pub completed_at: DateTime<Local>,
    pub slices: Vec<SummarySlice>,
}

impl CompletionReport {
    pub fn from_view(view: &ViewModel) -> Self {
        Self {
            endpoint: view.endpoint.clone(),
            item_count: view.item_count,
            total_size: view.total_size,
            total_size_human: view.size_label.clone(),
            completed_at: Local::now(),
            slices: view.summary.clone(),
        }
    }
}

pub fn export_report(report: &CompletionReport, output_path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}
