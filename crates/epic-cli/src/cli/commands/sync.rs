//! Run one sync and print progress lines to stdout.

use anyhow::Result;
use epic_core::config::EpicConfig;
use epic_core::sync::{self, SyncEvent};
use std::path::Path;

/// Console line for an event, if it has one.
pub(crate) fn event_line(event: &SyncEvent) -> Option<String> {
    match event {
        SyncEvent::Starting { resuming: true } => Some("Resuming dataset download...".to_string()),
        SyncEvent::Starting { resuming: false } => {
            Some("Beginning dataset download...".to_string())
        }
        SyncEvent::NewDates { count: 0 } => Some("No new dates available.".to_string()),
        SyncEvent::NewDates { count } => Some(format!("{} new date(s) to process.", count)),
        SyncEvent::Downloading { file_name } => Some(format!("Downloading: {}", file_name)),
        SyncEvent::Found { file_name } => Some(format!("Image file found:  {}", file_name)),
        SyncEvent::Date { date, records } => {
            tracing::debug!("{}: {} record(s)", date, records);
            None
        }
        SyncEvent::Saved { .. } => None,
    }
}

pub fn run_sync(cfg: &EpicConfig, base_dir: &Path) -> Result<()> {
    let summary = sync::sync_with_config(cfg, base_dir, &mut |event: &SyncEvent| {
        if let Some(line) = event_line(event) {
            println!("{}", line);
        }
    })?;

    if summary.new_dates > 0 {
        println!(
            "Processed {} date(s): {} image(s) downloaded, {} already present.",
            summary.new_dates, summary.downloaded, summary.found
        );
    }
    tracing::info!(
        "run completed: {} date(s), {} record(s), {} downloaded, {} found",
        summary.new_dates,
        summary.records,
        summary.downloaded,
        summary.found
    );
    Ok(())
}
