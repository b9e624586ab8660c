//! Sync runner: bring a local EPIC mirror up to date with the remote catalog.
//!
//! One run loads the checkpoint (dates already processed) and, optionally, the
//! metadata store, asks the catalog which dates exist, and for every date not
//! yet in the checkpoint (ascending) fetches its metadata and downloads each
//! image that is not already on disk. The indexes are written once, after the
//! last date; an error anywhere aborts the run without touching them.

mod event;

pub use event::{SyncEvent, SyncSummary};

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

use crate::catalog::{Catalog, EpicClient};
use crate::config::{EpicConfig, SyncOptions};
use crate::index::{DateIndex, MetadataStore};
use crate::inventory::Inventory;
use crate::layout::DatasetLayout;
use crate::storage;

/// Dates in `available` that are not in `acquired`, deduplicated and sorted
/// ascending. `YYYY-MM-DD` sorts chronologically as a string.
pub fn new_dates(available: &[String], acquired: &DateIndex) -> Vec<String> {
    available
        .iter()
        .map(String::as_str)
        .filter(|d| !acquired.contains(d))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Everything a run accumulates before it is persisted.
struct SyncState {
    /// True if a checkpoint file existed when the run started.
    resuming: bool,
    dates: DateIndex,
    /// `None` when metadata persistence is off.
    metadata: Option<MetadataStore>,
    inventory: Inventory,
    summary: SyncSummary,
}

impl SyncState {
    fn load(layout: &DatasetLayout, opts: SyncOptions) -> Result<Self> {
        let (resuming, dates) = match DateIndex::load(&layout.dates_path())? {
            Some(idx) => (true, idx),
            None => (false, DateIndex::new()),
        };
        let metadata = if opts.save_metadata {
            Some(MetadataStore::load(&layout.metadata_path())?.unwrap_or_default())
        } else {
            None
        };
        let inventory = Inventory::scan(layout.image_dir())?;
        tracing::debug!(
            dates = dates.len(),
            records = metadata.as_ref().map(MetadataStore::len),
            images = inventory.len(),
            "loaded local state"
        );
        Ok(Self {
            resuming,
            dates,
            metadata,
            inventory,
            summary: SyncSummary::default(),
        })
    }

    /// Write metadata (if kept) and then the checkpoint.
    fn persist(&self, layout: &DatasetLayout) -> Result<()> {
        if let Some(store) = &self.metadata {
            store.save(&layout.metadata_path())?;
        }
        self.dates.save(&layout.dates_path())
    }
}

/// Sync the mirror under `base_dir` against `catalog`.
///
/// Progress notices are passed to `progress` as they happen. Returns counts
/// for the run.
pub fn sync<C: Catalog + ?Sized>(
    catalog: &C,
    base_dir: &Path,
    opts: SyncOptions,
    progress: &mut dyn FnMut(&SyncEvent),
) -> Result<SyncSummary> {
    let layout = DatasetLayout::new(base_dir, opts.quality);
    layout.prepare()?;

    let mut state = SyncState::load(&layout, opts)?;
    progress(&SyncEvent::Starting {
        resuming: state.resuming,
    });

    let available = catalog
        .available_dates()
        .context("query available dates")?;
    let pending = new_dates(&available, &state.dates);
    tracing::info!(
        available = available.len(),
        new = pending.len(),
        "catalog dates"
    );
    progress(&SyncEvent::NewDates {
        count: pending.len(),
    });

    for date in &pending {
        sync_date(catalog, &layout, opts, &mut state, date, progress)?;
    }

    state.persist(&layout)?;
    progress(&SyncEvent::Saved {
        dates: state.dates.len(),
        records: state.metadata.as_ref().map(MetadataStore::len),
    });
    tracing::info!(summary = ?state.summary, "sync finished");
    Ok(state.summary)
}

/// Sync using the HTTP catalog and options from `cfg`.
pub fn sync_with_config(
    cfg: &EpicConfig,
    base_dir: &Path,
    progress: &mut dyn FnMut(&SyncEvent),
) -> Result<SyncSummary> {
    let client = EpicClient::from_config(cfg)?;
    tracing::info!(base = %client.base_url(), dir = %base_dir.display(), quality = ?cfg.quality, "starting sync");
    sync(&client, base_dir, cfg.sync_options(), progress)
}

fn sync_date<C: Catalog + ?Sized>(
    catalog: &C,
    layout: &DatasetLayout,
    opts: SyncOptions,
    state: &mut SyncState,
    date: &str,
    progress: &mut dyn FnMut(&SyncEvent),
) -> Result<()> {
    let records = catalog
        .records_for_date(date)
        .with_context(|| format!("fetch metadata for {}", date))?;
    progress(&SyncEvent::Date {
        date: date.to_string(),
        records: records.len(),
    });

    // Dates are checkpointed together with their metadata; with metadata
    // off, every date is revisited on the next run.
    if let Some(store) = state.metadata.as_mut() {
        store.extend(&records);
        state.dates.insert(date);
    }
    state.summary.new_dates += 1;
    state.summary.records += records.len();

    for record in &records {
        let file_name = record
            .file_name(opts.quality)
            .with_context(|| format!("metadata for {}", date))?;
        let path = layout.image_path(&file_name);

        if state.inventory.contains(&file_name) || path.exists() {
            progress(&SyncEvent::Found { file_name });
            state.summary.found += 1;
            continue;
        }

        progress(&SyncEvent::Downloading {
            file_name: file_name.clone(),
        });
        let bytes = catalog
            .fetch_image(date, opts.quality, &file_name)
            .with_context(|| format!("download {}", file_name))?;
        storage::write_atomic(&path, &bytes)?;
        tracing::debug!(file = %file_name, bytes = bytes.len(), "image saved");
        state.inventory.insert(&file_name);
        state.summary.downloaded += 1;
    }
    Ok(())
}
