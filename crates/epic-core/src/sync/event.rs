//! Progress notices and run summary.

/// Something the runner did that the user may want to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Local state loaded. `resuming` is true if a checkpoint already existed.
    Starting { resuming: bool },
    /// Number of catalog dates not yet in the checkpoint.
    NewDates { count: usize },
    /// Metadata for `date` fetched.
    Date { date: String, records: usize },
    /// About to download an image.
    Downloading { file_name: String },
    /// Image already on disk; skipped without a request.
    Found { file_name: String },
    /// Indexes written. `records` is `None` when metadata is not kept.
    Saved { dates: usize, records: Option<usize> },
}

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Dates newly processed this run.
    pub new_dates: usize,
    /// Metadata records fetched this run.
    pub records: usize,
    /// Images downloaded.
    pub downloaded: usize,
    /// Images skipped because they were already present.
    pub found: usize,
}
