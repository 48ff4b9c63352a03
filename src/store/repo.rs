use anyhow::Result;

use crate::domain::history::{HistoryEntry, HistoryId};

pub trait VerdictRepository {
    fn record(&self, entry: &HistoryEntry) -> Result<HistoryId>;

    /// Newest first.
    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>>;

    fn prune_keep_recent(&self, keep: usize) -> Result<()>;
}
