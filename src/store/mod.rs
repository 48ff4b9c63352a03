pub mod repo;
pub mod sqlite;

use anyhow::Result;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::history::{HistoryEntry, HistoryId};
use crate::store::repo::VerdictRepository;

pub fn epoch_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Store one verdict and drop everything older than the newest `keep`.
pub fn record_and_prune(
    repo: &dyn VerdictRepository,
    entry: &HistoryEntry,
    keep: usize,
) -> Result<HistoryId> {
    let id = repo.record(entry)?;
    repo.prune_keep_recent(keep)?;
    Ok(id)
}
