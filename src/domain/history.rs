use serde::Serialize;

use crate::domain::verdict::{VerdictResult, VerdictStatus};

pub type HistoryId = i64;

/// One stored classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: Option<HistoryId>,
    pub source: String,
    pub subject: String,
    pub status: VerdictStatus,
    pub message: String,
    pub signature: Option<String>,
    pub timestamp: Option<String>,
    pub verdict: Option<String>,
    pub checked_at_epoch: i64,
}

impl HistoryEntry {
    pub fn new(
        source: impl Into<String>,
        subject: impl Into<String>,
        result: &VerdictResult,
        checked_at_epoch: i64,
    ) -> Self {
        Self {
            id: None,
            source: source.into(),
            subject: subject.into(),
            status: result.status,
            message: result.message.clone(),
            signature: result.signature.clone(),
            timestamp: result.timestamp.clone(),
            verdict: result.verdict.clone(),
            checked_at_epoch,
        }
    }
}
