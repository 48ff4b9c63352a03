use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    /// Header text is still being fetched by the caller.
    Pending,
    Success,
    Warning,
    Error,
}

impl VerdictStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictStatus::Pending => "pending",
            VerdictStatus::Success => "success",
            VerdictStatus::Warning => "warning",
            VerdictStatus::Error => "error",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerdictStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(VerdictStatus::Pending),
            "success" => Ok(VerdictStatus::Success),
            "warning" => Ok(VerdictStatus::Warning),
            "error" => Ok(VerdictStatus::Error),
            other => Err(anyhow!("unknown verdict status {other:?}")),
        }
    }
}

/// Outcome of classifying a message's STEGA headers.
///
/// `signature`, `timestamp` and `verdict` are only ever set when the
/// signature marker header was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub status: VerdictStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
}

impl VerdictResult {
    /// A result with no signature fields.
    pub fn unsigned(status: VerdictStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            signature: None,
            timestamp: None,
            verdict: None,
        }
    }
}
