use anyhow::Result;
use std::path::Path;

use crate::domain::email::MessageInfo;
use crate::domain::headers::HeaderMap;
use crate::domain::verdict::{VerdictResult, VerdictStatus};
use crate::mail::export::{ExportFormat, write_headers};
use crate::mail::header_parser::parse_headers;
use crate::mail::signature::classify_signature;

/// Where the panel is in its read-and-classify lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel {
    /// Nothing has been read yet.
    #[default]
    Idle,
    /// Header text is being fetched.
    Pending,
    Ready {
        headers: HeaderMap,
        info: MessageInfo,
        verdict: VerdictResult,
    },
    /// The header text itself could not be obtained.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct AppState {
    pub source_label: String,
    pub panel: Panel,
    pub headers_scroll: u16,
    /// One-line feedback for the footer (export done, export failed, ...).
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            source_label: source_label.into(),
            ..Self::default()
        }
    }

    /// Status badge to show; `None` while idle or after a read failure.
    pub fn status(&self) -> Option<VerdictStatus> {
        match &self.panel {
            Panel::Idle | Panel::Failed(_) => None,
            Panel::Pending => Some(VerdictStatus::Pending),
            Panel::Ready { verdict, .. } => Some(verdict.status),
        }
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        match &self.panel {
            Panel::Ready { headers, .. } => Some(headers),
            _ => None,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.panel = Panel::Pending;
        self.headers_scroll = 0;
        self.notice = None;
    }

    /// Parse and classify fetched text, or record why the fetch failed.
    pub fn finish_fetch(&mut self, raw: Result<String>) {
        self.panel = match raw {
            Ok(text) => {
                let headers = parse_headers(&text);
                let verdict = classify_signature(Some(&headers));
                let info = MessageInfo::from_headers(&headers);
                Panel::Ready {
                    headers,
                    info,
                    verdict,
                }
            }
            Err(e) => Panel::Failed(format!("Unable to read the headers: {e:#}")),
        };
    }

    /// Export the headers held by the panel. No-op notice when none are loaded.
    pub fn export_headers(&mut self, path: &Path, format: ExportFormat) {
        let Some(headers) = self.headers() else {
            self.notice = Some("Read the headers first (h).".to_string());
            return;
        };
        self.notice = Some(match write_headers(headers, format, path) {
            Ok(()) => format!("Headers written to {}", path.display()),
            Err(e) => format!("Export failed: {e:#}"),
        });
    }

    pub fn scroll_headers(&mut self, delta: i32) {
        if delta < 0 {
            self.headers_scroll = self.headers_scroll.saturating_sub((-delta) as u16);
        } else {
            self.headers_scroll = self.headers_scroll.saturating_add(delta as u16);
        }
    }
}
