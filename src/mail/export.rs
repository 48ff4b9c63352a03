use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::Path;

use crate::domain::headers::HeaderMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// One `name: value` line per header
    #[default]
    Text,
    /// JSON object in header order
    Json,
}

pub fn render_headers(headers: &HeaderMap, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Text => {
            let mut out = String::new();
            for (name, value) in headers.iter() {
                out.push_str(name);
                out.push_str(": ");
                out.push_str(value);
                out.push('\n');
            }
            Ok(out)
        }
        ExportFormat::Json => Ok(serde_json::to_string_pretty(headers)?),
    }
}

/// Write the parsed headers to `path`, creating parent directories.
pub fn write_headers(headers: &HeaderMap, format: ExportFormat, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let s = render_headers(headers, format)?;
    fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
