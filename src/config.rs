use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

fn default_keep_history() -> usize {
    500
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: Option<String>,
    pub export_path: Option<String>,
    #[serde(default = "default_true")]
    pub record_history: bool,
    #[serde(default = "default_keep_history")]
    pub keep_history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            export_path: None,
            record_history: true,
            keep_history: default_keep_history(),
        }
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("stega_inspect"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn default_db_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("history.db");
    Ok(p)
}

pub fn default_export_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("last_headers.txt");
    Ok(p)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Read the config at `path`, writing a template there first if it is missing.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let sample = Config::default();
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(path, tom)?;
        log::info!("Created template config at {}", path.display());
        return Ok(sample);
    }
    let s = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&s)?;
    Ok(cfg)
}

pub fn resolve_db_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(p) = &cfg.db_path {
        Ok(PathBuf::from(p))
    } else {
        default_db_path()
    }
}

pub fn resolve_export_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(p) = &cfg.export_path {
        Ok(PathBuf::from(p))
    } else {
        default_export_path()
    }
}
