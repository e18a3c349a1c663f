use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::resolve::SearchBounds;

/// `[search]`: bounds for the offset search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Hard ceiling on offset magnitude.
    pub max_offset: u32,
    /// Per-dimension step cap, applied under `max_offset`.
    pub max_steps: u32,
    /// Cap on candidate combinations per file.
    pub max_candidates: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let b = SearchBounds::default();
        Self {
            max_offset: b.max_offset,
            max_steps: b.max_steps,
            max_candidates: b.max_candidates,
        }
    }
}

/// `[server]`: listings server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the listings server.
    pub bind_addr: String,
    /// Database file override; defaults to the XDG state directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".to_string(),
            db_path: None,
        }
    }
}

/// Global configuration loaded from `~/.config/adkit/config.toml`.
///
/// Every field is optional; unset fields fall back to built-in behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdkitConfig {
    /// Device catalog path; the CLI falls back to `devices.toml` in the
    /// working directory.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Overrides every device's content-store prefix (e.g. a local mirror).
    #[serde(default)]
    pub prefix_url: Option<String>,
    /// Where bundles are written; defaults to the working directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub search: Option<SearchConfig>,
    #[serde(default)]
    pub server: Option<ServerConfig>,
}

impl AdkitConfig {
    /// Effective offset-search bounds.
    pub fn search_bounds(&self) -> SearchBounds {
        let s = self.search.clone().unwrap_or_default();
        SearchBounds {
            max_offset: s.max_offset,
            max_steps: s.max_steps,
            max_candidates: s.max_candidates,
        }
    }

    /// Effective listings server settings.
    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
}

/// Path to the config file, creating parent directories as needed.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs =
        xdg::BaseDirectories::with_prefix("adkit").context("resolve XDG base directories")?;
    xdg_dirs
        .place_config_file("config.toml")
        .context("create config directory")
}

/// Loads the config, writing a default file on first run.
pub fn load_or_init() -> Result<AdkitConfig> {
    let path = config_path()?;
    if path.exists() {
        let text =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg: AdkitConfig =
            toml::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    } else {
        // Seed the file with the tunable sections spelled out.
        let cfg = AdkitConfig {
            search: Some(SearchConfig::default()),
            server: Some(ServerConfig::default()),
            ..AdkitConfig::default()
        };
        let text = toml::to_string_pretty(&cfg).context("serialize default config")?;
        fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        Ok(cfg)
    }
}
