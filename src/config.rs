//! Host configuration handling

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Host-facing tagging settings
///
/// Unset fields fall back to the `TaggerOptions` defaults, so a partial
/// config file stays valid across versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GutterConfig {
    /// Track buffer edits and remap tag positions
    pub live_updates: Option<bool>,
    /// Merge runs of adjacent commentable lines into one span
    pub coalesce_spans: Option<bool>,
}

/// Load configuration from the user's config directory.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_config() -> anyhow::Result<Option<GutterConfig>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    load_from(&path)
}

/// Save configuration to the user's config directory.
///
/// # Errors
///
/// Returns an error if the config directory cannot be created or the file
/// cannot be written.
pub fn save_config(config: &GutterConfig) -> anyhow::Result<()> {
    let Some(path) = config_path() else {
        return Ok(());
    };
    save_to(config, &path)
}

fn load_from(path: &Path) -> anyhow::Result<Option<GutterConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(Some(config))
}

fn save_to(config: &GutterConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

fn config_path() -> Option<PathBuf> {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else if let Ok(home) = std::env::var("HOME") {
        Path::new(&home).join(".config")
    } else {
        return None;
    };

    Some(base.join("review-gutter").join("config.json"))
}
