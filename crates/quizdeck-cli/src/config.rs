//! Player configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdeck_core::session::DEFAULT_TIMER_MINUTES;

/// Top-level quizdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Default answer to the timer prompt.
    #[serde(default)]
    pub timer_enabled: bool,
    /// Countdown budget in minutes when the timer is on.
    #[serde(default = "default_timer_minutes")]
    pub timer_minutes: u32,
    /// Celebrate results at or above this percentage.
    #[serde(default = "default_celebration_threshold")]
    pub celebration_threshold: u32,
}

fn default_timer_minutes() -> u32 {
    DEFAULT_TIMER_MINUTES
}
fn default_celebration_threshold() -> u32 {
    70
}

impl Default for QuizdeckConfig {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            timer_minutes: default_timer_minutes(),
            celebration_threshold: default_celebration_threshold(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// Falls back to defaults when neither exists.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(QuizdeckConfig::default()),
    }
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}
