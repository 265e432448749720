//! Session Configuration
//!
//! Target codes and scanning preferences, stored in TOML format. The host
//! establishes the configuration before a session starts; it is read-only
//! while analysis is active.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::shared::DEFAULT_LOG_CAPACITY;
use crate::vision::ConfusionTable;

/// Scanning session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Target codes, in match-priority order (first match wins)
    pub codes: Vec<String>,
    /// Confusable-letter substitutions overriding the built-in table.
    /// Keys and values must be single characters; an empty map keeps the
    /// built-in set.
    #[serde(default)]
    pub confusions: BTreeMap<String, String>,
    /// Characters kept in the diagnostic log before it clears itself
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    /// Play an audible cue when a code matches (applied by the host)
    #[serde(default = "default_true")]
    pub sound_on_match: bool,
}

fn default_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

fn default_true() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            codes: Vec::new(),
            confusions: BTreeMap::new(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            sound_on_match: true,
        }
    }
}

impl ScanConfig {
    /// Build the confusion table this configuration describes.
    ///
    /// Fails when an override entry is not a single character on both sides;
    /// bad substitution data is a session-start error, not something to
    /// guess around per frame.
    pub fn confusion_table(&self) -> Result<ConfusionTable> {
        if self.confusions.is_empty() {
            return Ok(ConfusionTable::default());
        }

        let mut pairs = Vec::with_capacity(self.confusions.len());
        for (from, to) in &self.confusions {
            let from = single_char(from)
                .with_context(|| format!("confusion key {from:?} must be a single character"))?;
            let to = single_char(to)
                .with_context(|| format!("confusion value {to:?} must be a single character"))?;
            pairs.push((from, to));
        }
        Ok(ConfusionTable::from_pairs(pairs))
    }
}

fn single_char(s: &str) -> Result<char> {
    let mut chars = s.chars();
    let first = chars.next().context("empty string")?;
    ensure!(chars.next().is_none(), "more than one character");
    Ok(first)
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<ScanConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {path:?}"))?;
    let config: ScanConfig = toml::from_str(&content).context("failed to parse config")?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &ScanConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, content).with_context(|| format!("failed to write config to {path:?}"))?;
    Ok(())
}
