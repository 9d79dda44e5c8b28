//! Drill configuration
//!
//! Read from an optional `drill.toml` in the working directory. Every key has
//! a default, so a missing file means the default policy.
//!
//! ```toml
//! grace_period_secs = 30
//! modalities = ["audio"]
//!
//! [eligibility]
//! rule = "ratio-at-least"
//! min_ratio = 2.0
//!
//! [player]
//! command = "mpv"
//! args = ["--no-video"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

use crate::practice::algorithm::DEFAULT_GRACE_PERIOD_SECS;
use crate::practice::{EligibilityRule, Modality, SchedulePolicy};

/// Name of the configuration file inside the working directory
pub const CONFIG_FILE_NAME: &str = "drill.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid drill.toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// External program used to play recordings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub command: String,
    /// Arguments placed before the file path
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrillConfig {
    pub words_file: String,
    pub data_file: String,
    pub lock_file: String,
    pub audio_extension: String,
    pub grace_period_secs: u32,
    /// Enabled modalities, in the order new words are set up
    pub modalities: Vec<Modality>,
    /// Extra plays allowed during an audio review
    pub audio_replays: u32,
    pub eligibility: EligibilityRule,
    pub player: PlayerConfig,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            words_file: "words".to_string(),
            data_file: "data".to_string(),
            lock_file: ".data.lock".to_string(),
            audio_extension: "mp3".to_string(),
            grace_period_secs: DEFAULT_GRACE_PERIOD_SECS as u32,
            modalities: Modality::ALL.to_vec(),
            audio_replays: 1,
            eligibility: EligibilityRule::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl DrillConfig {
    /// Load `drill.toml` from `dir`, falling back to defaults if absent
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No {} in {:?}, using defaults", CONFIG_FILE_NAME, dir);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.modalities.is_empty() {
            return Err(ConfigError::Invalid("at least one modality must be enabled".into()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.modalities.iter().find(|m| !seen.insert(**m)) {
            return Err(ConfigError::Invalid(format!("modality '{}' listed twice", dup)));
        }

        if let EligibilityRule::RatioAtLeast { min_ratio } = self.eligibility {
            if !min_ratio.is_finite() || min_ratio < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "min_ratio must be a non-negative number, got {}",
                    min_ratio
                )));
            }
        }

        if self.player.command.trim().is_empty() {
            return Err(ConfigError::Invalid("player command is empty".into()));
        }

        Ok(())
    }

    pub fn grace_period(&self) -> Duration {
        Duration::seconds(i64::from(self.grace_period_secs))
    }

    pub fn schedule_policy(&self) -> SchedulePolicy {
        SchedulePolicy {
            rule: self.eligibility,
            grace_period: self.grace_period(),
            modalities: self.modalities.clone(),
        }
    }

    pub fn words_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.words_file)
    }

    pub fn data_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.data_file)
    }

    pub fn lock_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.lock_file)
    }
}
