//! Audio playback through an external player

use std::path::Path;
use std::process::{Command, Stdio};

use super::error::{ReviewError, Result};
use crate::config::PlayerConfig;

pub trait AudioPlayer {
    /// Play the file at `path`, blocking until playback ends
    fn play(&mut self, path: &Path) -> Result<()>;
}

/// Runs `<command> <args...> <path>` for every play
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    command: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }
}

impl AudioPlayer for CommandPlayer {
    fn play(&mut self, path: &Path) -> Result<()> {
        log::debug!("Running {} {:?} {:?}", self.command, self.args, path);

        // The player must not read from the terminal the prompts use
        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ReviewError::PlayerLaunch {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ReviewError::PlayerFailed {
                command: self.command.clone(),
                status,
            });
        }
        Ok(())
    }
}
