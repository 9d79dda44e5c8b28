use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed while waiting for a response")]
    InputClosed,

    #[error("Failed to launch audio player '{command}': {source}")]
    PlayerLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Audio player '{command}' exited with {status}")]
    PlayerFailed { command: String, status: ExitStatus },
}

pub type Result<T> = std::result::Result<T, ReviewError>;
