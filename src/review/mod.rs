//! Interactive review
//!
//! This module provides:
//! - Line-based prompts with re-asking on invalid input
//! - Audio playback through an external player
//! - Audio, text and usage review flows
//! - The session driver that records and saves outcomes

mod error;
pub mod player;
pub mod prompt;
pub mod reviewer;
pub mod session;

pub use error::ReviewError;
pub use player::{AudioPlayer, CommandPlayer};
pub use prompt::Prompter;
pub use reviewer::{InteractiveReviewer, Reviewer};
pub use session::{run_session, SessionError, SessionSummary};
