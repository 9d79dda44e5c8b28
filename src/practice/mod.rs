//! Practice items and review scheduling
//!
//! This module provides:
//! - Practice keys, history entries and the ordered review history
//! - Scoring of items by fade and longest successful interval
//! - Due-item selection (eligibility, ranking, one item per word)
//! - Discovery of new word/modality pairs

pub mod algorithm;
pub mod discovery;
pub mod models;

pub use algorithm::{plan_session, EligibilityRule, SchedulePolicy};
pub use discovery::discover_practices;
pub use models::*;
