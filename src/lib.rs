//! Vocabulary drill with spaced repetition
//!
//! Words are reviewed in three modalities (audio, text, usage). Each
//! word/modality pair keeps an append-only history and becomes due once it
//! has gone unreviewed for at least as long as its longest successful gap.

pub mod clock;
pub mod config;
pub mod practice;
pub mod review;
pub mod storage;
pub mod words;
