use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;

use drill_lib::clock::Clock;
use drill_lib::config::DrillConfig;
use drill_lib::practice::{discover_practices, plan_session, PracticeInfo, PracticeKey};
use drill_lib::review::{run_session, Reviewer, SessionSummary};
use drill_lib::storage::HistoryStore;
use drill_lib::words::{load_words, WordList};

/// Shared application state for a drill run
pub struct App {
    pub dir: PathBuf,
    pub config: DrillConfig,
    pub words: WordList,
    pub store: HistoryStore,
}

impl App {
    /// Load configuration, words and history from `dir`
    pub fn new(dir: &Path) -> Result<Self> {
        let config = DrillConfig::load(dir).context("Failed to load configuration")?;

        let words_path = config.words_path(dir);
        let words = load_words(&words_path)
            .with_context(|| format!("Failed to load words from {}", words_path.display()))?;

        let store = HistoryStore::open(config.data_path(dir), config.lock_path(dir))
            .context("Failed to open history")?;

        Ok(Self {
            dir: dir.to_path_buf(),
            config,
            words,
            store,
        })
    }

    /// Start tracking new words and save the result
    pub fn discover(&mut self, clock: &impl Clock) -> Result<Vec<PracticeKey>> {
        let added = discover_practices(
            self.store.history_mut(),
            &self.words,
            &self.config.modalities,
            clock.now(),
        );
        self.store.save().context("Failed to save history")?;
        Ok(added)
    }

    /// Pick the items due for review
    pub fn plan<R: Rng + ?Sized>(&self, clock: &impl Clock, rng: &mut R) -> Vec<PracticeInfo> {
        plan_session(
            self.store.history(),
            clock.now(),
            &self.config.schedule_policy(),
            rng,
        )
    }

    /// Review the planned items, saving after each one
    pub fn review(
        &mut self,
        plan: &[PracticeInfo],
        reviewer: &mut dyn Reviewer,
        clock: &impl Clock,
    ) -> Result<SessionSummary> {
        let summary = run_session(plan, &self.words, &mut self.store, reviewer, clock)
            .context("Review session aborted")?;
        Ok(summary)
    }

    pub fn save(&self) -> Result<()> {
        self.store.save().context("Failed to save history")
    }
}
