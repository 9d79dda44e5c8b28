//! Due-item scheduling
//!
//! Every practice item is scored from its own history:
//! - fade: time since the last entry
//! - max: the longest gap that ended in an `ok` review
//! - ratio: fade / (max + 1ns)
//!
//! An item is due once it has faded at least as long as its longest
//! successful gap (or, with the ratio rule, once the ratio crosses a
//! threshold) and is older than the grace period. Due items are shuffled,
//! ordered by ratio and reduced to one item per word.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::models::{HistoryEntry, Modality, Outcome, PracticeHistory, PracticeInfo, PracticeKey};

/// Default minimum age before an item can be reviewed
pub const DEFAULT_GRACE_PERIOD_SECS: i64 = 30 * 60;

/// Threshold used by the ratio rule when none is configured
pub const DEFAULT_MIN_RATIO: f64 = 2.0;

/// Condition an item's score must meet to be due
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "EligibilityTable")]
pub enum EligibilityRule {
    /// Due once `fade >= max`
    #[default]
    FadeAtLeastMax,
    /// Due once `ratio >= min_ratio`
    RatioAtLeast { min_ratio: f64 },
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum RuleName {
    FadeAtLeastMax,
    RatioAtLeast,
}

/// `[eligibility]` table as written in the config file
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EligibilityTable {
    rule: RuleName,
    min_ratio: Option<f64>,
}

impl TryFrom<EligibilityTable> for EligibilityRule {
    type Error = String;

    fn try_from(table: EligibilityTable) -> Result<Self, Self::Error> {
        match (table.rule, table.min_ratio) {
            (RuleName::FadeAtLeastMax, None) => Ok(Self::FadeAtLeastMax),
            (RuleName::FadeAtLeastMax, Some(_)) => {
                Err("min_ratio only applies to rule \"ratio-at-least\"".to_string())
            }
            (RuleName::RatioAtLeast, min_ratio) => Ok(Self::RatioAtLeast {
                min_ratio: min_ratio.unwrap_or(DEFAULT_MIN_RATIO),
            }),
        }
    }
}

/// Everything the selector needs to decide what is due
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePolicy {
    pub rule: EligibilityRule,
    pub grace_period: Duration,
    /// Modalities that may be scheduled
    pub modalities: Vec<Modality>,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            rule: EligibilityRule::default(),
            grace_period: Duration::seconds(DEFAULT_GRACE_PERIOD_SECS),
            modalities: Modality::ALL.to_vec(),
        }
    }
}

impl SchedulePolicy {
    /// Check whether a scored item is due for review
    pub fn is_eligible(&self, info: &PracticeInfo) -> bool {
        if !self.modalities.contains(&info.key.modality) {
            return false;
        }
        if info.fade < self.grace_period {
            return false;
        }
        match self.rule {
            EligibilityRule::FadeAtLeastMax => info.fade >= info.max,
            EligibilityRule::RatioAtLeast { min_ratio } => info.ratio >= min_ratio,
        }
    }
}

fn as_nanos(d: Duration) -> f64 {
    d.num_seconds() as f64 * 1e9 + d.subsec_nanos() as f64
}

/// Compute `fade / (max + 1ns)`
pub fn fade_ratio(fade: Duration, max: Duration) -> f64 {
    as_nanos(fade) / (as_nanos(max) + 1.0)
}

/// Score a single item from its entries
pub fn score_practice(
    key: &PracticeKey,
    entries: &[HistoryEntry],
    now: DateTime<Utc>,
) -> PracticeInfo {
    let fade = entries
        .last()
        .map(|last| (now - last.timestamp).max(Duration::zero()))
        .unwrap_or_else(Duration::zero);

    let max = entries
        .windows(2)
        .filter(|pair| pair[1].outcome == Outcome::Ok)
        .map(|pair| pair[1].timestamp - pair[0].timestamp)
        .fold(Duration::zero(), |longest, gap| longest.max(gap));

    PracticeInfo {
        key: key.clone(),
        fade,
        max,
        ratio: fade_ratio(fade, max),
    }
}

/// Score every item in the history, in history order
pub fn score_history(history: &PracticeHistory, now: DateTime<Utc>) -> Vec<PracticeInfo> {
    history
        .iter()
        .map(|(key, entries)| score_practice(key, entries, now))
        .collect()
}

/// Order items by ratio, most overdue first.
///
/// The shuffle runs before a stable sort so that only items with equal
/// ratios end up in random relative order.
pub fn rank_by_ratio<R: Rng + ?Sized>(infos: &mut [PracticeInfo], rng: &mut R) {
    infos.shuffle(rng);
    infos.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
}

/// Keep the first item of each word, dropping later modalities
pub fn dedup_by_word(infos: Vec<PracticeInfo>) -> Vec<PracticeInfo> {
    let mut seen = HashSet::new();
    infos
        .into_iter()
        .filter(|info| seen.insert(info.key.word.clone()))
        .collect()
}

/// Build the ordered list of items to review this session
pub fn plan_session<R: Rng + ?Sized>(
    history: &PracticeHistory,
    now: DateTime<Utc>,
    policy: &SchedulePolicy,
    rng: &mut R,
) -> Vec<PracticeInfo> {
    let mut due: Vec<PracticeInfo> = score_history(history, now)
        .into_iter()
        .filter(|info| {
            let eligible = policy.is_eligible(info);
            log::debug!(
                "{} fade {} max {} ratio {:.3} eligible {}",
                info.key,
                format_duration(info.fade),
                format_duration(info.max),
                info.ratio,
                eligible
            );
            eligible
        })
        .collect();

    rank_by_ratio(&mut due, rng);
    let planned = dedup_by_word(due);

    log::info!("Planned {} of {} practices", planned.len(), history.len());
    planned
}

/// Format a duration to a short human-readable string
pub fn format_duration(d: Duration) -> String {
    let secs = d.num_seconds();
    if secs <= 0 {
        "now".to_string()
    } else if secs < 60 {
        format!("{}s", secs)
    } else if secs < 60 * 60 {
        format!("{}m", secs / 60)
    } else if secs < 24 * 60 * 60 {
        format!("{}h", secs / (60 * 60))
    } else {
        let days = secs / (24 * 60 * 60);
        if days < 7 {
            format!("{}d", days)
        } else if days < 30 {
            format!("{}w", days / 7)
        } else if days < 365 {
            format!("{}mo", days / 30)
        } else {
            format!("{}y", days / 365)
        }
    }
}
