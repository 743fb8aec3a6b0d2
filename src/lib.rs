pub mod compare;
pub mod config;
pub mod insight;
pub mod leaderboard;
pub mod provider;
pub mod scoring;
pub mod telemetry;

use serde::{Deserialize, Serialize};

use crate::provider::ProviderError;

pub use scoring::{
    build_history, rank, rank_seeded, rank_with_rng, score, score_with_config, Tier,
};

/// Snapshot of an account's public metrics, as handed over by a profile provider.
///
/// Scoring assumes every numeric field is finite and non-negative. The engine
/// does not check this; callers run [`Profile::validate`] on untrusted input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: u64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_ref: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub post_count: u64,
    /// Likes received over the last 30 posts.
    pub recent_likes: u64,
    /// Replies received over the last 30 posts.
    pub recent_replies: u64,
    pub posts_per_week: f64,
    pub account_age_days: u32,
    pub verified: bool,
}

impl Profile {
    /// Rejects snapshots the engine cannot score: a zero id, or a weekly post
    /// rate that is negative or not finite.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.id == 0 {
            return Err(ProviderError::invalid("0", "id must be positive"));
        }
        if !self.posts_per_week.is_finite() || self.posts_per_week < 0.0 {
            return Err(ProviderError::invalid(
                self.id.to_string(),
                format!(
                    "postsPerWeek must be finite and non-negative: {}",
                    self.posts_per_week
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub activity_score: f64,
    pub follower_score: f64,
    pub cast_frequency_score: f64,
    pub completeness_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetrics {
    pub engagement_rate: f64,
    /// Period-over-period follower growth. Always `None` until snapshot history
    /// exists to compute it from.
    pub growth_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub label: String,
    pub value: f64,
}

/// Deterministic part of a rank: identical profiles always produce identical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankScore {
    pub total_score: u32,
    pub breakdown: Breakdown,
    pub tier: Tier,
    pub raw_metrics: RawMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    #[serde(flatten)]
    pub score: RankScore,
    /// Cosmetic sparkline series. Jittered, so never compare it across runs
    /// unless the random source was seeded.
    pub history: Vec<HistoryPoint>,
}

impl RankResult {
    pub fn total_score(&self) -> u32 {
        self.score.total_score
    }

    pub fn tier(&self) -> Tier {
        self.score.tier
    }
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
