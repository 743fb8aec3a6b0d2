use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::ScoringConfig;
use crate::provider::{ProfileProvider, ProviderError};
use crate::scoring::rank_with_rng;
use crate::{Profile, RankResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Left,
    Right,
    Tie,
}

impl Winner {
    pub fn from_scores(left: u32, right: u32) -> Self {
        match left.cmp(&right) {
            Ordering::Greater => Winner::Left,
            Ordering::Less => Winner::Right,
            Ordering::Equal => Winner::Tie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProfile {
    pub profile: Profile,
    pub rank: RankResult,
}

impl RankedProfile {
    pub fn new(profile: Profile, config: &ScoringConfig) -> Self {
        let rank = rank_with_rng(&profile, config, &mut rand::thread_rng());
        Self { profile, rank }
    }

    /// Same as [`RankedProfile::new`] with a reproducible history series.
    pub fn seeded(profile: Profile, config: &ScoringConfig, seed: u64) -> Self {
        let rank = rank_with_rng(&profile, config, &mut StdRng::seed_from_u64(seed));
        Self { profile, rank }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub left: RankedProfile,
    pub right: RankedProfile,
    pub winner: Winner,
}

/// Only total scores decide; tiers and breakdowns are not consulted.
pub fn compare_results(left: &RankResult, right: &RankResult) -> Winner {
    Winner::from_scores(left.total_score(), right.total_score())
}

/// Fetches both profiles concurrently and scores them once both are in. Either
/// fetch failing aborts the comparison.
pub async fn compare_profiles<P: ProfileProvider + Sync>(
    provider: &P,
    left_id: u64,
    right_id: u64,
    config: &ScoringConfig,
) -> Result<Comparison, ProviderError> {
    let (left, right) = tokio::try_join!(
        provider.fetch_profile(left_id),
        provider.fetch_profile(right_id)
    )?;

    let left = RankedProfile::new(left, config);
    let right = RankedProfile::new(right, config);
    let winner = compare_results(&left.rank, &right.rank);

    Ok(Comparison {
        left,
        right,
        winner,
    })
}
