use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::ScoringConfig;
use crate::scoring::components::{engagement_rate, SubScorer};
use crate::scoring::{build_history, Tier, WeightedScorer};
use crate::{Profile, RankResult, RankScore, RawMetrics};

/// Scores a profile with the default weights and caps.
pub fn score(profile: &Profile) -> RankScore {
    score_with_config(profile, &ScoringConfig::default())
}

pub fn score_with_config(profile: &Profile, config: &ScoringConfig) -> RankScore {
    let breakdown = SubScorer::new(config.caps.clone()).breakdown(profile);
    let total_score = WeightedScorer::new(config.weights.clone()).total_score(&breakdown);

    RankScore {
        total_score,
        breakdown,
        tier: Tier::from_score(total_score),
        raw_metrics: RawMetrics {
            engagement_rate: engagement_rate(profile),
            growth_rate: None,
        },
    }
}

/// Full result with a history series drawn from the thread-local RNG.
pub fn rank(profile: &Profile) -> RankResult {
    rank_with_rng(profile, &ScoringConfig::default(), &mut rand::thread_rng())
}

pub fn rank_seeded(profile: &Profile, seed: u64) -> RankResult {
    let mut rng = StdRng::seed_from_u64(seed);
    rank_with_rng(profile, &ScoringConfig::default(), &mut rng)
}

pub fn rank_with_rng<R: Rng>(
    profile: &Profile,
    config: &ScoringConfig,
    rng: &mut R,
) -> RankResult {
    let score = score_with_config(profile, config);
    let history = build_history(score.total_score, rng);
    RankResult { score, history }
}
