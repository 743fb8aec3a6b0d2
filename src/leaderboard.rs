use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::Tier;

/// An account as listed before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardCandidate {
    pub id: u64,
    pub handle: String,
    pub avatar_ref: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: u64,
    pub handle: String,
    pub avatar_ref: String,
    /// 1-based position.
    pub rank: usize,
    pub score: u32,
    pub tier: Tier,
}

/// Orders by score (highest first, ties by ascending id) and assigns positions.
pub fn build_leaderboard(mut candidates: Vec<LeaderboardCandidate>) -> Vec<LeaderboardEntry> {
    candidates.sort_by(|a, b| match b.score.cmp(&a.score) {
        Ordering::Equal => a.id.cmp(&b.id),
        other => other,
    });

    candidates
        .into_iter()
        .enumerate()
        .map(|(idx, candidate)| LeaderboardEntry {
            id: candidate.id,
            handle: candidate.handle,
            avatar_ref: candidate.avatar_ref,
            rank: idx + 1,
            score: candidate.score,
            tier: Tier::from_score(candidate.score),
        })
        .collect()
}
