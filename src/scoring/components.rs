use serde::{Deserialize, Serialize};

use crate::{Breakdown, Profile};

const MAX_SUB_SCORE: f64 = 100.0;

const BIO_POINTS: f64 = 30.0;
const AVATAR_POINTS: f64 = 30.0;
const DISPLAY_NAME_POINTS: f64 = 20.0;
const VERIFIED_POINTS: f64 = 20.0;

/// Normalisation targets: hitting a cap earns the full 100 on that sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreCaps {
    /// Weighted engagement (likes + 2 * replies) that maps to a full activity score.
    pub activity_cap: f64,
    /// log10 of the follower count that maps to a full follower score.
    pub follower_log_ceiling: f64,
    pub target_posts_per_week: f64,
    /// A bio must be strictly longer than this many characters to count.
    pub bio_min_chars: usize,
}

impl Default for ScoreCaps {
    fn default() -> Self {
        Self {
            activity_cap: 1000.0,
            follower_log_ceiling: 4.0,
            target_posts_per_week: 20.0,
            bio_min_chars: 10,
        }
    }
}

impl ScoreCaps {
    pub fn validate(&self) -> Result<(), String> {
        if !is_positive(self.activity_cap) {
            return Err(format!("activity_cap must be positive: {}", self.activity_cap));
        }
        if !is_positive(self.follower_log_ceiling) {
            return Err(format!(
                "follower_log_ceiling must be positive: {}",
                self.follower_log_ceiling
            ));
        }
        if !is_positive(self.target_posts_per_week) {
            return Err(format!(
                "target_posts_per_week must be positive: {}",
                self.target_posts_per_week
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SubScorer {
    caps: ScoreCaps,
}

impl SubScorer {
    pub fn new(caps: ScoreCaps) -> Self {
        Self { caps }
    }

    pub fn breakdown(&self, profile: &Profile) -> Breakdown {
        Breakdown {
            activity_score: self.activity(profile),
            follower_score: self.follower(profile),
            cast_frequency_score: self.frequency(profile),
            completeness_score: self.completeness(profile),
        }
    }

    pub fn activity(&self, profile: &Profile) -> f64 {
        cap(engagement(profile) / self.caps.activity_cap * 100.0)
    }

    /// Logarithmic so that mega-accounts do not dominate: 10k followers already
    /// earns the full score under default caps.
    pub fn follower(&self, profile: &Profile) -> f64 {
        let followers = profile.follower_count.max(1) as f64;
        cap(followers.log10() / self.caps.follower_log_ceiling * 100.0)
    }

    pub fn frequency(&self, profile: &Profile) -> f64 {
        cap(profile.posts_per_week / self.caps.target_posts_per_week * 100.0)
    }

    pub fn completeness(&self, profile: &Profile) -> f64 {
        let mut score = 0.0;
        if profile.bio.chars().count() > self.caps.bio_min_chars {
            score += BIO_POINTS;
        }
        if !profile.avatar_ref.is_empty() {
            score += AVATAR_POINTS;
        }
        if !profile.display_name.is_empty() {
            score += DISPLAY_NAME_POINTS;
        }
        if profile.verified {
            score += VERIFIED_POINTS;
        }
        score
    }
}

impl Default for SubScorer {
    fn default() -> Self {
        Self::new(ScoreCaps::default())
    }
}

/// Likes plus replies, with replies counted twice as the stronger signal.
pub fn engagement(profile: &Profile) -> f64 {
    profile.recent_likes as f64 + 2.0 * profile.recent_replies as f64
}

/// Engagement per post as a percentage. The post count is floored at 1.
pub fn engagement_rate(profile: &Profile) -> f64 {
    engagement(profile) / profile.post_count.max(1) as f64 * 100.0
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn cap(value: f64) -> f64 {
    value.min(MAX_SUB_SCORE)
}
