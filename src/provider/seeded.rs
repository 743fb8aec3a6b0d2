use tracing::debug;

use crate::config::{ProviderConfig, MAX_LEADERBOARD_SIZE};
use crate::leaderboard::LeaderboardCandidate;
use crate::provider::{ProfileProvider, ProviderError};
use crate::Profile;

const BASE_FACTOR_HORIZON: f64 = 500_000.0;
const DEFAULT_BIO: &str = "Building cool stuff on Farcaster. Explorer of the new internet.";
const LEADERBOARD_FIRST_ID: u64 = 1000;
const TOP_LEADERBOARD_SCORE: u32 = 99;

/// Offline provider that derives a stable synthetic profile from the account id.
/// Lower ids (older accounts) tend to get larger numbers.
#[derive(Debug, Clone)]
pub struct SeededProvider {
    config: ProviderConfig,
}

impl SeededProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    pub fn profile_for(&self, id: u64) -> Profile {
        let rand = |offset: u64| seeded_random(id.wrapping_add(offset) as f64);
        let base_factor = (1.0 - id as f64 / BASE_FACTOR_HORIZON).max(0.1);

        let follower_count = (rand(1) * 10_000.0 * base_factor).floor() as u64 + 50;
        let following_count = (rand(2) * 2_000.0).floor() as u64;
        let post_count = (rand(3) * 5_000.0 * base_factor).floor() as u64 + 10;
        let recent_likes = (rand(4) * 500.0).floor() as u64;
        let recent_replies = (rand(5) * 200.0).floor() as u64;
        let bio = if rand(6) > 0.1 {
            DEFAULT_BIO.to_string()
        } else {
            String::new()
        };

        Profile {
            id,
            display_name: format!("Farcaster User {}", id),
            handle: format!("user_{}", id),
            bio,
            avatar_ref: self.avatar_ref(id, 200),
            follower_count,
            following_count,
            post_count,
            recent_likes,
            recent_replies,
            posts_per_week: (rand(7) * 50.0).floor(),
            account_age_days: (rand(8) * 365.0 * 2.0).floor() as u32 + 30,
            verified: rand(9) > 0.5,
        }
    }

    /// Fixed top-N board: `legend_0` leads with 99 and each place drops by two,
/// bottoming out at 0. At most [`MAX_LEADERBOARD_SIZE`] entries are built.
    pub fn leaderboard(&self, size: usize) -> Vec<LeaderboardCandidate> {
        (0..size.min(MAX_LEADERBOARD_SIZE))
            .map(|idx| {
                let id = LEADERBOARD_FIRST_ID + idx as u64;
                let step = u32::try_from(idx).unwrap_or(u32::MAX).saturating_mul(2);
                LeaderboardCandidate {
                    id,
                    handle: format!("legend_{}", idx),
                    avatar_ref: self.avatar_ref(id, 100),
                    score: TOP_LEADERBOARD_SCORE.saturating_sub(step),
                }
            })
            .collect()
    }

    fn avatar_ref(&self, id: u64, size: u32) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.avatar_base.trim_end_matches('/'),
            id,
            size,
            size
        )
    }
}

impl Default for SeededProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl ProfileProvider for SeededProvider {
    async fn fetch_profile(&self, id: u64) -> Result<Profile, ProviderError> {
        if id == 0 {
            return Err(ProviderError::invalid("0", "id must be positive"));
        }
        let latency = self.config.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let profile = self.profile_for(id);
        debug!(
            profile_id = id,
            followers = profile.follower_count,
            "generated seeded profile"
        );
        Ok(profile)
    }
}

/// Fractional part of `sin(seed) * 10000`, in `[0, 1)`.
fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    x - x.floor()
}
