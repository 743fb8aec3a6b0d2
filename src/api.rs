use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use influence_rank::compare::{compare_profiles, RankedProfile, Winner};
use influence_rank::config::RankConfig;
use influence_rank::insight::{analyze_profile, compare_insight, ChatClient, ProfileAnalysis};
use influence_rank::leaderboard::{build_leaderboard, LeaderboardEntry};
use influence_rank::provider::{parse_profile_id, ProfileProvider, ProviderError, SeededProvider};
use influence_rank::{Profile, RankResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

/// Appended to fetch failures shown to a person.
pub const FETCH_RETRY_HINT: &str = "Try id 2 or 3.";

#[derive(Debug, Deserialize)]
pub struct RankQuery {
    pub ai: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub left: String,
    pub right: String,
    pub ai: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRankResponse {
    pub profile: Profile,
    pub rank: RankResult,
    pub tier_label: String,
    pub tier_color: String,
    pub analysis: Option<ProfileAnalysis>,
}

impl ApiRankResponse {
    pub fn from_ranked(ranked: RankedProfile, analysis: Option<ProfileAnalysis>) -> Self {
        let tier = ranked.rank.tier();
        Self {
            profile: ranked.profile,
            rank: ranked.rank,
            tier_label: tier.label().to_string(),
            tier_color: tier.color().to_string(),
            analysis,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiCompareResponse {
    pub left: ApiRankResponse,
    pub right: ApiRankResponse,
    pub winner: Winner,
    pub insight: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiLeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug)]
pub struct ApiError(pub ProviderError);

impl From<ProviderError> for ApiError {
    fn from(value: ProviderError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ProviderError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ProviderError::FetchFailed(_) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

pub async fn rank_profile(
    provider: &SeededProvider,
    insight: Option<&ChatClient>,
    config: &RankConfig,
    raw_id: &str,
    use_ai: bool,
    seed: Option<u64>,
) -> Result<ApiRankResponse, ProviderError> {
    let id = parse_profile_id(raw_id)?;
    let profile = provider.fetch_profile(id).await?;
    let ranked = match seed {
        Some(seed) => RankedProfile::seeded(profile, &config.scoring, seed),
        None => RankedProfile::new(profile, &config.scoring),
    };
    info!(
        profile_id = id,
        total_score = ranked.rank.total_score(),
        tier = %ranked.rank.tier(),
        "ranked profile"
    );

    let analysis = if use_ai {
        let timeout = config.insight.timeout();
        Some(analyze_profile(insight, &ranked.profile, &ranked.rank, timeout).await)
    } else {
        None
    };
    Ok(ApiRankResponse::from_ranked(ranked, analysis))
}

pub async fn compare(
    provider: &SeededProvider,
    insight: Option<&ChatClient>,
    config: &RankConfig,
    raw_left: &str,
    raw_right: &str,
    use_ai: bool,
) -> Result<ApiCompareResponse, ProviderError> {
    let left_id = parse_profile_id(raw_left)?;
    let right_id = parse_profile_id(raw_right)?;
    let comparison = compare_profiles(provider, left_id, right_id, &config.scoring).await?;
    info!(left_id, right_id, winner = ?comparison.winner, "compared profiles");

    let insight = if use_ai {
        Some(
            compare_insight(
                insight,
                (&comparison.left.profile, &comparison.left.rank),
                (&comparison.right.profile, &comparison.right.rank),
                config.insight.timeout(),
            )
            .await,
        )
    } else {
        None
    };

    Ok(ApiCompareResponse {
        left: ApiRankResponse::from_ranked(comparison.left, None),
        right: ApiRankResponse::from_ranked(comparison.right, None),
        winner: comparison.winner,
        insight,
    })
}

pub fn leaderboard(provider: &SeededProvider, config: &RankConfig) -> ApiLeaderboardResponse {
    let candidates = provider.leaderboard(config.leaderboard.size);
    ApiLeaderboardResponse {
        entries: build_leaderboard(candidates),
    }
}

/// Scores a caller-supplied snapshot after rejecting values the engine cannot score.
pub fn score_profile(config: &RankConfig, profile: Profile) -> Result<RankResult, ProviderError> {
    profile.validate()?;
    Ok(RankedProfile::new(profile, &config.scoring).rank)
}

pub fn fetch_failure_message(err: &ProviderError) -> String {
    format!("could not fetch profile: {}. {}", err, FETCH_RETRY_HINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn error_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_profile() -> Profile {
        Profile {
            id: 3,
            display_name: "Dan".to_string(),
            handle: "dwr".to_string(),
            bio: "Working on Farcaster".to_string(),
            avatar_ref: "https://example.com/dwr.png".to_string(),
            follower_count: 5000,
            following_count: 300,
            post_count: 400,
            recent_likes: 500,
            recent_replies: 100,
            posts_per_week: 15.0,
            account_age_days: 900,
            verified: true,
        }
    }

    #[tokio::test]
    async fn invalid_input_maps_to_bad_request() {
        let response = ApiError(ProviderError::invalid("abc", "not a number")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = error_body(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("abc"));
    }

    #[tokio::test]
    async fn fetch_failure_maps_to_bad_gateway() {
        let response =
            ApiError(ProviderError::FetchFailed("upstream down".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = error_body(response).await;
        assert_eq!(body["error"], "profile fetch failed: upstream down");
    }

    #[tokio::test]
    async fn score_rejects_zero_id_and_negative_post_rate_with_bad_request() {
        let config = RankConfig::default();
        let payload = r#"{
            "id": 0,
            "followerCount": 10,
            "followingCount": 10,
            "postCount": 10,
            "recentLikes": 0,
            "recentReplies": 0,
            "postsPerWeek": -40,
            "accountAgeDays": 10,
            "verified": false
        }"#;
        let profile: Profile = serde_json::from_str(payload).unwrap();

        let err = score_profile(&config, profile).unwrap_err();
        assert!(err.is_invalid_input());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut negative_rate = valid_profile();
        negative_rate.posts_per_week = -40.0;
        assert!(score_profile(&config, negative_rate).is_err());

        let mut not_finite = valid_profile();
        not_finite.posts_per_week = f64::NAN;
        assert!(score_profile(&config, not_finite).is_err());
    }

    #[test]
    fn score_accepts_valid_profile_with_bounded_sub_scores() {
        let rank = score_profile(&RankConfig::default(), valid_profile()).unwrap();
        let breakdown = rank.score.breakdown;
        for sub_score in [
            breakdown.activity_score,
            breakdown.follower_score,
            breakdown.cast_frequency_score,
            breakdown.completeness_score,
        ] {
            assert!((0.0..=100.0).contains(&sub_score));
        }
        assert!(rank.total_score() <= 100);
    }

    #[tokio::test]
    async fn seeded_rank_repeats_history_and_rejects_bad_ids() {
        let provider = SeededProvider::default();
        let config = RankConfig::default();

        let first = rank_profile(&provider, None, &config, "3", false, Some(11))
            .await
            .unwrap();
        let second = rank_profile(&provider, None, &config, " 3 ", false, Some(11))
            .await
            .unwrap();
        assert_eq!(first.rank, second.rank);
        assert!(first.analysis.is_none());

        let err = rank_profile(&provider, None, &config, "abc", false, None)
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn fetch_failure_message_carries_retry_hint() {
        let message = fetch_failure_message(&ProviderError::FetchFailed("timeout".to_string()));
        assert!(message.starts_with("could not fetch profile: profile fetch failed: timeout"));
        assert!(message.ends_with(FETCH_RETRY_HINT));
    }
}
