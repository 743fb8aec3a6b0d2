use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::env;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::InsightConfig;
use crate::{Profile, RankResult};

pub const FALLBACK_SUMMARY: &str = "AI services are currently resting. Keep casting!";
pub const FALLBACK_TIPS: [&str; 3] = [
    "Increase your weekly cast frequency.",
    "Reply to more casts to boost engagement.",
    "Ensure your profile bio is fully fleshed out.",
];
/// Used when the generator answered but left the tips out.
pub const DEFAULT_TIPS: [&str; 3] = [
    "Post more frequently",
    "Engage with other casters",
    "Complete your bio",
];
pub const TIP_COUNT: usize = 3;

pub const COMPARISON_NO_KEY: &str = "Comparison unavailable (No API Key).";
pub const COMPARISON_FAILED: &str = "AI Comparison unavailable.";
pub const COMPARISON_EMPTY: &str = "Comparison data unavailable.";

#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("insight generator not configured: set INSIGHT_API_KEY")]
    Unavailable,
    #[error("insight request timed out after {0:?}")]
    Timeout(Duration),
    #[error("insight request failed: {0}")]
    Request(String),
    #[error("insight API error: {0}")]
    Api(String),
    #[error("insight response parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub summary: String,
    pub tips: Vec<String>,
}

impl ProfileAnalysis {
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            tips: FALLBACK_TIPS.iter().map(|tip| tip.to_string()).collect(),
        }
    }
}

/// Prompt in, natural-language text out.
pub trait TextGenerator {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, InsightError>> + Send;
}

/// OpenAI-compatible chat completions client.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f64,
}

impl ChatClient {
    /// `None` when `INSIGHT_API_KEY` is missing: callers then fall back.
    pub fn from_env(config: &InsightConfig) -> Option<Self> {
        let api_key = env::var("INSIGHT_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())?;
        Some(Self::new(api_key, config))
    }

    pub fn new(api_key: String, config: &InsightConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

impl TextGenerator for ChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, InsightError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| InsightError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let detail = error_body.trim();
            if detail.is_empty() {
                return Err(InsightError::Api(status.to_string()));
            }
            return Err(InsightError::Api(format!("{} {}", status, detail)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| InsightError::Parse(err.to_string()))?;

        let content = body
            .choices
            .first()
            .ok_or_else(|| InsightError::Parse("response missing choices".to_string()))?
            .message
            .content
            .trim()
            .to_string();
        debug!(model = %self.model, chars = content.len(), "insight completion received");
        Ok(content)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    tips: Option<Vec<String>>,
}

/// Summary and three tips for a ranked profile. Never fails: any problem with
/// the generator yields [`ProfileAnalysis::fallback`].
pub async fn analyze_profile<G: TextGenerator + Sync>(
    generator: Option<&G>,
    profile: &Profile,
    rank: &RankResult,
    timeout: Duration,
) -> ProfileAnalysis {
    match request_analysis(generator, profile, rank, timeout).await {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!(
                profile_id = profile.id,
                error = %err,
                "profile analysis unavailable, using fallback"
            );
            ProfileAnalysis::fallback()
        }
    }
}

async fn request_analysis<G: TextGenerator + Sync>(
    generator: Option<&G>,
    profile: &Profile,
    rank: &RankResult,
    timeout: Duration,
) -> Result<ProfileAnalysis, InsightError> {
    let generator = generator.ok_or(InsightError::Unavailable)?;
    let prompt = analysis_prompt(profile, rank);
    let text = complete_with_timeout(generator, &prompt, timeout).await?;
    parse_analysis(&text, rank.total_score())
}

/// Two-sentence head-to-head. Returns a fixed message instead of failing.
pub async fn compare_insight<G: TextGenerator + Sync>(
    generator: Option<&G>,
    left: (&Profile, &RankResult),
    right: (&Profile, &RankResult),
    timeout: Duration,
) -> String {
    let Some(generator) = generator else {
        return COMPARISON_NO_KEY.to_string();
    };

    let prompt = comparison_prompt(left, right);
    match complete_with_timeout(generator, &prompt, timeout).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => COMPARISON_EMPTY.to_string(),
        Err(err) => {
            warn!(
                left_id = left.0.id,
                right_id = right.0.id,
                error = %err,
                "comparison insight unavailable"
            );
            COMPARISON_FAILED.to_string()
        }
    }
}

async fn complete_with_timeout<G: TextGenerator + Sync>(
    generator: &G,
    prompt: &str,
    timeout: Duration,
) -> Result<String, InsightError> {
    tokio::time::timeout(timeout, generator.complete(prompt))
        .await
        .map_err(|_| InsightError::Timeout(timeout))?
}

pub fn analysis_prompt(profile: &Profile, rank: &RankResult) -> String {
    let breakdown = &rank.score.breakdown;
    format!(
        r#"You are an expert social media analyst for Farcaster (a decentralized social network).
Analyze the following user profile and their calculated rank score.

User: {display_name} (@{handle})
Bio: "{bio}"
Followers: {followers}
Total Casts: {posts}

Calculated Rank: {total}/100 (Tier: {tier})
Strengths:
- activityScore: {activity:.0}/100
- followerScore: {follower:.0}/100
- castFrequencyScore: {frequency:.0}/100

Task:
1. Write a 1-sentence punchy, friendly personality summary based on their stats and bio.
2. Provide 3 specific, actionable short tips to improve their rank score (focus on the lowest sub-scores).

Output JSON only, in this format:
{{"summary": "string", "tips": ["tip1", "tip2", "tip3"]}}
"#,
        display_name = profile.display_name,
        handle = profile.handle,
        bio = profile.bio,
        followers = profile.follower_count,
        posts = profile.post_count,
        total = rank.total_score(),
        tier = rank.tier(),
        activity = breakdown.activity_score,
        follower = breakdown.follower_score,
        frequency = breakdown.cast_frequency_score,
    )
}

fn comparison_prompt(left: (&Profile, &RankResult), right: (&Profile, &RankResult)) -> String {
    format!(
        r#"Compare two Farcaster users briefly in 2 sentences.
User A: @{} (Rank: {}, Tier: {})
User B: @{} (Rank: {}, Tier: {})

Be competitive but friendly. Who is winning and why?"#,
        left.0.handle,
        left.1.total_score(),
        left.1.tier(),
        right.0.handle,
        right.1.total_score(),
        right.1.tier(),
    )
}

/// Reads the first JSON object out of a completion. A missing summary or tip
/// list is filled in; tips are always trimmed to exactly three.
pub fn parse_analysis(text: &str, total_score: u32) -> Result<ProfileAnalysis, InsightError> {
    let json = extract_json(text)
        .ok_or_else(|| InsightError::Parse("response missing JSON".to_string()))?;
    let raw: RawAnalysis =
        serde_json::from_str(json).map_err(|err| InsightError::Parse(err.to_string()))?;

    let summary = raw
        .summary
        .map(|summary| summary.trim().to_string())
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| format!("A Farcaster explorer with {} potential points!", total_score));

    let tips = match raw.tips {
        Some(tips) => normalize_tips(tips),
        None => DEFAULT_TIPS.iter().map(|tip| tip.to_string()).collect(),
    };

    Ok(ProfileAnalysis { summary, tips })
}

fn normalize_tips(tips: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = tips
        .into_iter()
        .map(|tip| tip.trim().to_string())
        .filter(|tip| !tip.is_empty())
        .take(TIP_COUNT)
        .collect();

    for tip in DEFAULT_TIPS {
        if normalized.len() >= TIP_COUNT {
            break;
        }
        if !normalized.iter().any(|existing| existing == tip) {
            normalized.push(tip.to_string());
        }
    }
    normalized
}

fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(&text[start..=end])
}
