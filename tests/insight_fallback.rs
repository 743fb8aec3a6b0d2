use std::time::Duration;

use influence_rank::insight::{
    analysis_prompt, analyze_profile, compare_insight, parse_analysis, ChatClient, InsightError,
    ProfileAnalysis, TextGenerator, COMPARISON_EMPTY, COMPARISON_FAILED, COMPARISON_NO_KEY,
    DEFAULT_TIPS, FALLBACK_SUMMARY, FALLBACK_TIPS,
};
use influence_rank::provider::SeededProvider;
use influence_rank::{rank_seeded, Profile, RankResult};

const TIMEOUT: Duration = Duration::from_millis(200);

struct StaticGenerator(&'static str);

impl TextGenerator for StaticGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, InsightError> {
        Ok(self.0.to_string())
    }
}

struct BrokenGenerator;

impl TextGenerator for BrokenGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, InsightError> {
        Err(InsightError::Api("503 Service Unavailable".to_string()))
    }
}

struct SlowGenerator;

impl TextGenerator for SlowGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, InsightError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(r#"{"summary": "too late", "tips": ["a", "b", "c"]}"#.to_string())
    }
}

fn ranked(id: u64) -> (Profile, RankResult) {
    let profile = SeededProvider::default().profile_for(id);
    let rank = rank_seeded(&profile, id);
    (profile, rank)
}

fn assert_fallback(analysis: &ProfileAnalysis) {
    assert_eq!(analysis.summary, FALLBACK_SUMMARY);
    assert_eq!(analysis.tips, FALLBACK_TIPS.to_vec());
}

#[tokio::test]
async fn missing_generator_yields_fallback_analysis() {
    let (profile, rank) = ranked(2);

    let analysis = analyze_profile(None::<&ChatClient>, &profile, &rank, TIMEOUT).await;

    assert_fallback(&analysis);
}

#[tokio::test]
async fn failing_generator_yields_fallback_analysis() {
    let (profile, rank) = ranked(3);

    let analysis = analyze_profile(Some(&BrokenGenerator), &profile, &rank, TIMEOUT).await;

    assert_fallback(&analysis);
}

#[tokio::test]
async fn slow_generator_times_out_to_fallback() {
    let (profile, rank) = ranked(4);

    let analysis =
        analyze_profile(Some(&SlowGenerator), &profile, &rank, Duration::from_millis(20)).await;

    assert_fallback(&analysis);
}

#[tokio::test]
async fn non_json_answer_yields_fallback_analysis() {
    let (profile, rank) = ranked(5);
    let generator = StaticGenerator("I'd rather not say.");

    let analysis = analyze_profile(Some(&generator), &profile, &rank, TIMEOUT).await;

    assert_fallback(&analysis);
}

#[tokio::test]
async fn generator_answer_is_parsed() {
    let (profile, rank) = ranked(6);
    let generator = StaticGenerator(
        "```json\n{\"summary\": \" A steady builder. \", \"tips\": [\"Cast daily\", \"Reply more\", \"Add a bio\", \"Extra\"]}\n```",
    );

    let analysis = analyze_profile(Some(&generator), &profile, &rank, TIMEOUT).await;

    assert_eq!(analysis.summary, "A steady builder.");
    assert_eq!(analysis.tips, vec!["Cast daily", "Reply more", "Add a bio"]);
}

#[test]
fn partial_answer_is_filled_in() {
    let analysis = parse_analysis(r#"{"tips": ["Only one", "  "]}"#, 57).expect("parse");

    assert_eq!(analysis.summary, "A Farcaster explorer with 57 potential points!");
    assert_eq!(analysis.tips.len(), 3);
    assert_eq!(analysis.tips[0], "Only one");
    assert_eq!(analysis.tips[1], DEFAULT_TIPS[0]);
    assert_eq!(analysis.tips[2], DEFAULT_TIPS[1]);

    let no_tips = parse_analysis(r#"{"summary": "Hello"}"#, 10).expect("parse");
    assert_eq!(no_tips.summary, "Hello");
    assert_eq!(no_tips.tips, DEFAULT_TIPS.to_vec());
}

#[test]
fn unparseable_answer_is_an_error() {
    assert!(matches!(
        parse_analysis("no braces here", 10),
        Err(InsightError::Parse(_))
    ));
    assert!(matches!(
        parse_analysis("{ not json }", 10),
        Err(InsightError::Parse(_))
    ));
}

#[test]
fn prompt_references_stable_sub_score_names() {
    let (profile, rank) = ranked(7);

    let prompt = analysis_prompt(&profile, &rank);

    assert!(prompt.contains(&format!("@{}", profile.handle)));
    assert!(prompt.contains(&format!("{}/100", rank.total_score())));
    for key in ["activityScore", "followerScore", "castFrequencyScore"] {
        assert!(prompt.contains(key), "prompt missing {}", key);
    }
}

#[tokio::test]
async fn comparison_insight_falls_back_per_failure_kind() {
    let (left_profile, left_rank) = ranked(2);
    let (right_profile, right_rank) = ranked(3);
    let left = (&left_profile, &left_rank);
    let right = (&right_profile, &right_rank);

    let missing = compare_insight(None::<&ChatClient>, left, right, TIMEOUT).await;
    assert_eq!(missing, COMPARISON_NO_KEY);

    let failed = compare_insight(Some(&BrokenGenerator), left, right, TIMEOUT).await;
    assert_eq!(failed, COMPARISON_FAILED);

    let empty = compare_insight(Some(&StaticGenerator("   ")), left, right, TIMEOUT).await;
    assert_eq!(empty, COMPARISON_EMPTY);

    let answered = compare_insight(
        Some(&StaticGenerator(" User A leads on engagement. User B has the reach. ")),
        left,
        right,
        TIMEOUT,
    )
    .await;
    assert_eq!(answered, "User A leads on engagement. User B has the reach.");
}
