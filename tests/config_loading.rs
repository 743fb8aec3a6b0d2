use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use influence_rank::config::{RankConfig, MAX_LEADERBOARD_SIZE};
use influence_rank::scoring::ScoreWeights;
use influence_rank::{score_with_config, Profile};

fn temp_config_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir()
        .join(format!("influence-rank-{}-{}", name, nanos))
        .join("rank.toml")
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = RankConfig::from_toml_str(
        r#"
[leaderboard]
size = 5

[scoring.caps]
target_posts_per_week = 10.0
"#,
    )
    .expect("parse config");

    assert_eq!(config.leaderboard.size, 5);
    assert_eq!(config.scoring.weights, ScoreWeights::default());
    assert!((config.scoring.caps.activity_cap - 1000.0).abs() < 1e-6);

    let profile = Profile {
        id: 1,
        posts_per_week: 10.0,
        ..Profile::default()
    };
    let result = score_with_config(&profile, &config.scoring);
    assert!((result.breakdown.cast_frequency_score - 100.0).abs() < 1e-6);
}

#[test]
fn weights_that_do_not_sum_to_one_are_rejected() {
    let err = RankConfig::from_toml_str(
        r#"
[scoring.weights]
activity = 0.9
"#,
    )
    .expect_err("weights sum to 1.5");

    assert!(err.contains("weights must sum to 1.0"), "{}", err);
}

#[test]
fn non_positive_caps_are_rejected() {
    let err = RankConfig::from_toml_str(
        r#"
[scoring.caps]
activity_cap = 0.0
"#,
    )
    .expect_err("zero cap");

    assert!(err.contains("activity_cap"), "{}", err);
}

#[test]
fn written_config_loads_back() {
    let path = temp_config_path("roundtrip");
    let mut config = RankConfig::default();
    config.insight.model = "test-model".to_string();
    config.scoring.weights = ScoreWeights {
        activity: 0.25,
        follower: 0.25,
        frequency: 0.25,
        completeness: 0.25,
    };

    config.write(&path).expect("write config");
    let (loaded, loaded_path) = RankConfig::load(Some(path.clone())).expect("load config");

    assert_eq!(loaded_path, Some(path.clone()));
    assert_eq!(loaded.scoring, config.scoring);
    assert_eq!(loaded.insight.model, "test-model");

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn missing_config_file_uses_defaults() {
    let path = temp_config_path("missing");

    let (config, _) = RankConfig::load(Some(path)).expect("load defaults");

    assert_eq!(config.scoring, RankConfig::default().scoring);
}

#[test]
fn oversized_leaderboard_is_rejected() {
    let err = RankConfig::from_toml_str(
        r#"
[leaderboard]
size = 1000
"#,
    )
    .expect_err("size above limit");
    assert!(err.contains("leaderboard size"));

    let at_limit = format!("[leaderboard]\nsize = {}\n", MAX_LEADERBOARD_SIZE);
    let config = RankConfig::from_toml_str(&at_limit).expect("size at limit");
    assert_eq!(config.leaderboard.size, MAX_LEADERBOARD_SIZE);
}
