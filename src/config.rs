use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::scoring::{ScoreCaps, ScoreWeights};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub caps: ScoreCaps,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;
        self.caps.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub avatar_base: String,
    /// Artificial delay before a seeded profile is returned, to mimic a hub lookup.
    pub latency_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            avatar_base: "https://picsum.photos/seed".to_string(),
            latency_ms: 0,
        }
    }
}

impl ProviderConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Largest leaderboard the seeded provider will build.
pub const MAX_LEADERBOARD_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub size: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { size: 10 }
    }
}

impl LeaderboardConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.size > MAX_LEADERBOARD_SIZE {
            return Err(format!(
                "leaderboard size must be at most {}: {}",
                MAX_LEADERBOARD_SIZE, self.size
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_ms: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            timeout_ms: 8000,
        }
    }
}

impl InsightConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    pub scoring: ScoringConfig,
    pub provider: ProviderConfig,
    pub leaderboard: LeaderboardConfig,
    pub insight: InsightConfig,
    pub telemetry: TelemetryConfig,
}

impl RankConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                Self::from_toml_str(&contents)?
            } else {
                RankConfig::default()
            }
        } else {
            RankConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: RankConfig =
            toml::from_str(contents).map_err(|err| format!("failed to parse config: {}", err))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scoring
            .validate()
            .map_err(|err| format!("invalid scoring config: {}", err))?;
        self.leaderboard
            .validate()
            .map_err(|err| format!("invalid leaderboard config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("RANK_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.telemetry.log_level = level;
            }
        }
        if let Ok(timeout) = env::var("INSIGHT_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.insight.timeout_ms = value;
            }
        }
        if let Ok(api_base) = env::var("INSIGHT_API_BASE") {
            if !api_base.trim().is_empty() {
                self.insight.api_base = api_base;
            }
        }
        if let Ok(model) = env::var("INSIGHT_MODEL") {
            if !model.trim().is_empty() {
                self.insight.model = model;
            }
        }
        if let Ok(latency) = env::var("PROVIDER_LATENCY_MS") {
            if let Ok(value) = latency.parse::<u64>() {
                self.provider.latency_ms = value;
            }
        }
        if let Ok(size) = env::var("LEADERBOARD_SIZE") {
            if let Ok(value) = size.parse::<usize>() {
                self.leaderboard.size = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("RANK_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/rank.toml")))
}
