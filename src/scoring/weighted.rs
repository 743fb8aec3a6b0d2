use serde::{Deserialize, Serialize};

use crate::Breakdown;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub activity: f64,
    pub follower: f64,
    pub frequency: f64,
    pub completeness: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            activity: 0.4,
            follower: 0.3,
            frequency: 0.2,
            completeness: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Weights must be non-negative and sum to 1 so the composite stays on the
    /// same 0..=100 scale as the sub-scores.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("activity", self.activity),
            ("follower", self.follower),
            ("frequency", self.frequency),
            ("completeness", self.completeness),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("weight '{}' must be non-negative: {}", name, value));
            }
        }
        let sum: f64 = weights.iter().map(|(_, value)| value).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("weights must sum to 1.0, got {}", sum));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: ScoreWeights,
}

impl WeightedScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn raw_score(&self, breakdown: &Breakdown) -> f64 {
        let mut score = 0.0;

        score += breakdown.activity_score * self.weights.activity;
        score += breakdown.follower_score * self.weights.follower;
        score += breakdown.cast_frequency_score * self.weights.frequency;
        score += breakdown.completeness_score * self.weights.completeness;

        score
    }

    /// Rounded half-up. Inputs are non-negative so `f64::round` (half away from
    /// zero) is equivalent.
    pub fn total_score(&self, breakdown: &Breakdown) -> u32 {
        self.raw_score(breakdown).round().clamp(0.0, 100.0) as u32
    }
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}
