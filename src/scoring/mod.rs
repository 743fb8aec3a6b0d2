pub mod components;
pub mod engine;
pub mod history;
pub mod tier;
pub mod weighted;

pub use components::{ScoreCaps, SubScorer};
pub use engine::{rank, rank_seeded, rank_with_rng, score, score_with_config};
pub use history::{build_history, HISTORY_DAYS, JITTER_SPAN};
pub use tier::Tier;
pub use weighted::{ScoreWeights, WeightedScorer};
