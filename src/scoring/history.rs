use rand::Rng;

use crate::HistoryPoint;

pub const HISTORY_DAYS: usize = 7;
/// Jitter is drawn from `[-JITTER_SPAN, JITTER_SPAN)`.
pub const JITTER_SPAN: f64 = 5.0;

/// Sparkline series around the current score. Display only: nothing reads these
/// values back into scoring.
pub fn build_history<R: Rng>(total_score: u32, rng: &mut R) -> Vec<HistoryPoint> {
    let base = total_score as f64;
    (0..HISTORY_DAYS)
        .map(|idx| {
            let jitter = rng.gen_range(-JITTER_SPAN..JITTER_SPAN);
            HistoryPoint {
                label: format!("Day {}", idx + 1),
                value: (base + jitter).clamp(0.0, 100.0),
            }
        })
        .collect()
}
