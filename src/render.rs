use influence_rank::compare::Winner;
use influence_rank::{format_float, format_number, HistoryPoint, Tier};

use crate::api::{ApiCompareResponse, ApiLeaderboardResponse, ApiRankResponse};

const RESET: &str = "\x1b[0m";
const SPARK_BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn print_rank_card(response: &ApiRankResponse) {
    let profile = &response.profile;
    let score = &response.rank.score;
    let tier = score.tier;

    println!(
        "{} (@{})  #{}",
        display_name(&profile.display_name, &profile.handle),
        profile.handle,
        profile.id
    );
    if !profile.bio.is_empty() {
        println!("  {}", profile.bio);
    }
    println!(
        "Influence rank: {}{}{} / 100  Tier {} ({})",
        tier.ansi(),
        score.total_score,
        RESET,
        colored(tier, tier.letter()),
        tier.label()
    );
    println!(
        "Followers {} | Following {} | Casts {} | Verified {}",
        format_number(profile.follower_count as f64),
        format_number(profile.following_count as f64),
        format_number(profile.post_count as f64),
        if profile.verified { "yes" } else { "no" }
    );
    println!(
        "Breakdown: activity {} | followers {} | frequency {} | profile {}",
        format_float(score.breakdown.activity_score, 0),
        format_float(score.breakdown.follower_score, 0),
        format_float(score.breakdown.cast_frequency_score, 0),
        format_float(score.breakdown.completeness_score, 0)
    );
    println!(
        "Engagement rate: {}%  Growth: {}",
        format_float(score.raw_metrics.engagement_rate, 1),
        score
            .raw_metrics
            .growth_rate
            .map(|rate| format!("{}%", format_float(rate, 1)))
            .unwrap_or_else(|| "n/a".to_string())
    );
    println!("Last 7 days: {}", sparkline(&response.rank.history));

    if let Some(analysis) = &response.analysis {
        println!("\n\"{}\"", analysis.summary);
        for tip in &analysis.tips {
            println!("- {}", tip);
        }
    }
}

pub fn print_comparison(response: &ApiCompareResponse) {
    print_rank_card(&response.left);
    println!();
    print_rank_card(&response.right);
    println!();

    match response.winner {
        Winner::Left => println!("WINNER: @{}", response.left.profile.handle),
        Winner::Right => println!("WINNER: @{}", response.right.profile.handle),
        Winner::Tie => println!("It's a tie."),
    }
    if let Some(insight) = &response.insight {
        println!("\"{}\"", insight);
    }
}

pub fn print_leaderboard(response: &ApiLeaderboardResponse) {
    println!("{:>4}  {:<16} {:>5}  TIER", "RANK", "HANDLE", "SCORE");
    for entry in &response.entries {
        println!(
            "{:>4}  {:<16} {:>5}  {}",
            entry.rank,
            format!("@{}", entry.handle),
            entry.score,
            colored(entry.tier, entry.tier.label())
        );
    }
    println!("Top {} shown.", response.entries.len());
}

fn sparkline(history: &[HistoryPoint]) -> String {
    let last = (SPARK_BLOCKS.len() - 1) as f64;
    history
        .iter()
        .map(|point| {
            let idx = (point.value.clamp(0.0, 100.0) / 100.0 * last).round() as usize;
            SPARK_BLOCKS[idx.min(SPARK_BLOCKS.len() - 1)]
        })
        .collect()
}

fn colored(tier: Tier, text: &str) -> String {
    format!("{}{}{}", tier.ansi(), text, RESET)
}

fn display_name<'a>(name: &'a str, handle: &'a str) -> &'a str {
    if name.trim().is_empty() {
        handle
    } else {
        name
    }
}
