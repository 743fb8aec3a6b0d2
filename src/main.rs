mod api;
mod render;
mod server;

use clap::{Args, Parser, Subcommand};
use influence_rank::config::RankConfig;
use influence_rank::insight::ChatClient;
use influence_rank::provider::SeededProvider;
use influence_rank::telemetry;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "influence-rank", about = "Social account influence rank calculator")]
struct Cli {
    /// TOML config file; defaults to $RANK_CONFIG_PATH or config/rank.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Rank(RankArgs),
    Compare(CompareArgs),
    Leaderboard(LeaderboardArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct RankArgs {
    id: String,
    #[arg(long)]
    ai: bool,
    #[arg(long)]
    json: bool,
    /// Seed for the 7-day history series.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct CompareArgs {
    left: String,
    right: String,
    #[arg(long)]
    ai: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct LeaderboardArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _) = RankConfig::load(cli.config)?;
    telemetry::init(&config.telemetry).map_err(|err| err.to_string())?;

    match resolve_command(cli.command) {
        Command::Rank(args) => run_rank(args, &config).await,
        Command::Compare(args) => run_compare(args, &config).await,
        Command::Leaderboard(args) => run_leaderboard(args, &config),
        Command::Serve(args) => server::serve(args, config).await,
    }
}

/// A bare invocation shows the leaderboard.
fn resolve_command(command: Option<Command>) -> Command {
    command.unwrap_or(Command::Leaderboard(LeaderboardArgs::default()))
}

async fn run_rank(args: RankArgs, config: &RankConfig) -> Result<(), String> {
    let provider = SeededProvider::new(config.provider.clone());
    let insight = ChatClient::from_env(&config.insight);
    let response = api::rank_profile(
        &provider,
        insight.as_ref(),
        config,
        &args.id,
        args.ai,
        args.seed,
    )
    .await
    .map_err(|err| api::fetch_failure_message(&err))?;

    if args.json {
        return print_json(&response);
    }
    render::print_rank_card(&response);
    Ok(())
}

async fn run_compare(args: CompareArgs, config: &RankConfig) -> Result<(), String> {
    let provider = SeededProvider::new(config.provider.clone());
    let insight = ChatClient::from_env(&config.insight);
    let response = api::compare(
        &provider,
        insight.as_ref(),
        config,
        &args.left,
        &args.right,
        args.ai,
    )
    .await
    .map_err(|err| {
        format!(
            "could not compare profiles: {}. {}",
            err,
            api::FETCH_RETRY_HINT
        )
    })?;

    if args.json {
        return print_json(&response);
    }
    render::print_comparison(&response);
    Ok(())
}

fn run_leaderboard(args: LeaderboardArgs, config: &RankConfig) -> Result<(), String> {
    let provider = SeededProvider::new(config.provider.clone());
    let response = api::leaderboard(&provider, config);

    if args.json {
        return print_json(&response);
    }
    render::print_leaderboard(&response);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize output: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_runs_leaderboard() {
        let cli = Cli::try_parse_from(["influence-rank"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            resolve_command(cli.command),
            Command::Leaderboard(LeaderboardArgs { json: false })
        ));
    }

    #[test]
    fn explicit_subcommand_wins_over_default() {
        let cli = Cli::try_parse_from(["influence-rank", "rank", "3", "--json", "--seed", "7"])
            .unwrap();
        match resolve_command(cli.command) {
            Command::Rank(args) => {
                assert_eq!(args.id, "3");
                assert!(args.json);
                assert_eq!(args.seed, Some(7));
            }
            _ => panic!("expected rank command"),
        }
    }
}
