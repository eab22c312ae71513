use clap::Parser;
use fantasy_tracker::cli::Cli;
use fantasy_tracker::config::LoggingConfig;
use fantasy_tracker::logging::initialize_logging;
use fantasy_tracker::{Pipeline, RunSummary, TrackerConfig};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            // No usable logging section yet; report through the defaults.
            let defaults = LoggingConfig::default();
            let level = cli.log_level.as_deref().unwrap_or(&defaults.level);
            initialize_logging(level, &defaults.format)?;
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    initialize_logging(&config.logging.level, &config.logging.format)?;
    info!("Starting fantasy tracker v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli, config).await {
        Ok(summary) => {
            print_summary(&summary, cli.top);
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

async fn run(cli: &Cli, config: TrackerConfig) -> fantasy_tracker::Result<RunSummary> {
    let pipeline = Pipeline::new(config)?;
    pipeline.run(cli.now()).await
}

fn print_summary(summary: &RunSummary, top: usize) {
    info!(
        "Wrote {} players for {} ({} placeholder rows skipped)",
        summary.player_count(),
        summary.dates.today_key(),
        summary.skipped_sentinels
    );
    info!("Snapshot: {}", summary.snapshot_path.display());
    info!("Delta report: {}", summary.delta_path.display());
    if let Some(path) = &summary.standings_path {
        info!("Standings: {}", path.display());
    }

    if top == 0 || summary.snapshot.is_empty() {
        return;
    }

    println!("\nTop {} players by fantasy points ({}):", top, summary.dates.today_key());
    println!("{:<4} {:<26} {:<16} {:>6} {:>6} {:>6}", "Rank", "Name", "Team", "GP", "FP", "FPG");
    println!("{}", "-".repeat(70));

    for player in summary.snapshot.top_players(top) {
        let fpg = player.fpg.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:<26} {:<16} {:>6} {:>6} {:>6}",
            player.rank.unwrap_or(0),
            player.name,
            player.team,
            player.games,
            player.fantasy_points,
            fpg
        );
    }
}
