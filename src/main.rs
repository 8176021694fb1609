use anyhow::bail;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use standx_estimator::{
    accrual::AccrualEngine,
    config::Settings,
    network::{GlobalPointsEstimator, PointsEstimate, RankApiClient},
    projection::ProjectionEngine,
    utils::{format_fdv, format_points, format_signed_pct, format_usd, format_usd_compact},
};

mod tui_main;

#[derive(Parser)]
#[clap(name = "standx-estimator")]
#[clap(about = "Estimate speculative StandX airdrop returns", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ScenarioArgs {
    /// Capital in DUSD
    #[clap(short, long, default_value = "10000")]
    capital: f64,

    /// Duration in days
    #[clap(short, long, default_value = "30")]
    days: u32,

    /// Count the daily activity task bonus
    #[clap(long)]
    active_bonus: bool,

    /// Assumed fully-diluted valuation in USD
    #[clap(long, default_value = "1000000000")]
    fdv: f64,

    /// Airdrop share of total supply, in percent
    #[clap(long, default_value = "5.0")]
    airdrop_pct: f64,

    /// Skip the ranking fetch and use the fallback estimate
    #[clap(long)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary metrics for one scenario
    Estimate {
        #[clap(flatten)]
        scenario: ScenarioArgs,

        /// Emit the result as JSON
        #[clap(long)]
        json: bool,
    },

    /// Print the full daily points schedule
    Breakdown {
        #[clap(flatten)]
        scenario: ScenarioArgs,
    },

    /// Print the FDV x duration net-profit grid
    Sensitivity {
        #[clap(flatten)]
        scenario: ScenarioArgs,
    },

    /// Launch interactive TUI
    Tui {
        /// Skip the ranking fetch and use the fallback estimate
        #[clap(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI installs its own silenced subscriber.
    if !matches!(cli.command, Commands::Tui { .. }) {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let settings = Settings::new().unwrap_or_else(|_| {
        info!("Using default settings");
        Settings::default()
    });

    if let Err(e) = settings.validate() {
        bail!("Invalid settings: {}", e);
    }

    match cli.command {
        Commands::Estimate { scenario, json } => {
            validate_scenario(&scenario, &settings)?;
            let estimate = resolve_estimate(&settings, scenario.offline).await?;
            run_estimate(&settings, &scenario, estimate, json);
        }

        Commands::Breakdown { scenario } => {
            validate_scenario(&scenario, &settings)?;
            let estimate = resolve_estimate(&settings, scenario.offline).await?;
            run_breakdown(&settings, &scenario, estimate);
        }

        Commands::Sensitivity { scenario } => {
            validate_scenario(&scenario, &settings)?;
            let estimate = resolve_estimate(&settings, scenario.offline).await?;
            run_sensitivity(&settings, &scenario, estimate);
        }

        Commands::Tui { offline } => {
            tui_main::run_tui(settings, offline).await?;
        }
    }

    Ok(())
}

fn validate_scenario(scenario: &ScenarioArgs, settings: &Settings) -> anyhow::Result<()> {
    let b = &settings.inputs;

    if !(b.min_capital..=b.max_capital).contains(&scenario.capital) {
        bail!(
            "Capital must be between {} and {} DUSD",
            b.min_capital,
            b.max_capital
        );
    }
    if !(b.min_days..=b.max_days).contains(&scenario.days) {
        bail!("Duration must be between {} and {} days", b.min_days, b.max_days);
    }
    if scenario.fdv <= 0.0 {
        bail!("FDV must be positive");
    }
    if !(b.min_airdrop_pct..=b.max_airdrop_pct).contains(&scenario.airdrop_pct) {
        bail!(
            "Airdrop percentage must be between {} and {}",
            b.min_airdrop_pct,
            b.max_airdrop_pct
        );
    }

    Ok(())
}

async fn resolve_estimate(
    settings: &Settings,
    offline: bool,
) -> anyhow::Result<PointsEstimate> {
    if offline {
        info!("Offline mode, using fallback network estimate");
        return Ok(PointsEstimate::fallback(settings.api.fallback_global_points));
    }

    let client = RankApiClient::new(settings.api.clone())?;
    let estimator = GlobalPointsEstimator::new(
        Arc::new(client),
        Duration::from_secs(settings.api.cache_ttl_seconds),
        settings.api.fallback_global_points,
    );
    Ok(estimator.current_estimate().await)
}

fn run_estimate(
    settings: &Settings,
    scenario: &ScenarioArgs,
    estimate: PointsEstimate,
    json_output: bool,
) {
    let accrual_engine = AccrualEngine::new(settings.campaign.clone());
    let projection_engine = ProjectionEngine::new(settings.projection.growth.clone());
    let start_date = Utc::now().date_naive();

    let accrual = accrual_engine.schedule(
        scenario.capital,
        scenario.days,
        scenario.active_bonus,
        start_date,
    );
    let metrics = projection_engine.project(
        accrual.total_points,
        scenario.days,
        scenario.capital,
        scenario.fdv,
        scenario.airdrop_pct,
        estimate.value,
    );

    if json_output {
        let output = json!({
            "capital": scenario.capital,
            "duration_days": scenario.days,
            "active_bonus": scenario.active_bonus,
            "fdv": scenario.fdv,
            "airdrop_pct": scenario.airdrop_pct,
            "start_date": start_date,
            "network_estimate": estimate.value,
            "network_estimate_source": estimate.source.as_str(),
            "total_points": accrual.total_points,
            "metrics": metrics,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to serialize result: {}", e),
        }
        return;
    }

    println!("\n=== StandX Yield Estimate ===");
    println!(
        "Scenario: {} DUSD for {} days, daily task {}",
        format_points(scenario.capital),
        scenario.days,
        if scenario.active_bonus { "on" } else { "off" }
    );
    println!(
        "Network points now: {} ({})",
        format_points(estimate.value),
        estimate.source.as_str()
    );
    println!();
    println!("Total points:      {}", format_points(accrual.total_points));
    println!("Share of network:  {:.4}%", metrics.share_pct);
    println!(
        "Projected network: {}",
        format_points(metrics.projected_global)
    );
    println!();
    println!(
        "Airdrop value:     {}  (FDV {}, {}% airdrop)",
        format_usd(metrics.est_value),
        format_fdv(scenario.fdv),
        scenario.airdrop_pct
    );
    println!(
        "Net profit:        {}  (principal recoverable)",
        format_usd(metrics.net_profit)
    );
    println!("ROI:               {}", format_signed_pct(metrics.roi_pct));
    println!("APY:               {}", format_signed_pct(metrics.apy_pct));
}

fn run_breakdown(settings: &Settings, scenario: &ScenarioArgs, estimate: PointsEstimate) {
    let accrual_engine = AccrualEngine::new(settings.campaign.clone());
    let projection_engine = ProjectionEngine::new(settings.projection.growth.clone());
    let start_date = Utc::now().date_naive();

    let accrual = accrual_engine.schedule(
        scenario.capital,
        scenario.days,
        scenario.active_bonus,
        start_date,
    );
    let metrics = projection_engine.project(
        accrual.total_points,
        scenario.days,
        scenario.capital,
        scenario.fdv,
        scenario.airdrop_pct,
        estimate.value,
    );

    println!("\n=== Daily Breakdown ===");
    println!(
        "{:>4}  {:<12}{:<7}{:>6}{:>16}{:>18}",
        "Day", "Date", "Period", "Rate", "Daily", "Cumulative"
    );
    for record in &accrual.schedule {
        println!(
            "{:>4}  {:<12}{:<7}{:>5.1}x{:>16}{:>18}",
            record.day,
            record.date.format("%Y-%m-%d"),
            record.period.as_str(),
            record.multiplier,
            format_points(record.daily_points),
            format_points(record.cumulative_points),
        );
    }

    println!();
    println!("Total points:      {}", format_points(accrual.total_points));
    println!("Share of network:  {:.4}%", metrics.share_pct);
    println!(
        "Projected network: {}",
        format_points(metrics.projected_global)
    );
}

fn run_sensitivity(settings: &Settings, scenario: &ScenarioArgs, estimate: PointsEstimate) {
    let accrual_engine = AccrualEngine::new(settings.campaign.clone());
    let projection_engine = ProjectionEngine::new(settings.projection.growth.clone());
    let start_date = Utc::now().date_naive();

    let sensitivity = &settings.projection.sensitivity;
    let grid = projection_engine.sensitivity(
        &accrual_engine,
        scenario.capital,
        scenario.active_bonus,
        scenario.airdrop_pct,
        estimate.value,
        &sensitivity.fdv_axis(),
        &sensitivity.duration_axis(),
        start_date,
    );

    println!("\n=== Net Profit Sensitivity (FDV x duration) ===");
    print!("{:>5}", "");
    for fdv in &grid.fdv_axis {
        print!("{:>10}", format_fdv(*fdv));
    }
    println!();

    for (i, days) in grid.duration_axis.iter().enumerate() {
        print!("{:>4}d", days);
        for value in &grid.net_profit[i] {
            print!("{:>10}", format_usd_compact(*value));
        }
        println!();
    }
}
