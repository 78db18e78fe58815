use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod config;
mod dashboard;
mod error;
mod models;
mod report;
mod rng;
mod series;

use dashboard::Dashboard;
use models::{Environment, Selection, Team, DEFAULT_WINDOW};

#[derive(Parser)]
#[command(name = "qa-dashboard")]
#[command(about = "Mock QA metrics dashboard: bug counts, severities, pass rate and MTTR", long_about = None)]
struct Cli {
    /// Team filter (core, payments, mobile, platform)
    #[arg(long, global = true, default_value = "core")]
    team: Team,
    /// Environment filter (staging, uat, production)
    #[arg(long = "env", global = true, default_value = "staging")]
    environment: Environment,
    /// Day window (7, 14, 30, 60 or 90)
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW)]
    days: u32,
    /// Generator seed; falls back to QA_DASHBOARD_SEED
    #[arg(long, global = true, allow_negative_numbers = true)]
    seed: Option<i64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the KPI tiles
    Summary,
    /// Print the daily trend table
    Series,
    /// Print the most recent defects
    Defects {
        #[arg(long, default_value_t = aggregate::DEFAULT_DEFECT_LIMIT)]
        limit: usize,
    },
    /// Print the full markdown dashboard
    Report,
    /// Print the dashboard data as JSON
    Snapshot {
        #[arg(long)]
        pretty: bool,
    },
    /// Print the KPI tiles for every team after a refresh
    Compare,
    /// Apply filter changes in order and print the KPI tiles after each
    Explore {
        #[arg(long)]
        then_team: Option<Team>,
        #[arg(long)]
        then_env: Option<Environment>,
        #[arg(long)]
        then_days: Option<u32>,
        /// Finish with a refresh, which reseeds the generator
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(Debug, Default)]
struct FilterChanges {
    team: Option<Team>,
    environment: Option<Environment>,
    days: Option<u32>,
    refresh: bool,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Applies each change in turn against the continuing generator, rendering
/// the tiles after every step.
fn explore(dashboard: &mut Dashboard, changes: &FilterChanges) -> anyhow::Result<String> {
    let mut output = report::render_view("Initial", dashboard.snapshot());
    if let Some(team) = changes.team {
        output.push_str(&report::render_view("Team changed", dashboard.set_team(team)?));
    }
    if let Some(environment) = changes.environment {
        let snapshot = dashboard.set_environment(environment)?;
        output.push_str(&report::render_view("Environment changed", snapshot));
    }
    if let Some(days) = changes.days {
        let snapshot = dashboard
            .set_days(days)
            .with_context(|| format!("cannot switch to a {days}-day window"))?;
        output.push_str(&report::render_view("Window changed", snapshot));
    }
    if changes.refresh {
        output.push_str(&report::render_view("Refreshed", dashboard.refresh()?));
    }
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let generator = config::generator_from_env(cli.seed)?;
    let selection = Selection::new(cli.team, cli.environment, cli.days)?;
    let today = Utc::now().date_naive();
    info!(seed = generator.seed(), %today, "starting dashboard");

    let mut dashboard =
        Dashboard::new(generator, selection, today).context("failed to build dashboard data")?;

    match cli.command {
        Commands::Summary => {
            print!("{}", report::render_tiles(&dashboard.snapshot().totals));
        }
        Commands::Series => {
            print!("{}", report::render_series(&dashboard.snapshot().series));
        }
        Commands::Defects { limit } => {
            let snapshot = dashboard.set_defect_limit(limit);
            print!("{}", report::render_defects(&snapshot.defects));
        }
        Commands::Report => {
            print!("{}", report::build_report(dashboard.snapshot()));
        }
        Commands::Snapshot { pretty } => {
            let json = if pretty {
                serde_json::to_string_pretty(dashboard.snapshot())?
            } else {
                serde_json::to_string(dashboard.snapshot())?
            };
            println!("{json}");
        }
        Commands::Compare => {
            for team in Team::ALL {
                let selection = Selection::new(team, cli.environment, cli.days)?;
                let snapshot = dashboard.refresh_with(selection)?;
                println!("{team}:");
                print!("{}", report::render_tiles(&snapshot.totals));
            }
        }
        Commands::Explore {
            then_team,
            then_env,
            then_days,
            refresh,
        } => {
            let changes = FilterChanges {
                team: then_team,
                environment: then_env,
                days: then_days,
                refresh,
            };
            print!("{}", explore(&mut dashboard, &changes)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dashboard() -> Dashboard {
        let selection = Selection::new(Team::Core, Environment::Staging, 7).unwrap();
        Dashboard::new(
            rng::default_generator(),
            selection,
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn explore_applies_every_change_in_order() {
        let mut board = dashboard();
        let changes = FilterChanges {
            team: Some(Team::Mobile),
            environment: Some(Environment::Uat),
            days: Some(14),
            refresh: false,
        };

        let output = explore(&mut board, &changes).unwrap();
        let headings: Vec<&str> = output.lines().filter(|line| line.ends_with("days):")).collect();
        assert_eq!(
            headings,
            vec![
                "Initial (Core, Staging, 7 days):",
                "Team changed (Mobile, Staging, 7 days):",
                "Environment changed (Mobile, UAT, 7 days):",
                "Window changed (Mobile, UAT, 14 days):",
            ]
        );
        assert_eq!(board.snapshot().series.len(), 14);
    }

    #[test]
    fn explore_refresh_returns_to_start_up_numbers() {
        let mut board = dashboard();
        let initial = board.snapshot().clone();
        let changes = FilterChanges {
            days: Some(7),
            refresh: true,
            ..FilterChanges::default()
        };

        let output = explore(&mut board, &changes).unwrap();
        assert!(output.contains("Refreshed (Core, Staging, 7 days):"));
        assert_eq!(board.snapshot(), &initial);
    }

    #[test]
    fn explore_rejects_unsupported_window() {
        let mut board = dashboard();
        let changes = FilterChanges {
            days: Some(45),
            ..FilterChanges::default()
        };

        let err = explore(&mut board, &changes).unwrap_err();
        assert!(err.to_string().contains("45-day window"));
    }
}
