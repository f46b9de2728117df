use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mex_energy::config::{DEFAULT_INSTALLATION_COUNT, FeedConfig};
use mex_energy::geo::{self, GeoError, choropleth};
use mex_energy::model::{DataSource, Dimension, GenerationSample, Installation, Kpi, Metric};
use mex_energy::ons::{OnsClient, OnsConfig, OnsError};
use mex_energy::services::explore::{self, Direction, RoiTier, SortConfig, SortKey};
use mex_energy::services::{dataset, feed, projections};
use mex_energy::state::AppState;
use mex_energy::treemap::{self, ColorDomain, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("ons client setup failed: {0}")]
    Ons(#[from] OnsError),
    #[error("region data failed: {0}")]
    Geo(#[from] GeoError),
    #[error("cannot read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mex-energy", about = "MEX Energy DAO data engine")]
struct Cli {
    /// Fixed RNG seed for reproducible output.
    #[arg(long, global = true, env = "MEX_SEED")]
    seed: Option<u64>,

    /// Target number of synthetic installations.
    #[arg(long, global = true, env = "MEX_INSTALLATION_COUNT", default_value_t = DEFAULT_INSTALLATION_COUNT)]
    count: usize,

    #[arg(long, global = true, value_enum, default_value_t = DataSource::Dao)]
    source: DataSource,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full dashboard data set for the selected source.
    Dashboard,
    /// Searchable, sorted installation table.
    Installations(InstallationsCommand),
    /// Annual adoption projections 2023–2033.
    Projections,
    /// Installations binned into neighbourhood polygons.
    Choropleth(ChoroplethCommand),
    /// Two-level treemap with layout rectangles.
    Treemap(TreemapCommand),
    /// Sector → size treemap colored by ROI on a fixed domain.
    RoiTreemap(SizeArgs),
    /// Convex hull per sector.
    Hulls,
    /// Rotated rooftop rectangles per installation.
    Footprints(FootprintsCommand),
    /// Hourly dispatch with net demand.
    DuckCurve,
    /// Run the live feed and print one snapshot per refresh.
    Watch(WatchCommand),
}

#[derive(Args, Debug)]
struct InstallationsCommand {
    #[arg(long)]
    search: Option<String>,
    #[arg(long, value_enum, default_value_t = SortKey::Roi)]
    sort: SortKey,
    #[arg(long, value_enum, default_value_t = Direction::Descending)]
    direction: Direction,
}

#[derive(Args, Debug)]
struct ChoroplethCommand {
    #[arg(long, value_enum, default_value_t = Metric::Capacity)]
    metric: Metric,
    /// GeoJSON FeatureCollection to bin into instead of the built-in neighbourhoods.
    #[arg(long)]
    geojson: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SizeArgs {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: f64,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: f64,
}

#[derive(Args, Debug)]
struct TreemapCommand {
    #[arg(long, value_enum, default_value_t = Dimension::Sector)]
    group_by: Dimension,
    #[arg(long, value_enum, default_value_t = Metric::Roi)]
    color_by: Metric,
    #[command(flatten)]
    size: SizeArgs,
}

#[derive(Args, Debug)]
struct FootprintsCommand {
    #[arg(long, value_enum, default_value_t = Metric::Efficiency)]
    color_by: Metric,
}

#[derive(Args, Debug)]
struct WatchCommand {
    /// Stop after this many snapshots; runs until Ctrl-C otherwise.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    ticks: Option<u64>,
    #[arg(long, env = "MEX_REFRESH_INTERVAL_MS")]
    interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = FeedConfig::from_env();
    config.installation_count = cli.count;
    config.seed = cli.seed;
    if let Command::Watch(WatchCommand { interval_ms: Some(ms), .. }) = &cli.command {
        config.refresh_interval_ms = (*ms).max(1);
    }

    let sin = OnsClient::new(OnsConfig::from_env())?;
    let state = AppState::new(config, Arc::new(sin));
    feed::load(&state, cli.source).await;

    match cli.command {
        Command::Dashboard => print_json(&state.data().await),
        Command::Installations(args) => run_installations(&state, &args).await,
        Command::Projections => print_json(&projections::generate_annual_projections()),
        Command::Choropleth(args) => run_choropleth(&state, &args).await,
        Command::Treemap(args) => {
            let data = state.data().await;
            let size = (args.size.width, args.size.height);
            print_json(&treemap::build(&data.installations, args.group_by, args.color_by, ColorDomain::Extent, size))
        }
        Command::RoiTreemap(args) => {
            let data = state.data().await;
            print_json(&treemap::roi_treemap(&data.installations, (args.width, args.height)))
        }
        Command::Hulls => print_json(&explore::sector_hulls(&state.data().await.installations)),
        Command::Footprints(args) => {
            let data = state.data().await;
            let mut rng = state.rng.lock().await;
            print_json(&explore::footprints(&mut *rng, &data.installations, args.color_by))
        }
        Command::DuckCurve => print_json(&dataset::duck_curve(&state.data().await.chart_data)),
        Command::Watch(args) => run_watch(state, args.ticks).await,
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstallationRow<'a> {
    #[serde(flatten)]
    installation: &'a Installation,
    roi_tier: RoiTier,
}

async fn run_installations(state: &AppState, args: &InstallationsCommand) -> Result<(), CliError> {
    let mut installations = state.data().await.installations;
    explore::sort_installations(&mut installations, SortConfig { key: args.sort, direction: args.direction });
    let term = args.search.as_deref().unwrap_or("");
    let rows: Vec<InstallationRow<'_>> = explore::search(&installations, term)
        .into_iter()
        .map(|installation| InstallationRow { installation, roi_tier: explore::roi_tier(installation.roi) })
        .collect();
    info!(total = installations.len(), shown = rows.len(), "installations listed");
    print_json(&rows)
}

async fn run_choropleth(state: &AppState, args: &ChoroplethCommand) -> Result<(), CliError> {
    let regions = match &args.geojson {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|source| CliError::ReadFile { path: path.clone(), source })?;
            geo::parse_regions(&json)?
        }
        None => geo::maua_regions()?,
    };
    let data = state.data().await;
    print_json(&choropleth::aggregate(&regions, &data.installations, args.metric))
}

#[derive(Serialize)]
struct WatchKpi<'a> {
    title: &'a str,
    value: String,
    change: String,
}

#[derive(Serialize)]
struct WatchFrame<'a> {
    source: DataSource,
    kpis: Vec<WatchKpi<'a>>,
    latest: Option<&'a GenerationSample>,
}

fn watch_kpi(kpi: &Kpi) -> WatchKpi<'_> {
    WatchKpi { title: &kpi.title, value: kpi.display_value(), change: kpi.display_change() }
}

async fn run_watch(state: AppState, ticks: Option<u64>) -> Result<(), CliError> {
    let task = feed::spawn_refresh_task(state.clone());
    let mut ticker = tokio::time::interval(Duration::from_millis(state.config.refresh_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut printed = 0u64;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            _ = ticker.tick() => {
                let feed_state = state.feed.read().await;
                let frame = WatchFrame {
                    source: feed_state.source,
                    kpis: feed_state.data.kpis.iter().map(watch_kpi).collect(),
                    latest: feed_state.data.chart_data.generation.last(),
                };
                println!("{}", serde_json::to_string(&frame)?);
                printed += 1;
                if ticks.is_some_and(|limit| printed >= limit) {
                    break;
                }
            }
        }
    }

    task.abort();
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
