//! Sunlit scene builder.
//!
//! Reads building footprints from GeoJSON, extrudes them around a centre,
//! places the sun for a given time and writes the scene as JSON:
//! - Optional YAML config with `SCENE_*` environment overrides
//! - Auto-centring on the buildings' extent
//! - Stepping the clock to trace the sun through the day

mod config;
mod input;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use scene::{Scene, SceneEvent};
use scene_common::time::parse_timestamp;

#[derive(Parser, Debug)]
#[command(name = "sunlit-scene")]
#[command(about = "Extruded building scene lit by the real sun")]
struct Args {
    /// GeoJSON FeatureCollection of building footprints
    #[arg(short, long)]
    buildings: PathBuf,

    /// Scene configuration file (YAML)
    #[arg(short, long, env = "SCENE_CONFIG")]
    config: Option<PathBuf>,

    /// Scene time (RFC 3339, date, or "now")
    #[arg(short, long, default_value = "now")]
    time: String,

    /// Centre the scene on the buildings instead of the configured centre
    #[arg(long)]
    auto_center: bool,

    /// Advance the clock this many times after the initial time
    #[arg(long, default_value = "0")]
    steps: u32,

    /// Minutes between clock steps
    #[arg(long, default_value = "60")]
    step_minutes: i64,

    /// Seed for material selection (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Include full mesh data in the output
    #[arg(long)]
    meshes: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout carries only the scene
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting sunlit scene builder");

    let mut config = config::load_scene_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.material_seed = Some(seed);
    }

    let records = input::load_buildings(&args.buildings)?;
    if args.auto_center {
        match input::bounds(&records) {
            Some(bounds) => {
                let center = bounds.center();
                info!(%center, width = bounds.width(), height = bounds.height(), "Auto-centring on buildings");
                config.center_lon = center.lon;
                config.center_lat = center.lat;
            }
            None => warn!("No buildings to centre on, keeping configured centre"),
        }
    }

    let time = parse_timestamp(&args.time).context("Invalid --time")?;
    let step = clock_step(time, args.step_minutes, args.steps)?;
    let mut scene = Scene::new(config, time)?;
    let event_log = tokio::spawn(log_events(scene.subscribe()));

    log_sun(&scene)?;

    let mut skipped = 0;
    for (index, record) in records.into_iter().enumerate() {
        if let Err(e) = scene.render_building(record) {
            warn!(index, error = %e, "Skipping building");
            skipped += 1;
        }
    }
    info!(
        rendered = scene.buildings().len(),
        skipped,
        "Buildings extruded"
    );

    if args.steps > 0 {
        let (tx, rx) = mpsc::channel(16);
        let clock = tokio::spawn(run_clock(tx, time, step, args.steps));
        let applied = scene.follow_clock(rx).await?;
        clock.await?;
        info!(applied, clock = %scene.clock(), "Clock stepped");
        log_sun(&scene)?;
    }

    let json = scene.snapshot(args.meshes).to_json()?;
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write scene: {}", path.display()))?;
            info!(path = %path.display(), "Scene written");
        }
        None => println!("{}", json),
    }

    drop(scene);
    event_log.await?;
    Ok(())
}

/// Clock step for `--step-minutes`, checking that the last of `steps` ticks
/// after `start` is still a representable time.
fn clock_step(start: DateTime<Utc>, step_minutes: i64, steps: u32) -> Result<Duration> {
    let step = Duration::try_minutes(step_minutes)
        .ok_or_else(|| anyhow!("--step-minutes {} is out of range", step_minutes))?;

    step_minutes
        .checked_mul(i64::from(steps))
        .and_then(Duration::try_minutes)
        .and_then(|span| start.checked_add_signed(span))
        .ok_or_else(|| {
            anyhow!(
                "{} steps of {} minutes from {} run past the supported date range",
                steps,
                step_minutes,
                start
            )
        })?;

    Ok(step)
}

/// Send `steps` clock ticks, `step` apart, after `start`. Stops early if a
/// tick would leave the supported date range.
async fn run_clock(tx: mpsc::Sender<DateTime<Utc>>, start: DateTime<Utc>, step: Duration, steps: u32) {
    let mut tick = start;
    for _ in 0..steps {
        match tick.checked_add_signed(step) {
            Some(next) => tick = next,
            None => {
                warn!(%tick, "Clock left the supported date range");
                break;
            }
        }
        if tx.send(tick).await.is_err() {
            break;
        }
    }
}

fn log_sun(scene: &Scene) -> Result<()> {
    let sun = scene.sun();
    let times = solar::sun_times(&scene.clock(), &scene.center())?;

    if let Some(angles) = sun.angles {
        info!(
            clock = %scene.clock(),
            azimuth_deg = angles.compass_azimuth_deg(),
            altitude_deg = angles.altitude_deg(),
            daylight = angles.is_daylight(),
            x = sun.position.x,
            y = sun.position.y,
            z = sun.position.z,
            "Sun position"
        );
    }
    info!(
        solar_noon = %times.solar_noon,
        sunrise = ?times.sunrise,
        sunset = ?times.sunset,
        "Sun times"
    );
    Ok(())
}

async fn log_events(mut events: broadcast::Receiver<SceneEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => debug!(?event, "Scene event"),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                debug!(missed, "Scene event log fell behind")
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
