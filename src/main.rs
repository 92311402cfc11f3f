mod catalog;
mod orbit;
mod track;
mod web;

use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::catalog::parse_tle_text;
use crate::orbit::{locate, OrbitalState};
use crate::track::{find_passes, sample_ground_track, ObserverLocation};

#[derive(Parser)]
#[command(name = "orbita")]
#[command(about = "Satellite tracking and pass prediction backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "orbita.yaml")]
        config: String,
    },
    /// Print the sub-satellite point of one satellite
    Position {
        #[arg(long)]
        tle: PathBuf,
        #[arg(long)]
        id: u64,
        /// RFC3339 instant, defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Print an evenly sampled ground track
    Track {
        #[arg(long)]
        tle: PathBuf,
        #[arg(long)]
        id: u64,
        #[arg(long)]
        start: Option<String>,
        #[arg(long, default_value = "90m")]
        span: String,
        #[arg(long, default_value_t = 10)]
        points: usize,
    },
    /// Print visibility passes over an observer
    Passes {
        #[arg(long)]
        tle: PathBuf,
        #[arg(long)]
        id: u64,
        /// Observer as "lat,lon" in degrees
        #[arg(long, allow_hyphen_values = true)]
        observer: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long, default_value_t = 3)]
        days: u32,
        #[arg(long, default_value = "2h")]
        step: String,
        #[arg(long, default_value_t = track::DEFAULT_MIN_ELEVATION_DEG, allow_negative_numbers = true)]
        min_elevation: f64,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Position { tle, id, at } => position(&tle, id, at.as_deref()),
        Commands::Track {
            tle,
            id,
            start,
            span,
            points,
        } => ground_track(&tle, id, start.as_deref(), &span, points),
        Commands::Passes {
            tle,
            id,
            observer,
            start,
            days,
            step,
            min_elevation,
        } => passes(&tle, id, &observer, start.as_deref(), days, &step, min_elevation),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(path: &str) -> Result<(), String> {
    let config = web::Config::from_file(path).map_err(|e| format!("config {}: {}", path, e))?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| e.to_string())?;
    runtime
        .block_on(web::run_server(config))
        .map_err(|e| e.to_string())
}

fn position(tle: &Path, id: u64, at: Option<&str>) -> Result<(), String> {
    let state = load_satellite(tle, id)?;
    let at = parse_instant(at)?;
    let position = locate(&state, at).map_err(|e| e.to_string())?;
    print_json(&position)
}

fn ground_track(
    tle: &Path,
    id: u64,
    start: Option<&str>,
    span: &str,
    points: usize,
) -> Result<(), String> {
    let state = load_satellite(tle, id)?;
    let start = parse_instant(start)?;
    let span = web::config::parse_duration(span)?;
    let track = sample_ground_track(&state, start, span, points).map_err(|e| e.to_string())?;
    let points = track.collect_points().map_err(|e| e.to_string())?;
    print_json(&points)
}

fn passes(
    tle: &Path,
    id: u64,
    observer: &str,
    start: Option<&str>,
    days: u32,
    step: &str,
    min_elevation: f64,
) -> Result<(), String> {
    let state = load_satellite(tle, id)?;
    let observer = ObserverLocation::from_coordinates(observer)
        .ok_or_else(|| format!("invalid observer {:?}, expected \"lat,lon\"", observer))?;
    let start = parse_instant(start)?;
    let step = web::config::parse_duration(step)?;
    let passes = find_passes(
        &state,
        &observer,
        start,
        Duration::days(days as i64),
        step,
        min_elevation,
    )
    .map_err(|e| e.to_string())?;

    log::info!(
        "{} pass(es) of {} above {}° from ({}, {})",
        passes.len(),
        state.name(),
        min_elevation,
        observer.latitude,
        observer.longitude
    );
    print_json(&passes)
}

fn load_satellite(path: &Path, id: u64) -> Result<OrbitalState, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {}", path.display(), e))?;
    let source = path.display().to_string();
    parse_tle_text(&source, &content)
        .into_iter()
        .find(|s| s.catalog_id() == id)
        .ok_or_else(|| format!("NORAD {} not found in {}", id, source))
}

fn parse_instant(value: Option<&str>) -> Result<DateTime<Utc>, String> {
    match value {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("invalid instant {:?}: {}", s, e)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
