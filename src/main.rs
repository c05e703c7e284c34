mod catalog;
mod config;
mod ephemeris;
mod predict;
mod web;

use chrono::{Duration, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::catalog::{download_catalog, CatalogError, Selection, Sgp4Catalog, TleLoader};
use crate::config::{Config, ConfigError};
use crate::ephemeris::{Sgp4Propagator, SolarDarkness};
use crate::predict::{predict, Observer, PredictionContext, SearchSettings, TimeWindow};
use crate::web::AppState;

#[derive(Parser)]
#[command(name = "trainspotter")]
#[command(about = "Predict visible passes of satellite trains")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "trainspotter.yaml")]
    config: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the best visible pass of each night as JSON
    Predict(PredictArgs),
    /// Serve predictions over HTTP
    Serve {
        /// Use the cached element sets without downloading
        #[arg(long)]
        offline: bool,
    },
    /// Parse the configuration and print the resolved values
    ValidateConfig,
}

#[derive(Args)]
struct PredictArgs {
    /// Comma-separated catalog numbers; overrides train selection
    #[arg(long, value_delimiter = ',')]
    satellites: Vec<u32>,
    /// Evaluate every satellite instead of one per launch
    #[arg(long)]
    all_satellites: bool,
    /// Use the cached element sets without downloading
    #[arg(long)]
    offline: bool,
    #[arg(long)]
    workers: Option<usize>,
    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Also write the run summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl PredictArgs {
    fn selection(&self, config: &Config) -> Selection {
        if !self.satellites.is_empty() {
            Selection::Explicit(self.satellites.clone())
        } else if self.all_satellites {
            Selection::All
        } else {
            config.selection()
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config {}: {}", cli.config, e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Predict(args) => run_predict(&config, &args),
        Commands::Serve { offline } => serve(config, offline),
        Commands::ValidateConfig => validate(&config),
    }
}

fn validate(config: &Config) -> ExitCode {
    match resolve(config) {
        Ok((observer, window, settings)) => {
            println!("Configuration is valid");
            println!(
                "  observer: {:.4}, {:.4} at {} m ({})",
                observer.latitude_deg,
                observer.longitude_deg,
                observer.altitude_m,
                observer.timezone
            );
            println!(
                "  catalog: {} -> {}{}",
                config.catalog.url,
                config.catalog.cache_file.display(),
                if config.catalog.refresh { "" } else { " (cache only)" }
            );
            println!("  window: {} h", window.num_hours());
            println!(
                "  thresholds: altitude {} deg, follow-up {} min, min duration {} s, magnitude < {}",
                settings.altitude_threshold_deg,
                settings.follow_up_window.num_minutes(),
                settings.min_pass_duration.num_seconds(),
                settings.magnitude_limit
            );
            println!("  selection: {:?}", config.selection());
            println!("  workers: {}", config.search.workers);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_predict(config: &Config, args: &PredictArgs) -> ExitCode {
    let (observer, window, settings) = match resolve(config) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let catalog = match load_catalog(config, args.offline) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Element sets unavailable: {}", e);
            // empty report on failure
            if let Err(e) = write_json(args.output.as_deref(), &Vec::<()>::new()) {
                log::error!("Failed to write report: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    let ctx = PredictionContext::new(
        observer,
        TimeWindow::starting_at(Utc::now(), window),
        Sgp4Propagator,
        SolarDarkness,
    )
    .with_settings(settings);
    let workers = args.workers.unwrap_or(config.search.workers);
    let prediction = predict(&ctx, &catalog, &args.selection(config), workers);

    if !prediction.summary.failures.is_empty() {
        log::warn!(
            "{} satellites failed to evaluate",
            prediction.summary.failures.len()
        );
    }

    if let Err(e) = write_json(args.output.as_deref(), &prediction.report) {
        log::error!("Failed to write report: {}", e);
        return ExitCode::FAILURE;
    }
    if let Some(path) = &args.summary {
        if let Err(e) = write_json(Some(path.as_path()), &prediction.summary) {
            log::error!("Failed to write summary: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn serve(config: Config, offline: bool) -> ExitCode {
    let (observer, window, settings) = match resolve(&config) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let catalog = match load_catalog(&config, offline) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Element sets unavailable: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let state = AppState {
        catalog: Arc::new(catalog),
        observer,
        settings,
        window,
        default_selection: config.selection(),
        workers: config.search.workers,
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };
    match runtime.block_on(web::run_server(&config.web.bind, state)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve(config: &Config) -> Result<(Observer, Duration, SearchSettings), ConfigError> {
    Ok((
        config.observer()?,
        config.search_window()?,
        config.search_settings()?,
    ))
}

/// Refresh the cache file unless disabled, then parse it.
fn load_catalog(config: &Config, offline: bool) -> Result<Sgp4Catalog, CatalogError> {
    let cache = &config.catalog.cache_file;
    if config.catalog.refresh && !offline {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(download_catalog(&config.catalog.url, cache))?;
    } else {
        log::info!("Using cached element sets from {}", cache.display());
    }
    TleLoader::new(cache.clone()).load()
}

fn write_json<T: Serialize + ?Sized>(path: Option<&Path>, value: &T) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    match path {
        Some(p) => fs::write(p, json + "\n"),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
