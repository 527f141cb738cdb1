use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::{debug, warn};
use weather_core::{
    Canvas, Comparison, Config, Dashboard, Metric, View,
    compare::DEFAULT_CITIES,
    compare_cities, draw_feels_like_chart, draw_metric_chart, provider_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Show current weather and the daily forecast for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,

        #[command(flatten)]
        charts: ChartArgs,
    },

    /// Search city after city from a prompt, starting with the default city.
    Interactive {
        #[command(flatten)]
        charts: ChartArgs,
    },

    /// Compare current conditions across several cities.
    Compare {
        /// Cities to compare; defaults to London, New York, Tokyo, Paris, Mumbai and Sydney.
        cities: Vec<String>,

        #[command(flatten)]
        charts: ChartArgs,
    },
}

#[derive(Debug, clap::Args)]
pub struct ChartArgs {
    /// Write the charts as SVG files into this directory.
    #[arg(long)]
    pub charts_dir: Option<PathBuf>,

    /// Chart width in pixels (overrides `chart_width` from the config file).
    #[arg(long)]
    pub chart_width: Option<u32>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, charts } => {
                let config = Config::load()?;
                let dashboard = build_dashboard(&config, &charts)?;
                let city = city.unwrap_or_else(|| config.default_city.clone());

                if search_and_print(&dashboard, &city, &charts).await? {
                    Ok(ExitCode::SUCCESS)
                } else {
                    Ok(ExitCode::FAILURE)
                }
            }
            Command::Interactive { charts } => {
                let config = Config::load()?;
                let dashboard = build_dashboard(&config, &charts)?;

                search_in_session(&dashboard, &config.default_city, &charts).await;

                loop {
                    let input = Text::new("City:")
                        .with_help_message("Enter to search, Esc to quit")
                        .prompt();

                    match input {
                        Ok(city) => {
                            search_in_session(&dashboard, &city, &charts).await;
                        }
                        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                            break;
                        }
                        Err(err) => return Err(err).context("Failed to read city from prompt"),
                    }
                }

                Ok(ExitCode::SUCCESS)
            }
            Command::Compare { cities, charts } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let cities = if cities.is_empty() {
                    DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()
                } else {
                    cities
                };

                eprintln!("Fetching weather for {} cities...", cities.len());
                let comparison = compare_cities(&*provider, &cities).await;
                print!("{}", output::render_comparison(&comparison));

                if comparison.readings.is_empty() {
                    return Ok(ExitCode::FAILURE);
                }

                if let Some(dir) = &charts.charts_dir {
                    let width = charts.chart_width.unwrap_or(config.chart_width);
                    write_comparison_charts(&comparison, f64::from(width), dir)?;
                }

                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.set_api_key(api_key.trim().to_string());
    if !default_city.trim().is_empty() {
        config.default_city = default_city.trim().to_string();
    }
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_dashboard(config: &Config, charts: &ChartArgs) -> anyhow::Result<Dashboard> {
    let provider = provider_from_config(config)?;
    let width = charts.chart_width.unwrap_or(config.chart_width);

    Ok(Dashboard::new(provider, &config.icon_base_url, f64::from(width)))
}

/// One interactive search. Nothing that goes wrong here ends the session.
async fn search_in_session(dashboard: &Dashboard, city: &str, charts: &ChartArgs) -> bool {
    match search_and_print(dashboard, city, charts).await {
        Ok(found) => found,
        Err(err) => {
            warn!("search output failed: {err:#}");
            false
        }
    }
}

/// Run one search and print the outcome; returns whether it succeeded.
async fn search_and_print(
    dashboard: &Dashboard,
    city: &str,
    charts: &ChartArgs,
) -> anyhow::Result<bool> {
    if !city.trim().is_empty() {
        eprintln!("Loading weather for {}...", city.trim());
    }

    let result = dashboard.search(city).await;
    let view = dashboard.view();
    print!("{}", output::render_view(&view));

    match result {
        Ok(_) => {
            if let Some(dir) = &charts.charts_dir {
                write_charts(&view, dir)?;
            }
            Ok(true)
        }
        Err(err) => {
            debug!(error = ?err, "search failed");
            Ok(false)
        }
    }
}

fn write_charts(view: &View, dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create charts directory: {}", dir.display()))?;

    for (name, canvas) in [("snapshot.svg", &view.snapshot), ("trend.svg", &view.trend)] {
        write_svg(canvas, &dir.join(name))?;
    }

    Ok(())
}

/// One `compare-<metric>.svg` per metric plus `compare-feels-like-vs-temperature.svg`.
fn write_comparison_charts(comparison: &Comparison, width: f64, dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create charts directory: {}", dir.display()))?;

    let mut canvas = Canvas::new(width);
    for metric in Metric::ALL {
        draw_metric_chart(&mut canvas, &comparison.readings, metric);
        write_svg(&canvas, &dir.join(format!("compare-{}.svg", metric.slug())))?;
    }

    draw_feels_like_chart(&mut canvas, &comparison.readings);
    write_svg(&canvas, &dir.join("compare-feels-like-vs-temperature.svg"))
}

fn write_svg(canvas: &Canvas, path: &Path) -> anyhow::Result<()> {
    fs::write(path, canvas.to_svg())
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    debug!(path = %path.display(), "wrote chart");
    Ok(())
}
