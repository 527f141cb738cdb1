//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider client (current conditions, 5-day forecast)
//! - Forecast aggregation into daily summaries
//! - Multi-city comparison of current conditions
//! - Rendering: the text page and the snapshot/trend charts
//! - The search orchestrator tying it all together
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod chart;
pub mod compare;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod present;
pub mod provider;

pub use aggregate::aggregate;
pub use chart::{
    Canvas, draw_feels_like_chart, draw_metric_chart, draw_snapshot_chart, draw_trend_chart,
};
pub use compare::{CityReading, Comparison, Metric, compare_cities};
pub use config::Config;
pub use dashboard::{Dashboard, SearchOutcome, View};
pub use error::WeatherError;
pub use model::{Coordinates, CurrentWeather, DailyForecast, Forecast, ForecastSample};
pub use present::{Page, Status};
pub use provider::{WeatherProvider, provider_from_config};
