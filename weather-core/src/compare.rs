//! Current conditions for several cities side by side.

use std::fmt;

use tracing::{debug, info, warn};

use crate::{WeatherError, model::CurrentWeather, provider::WeatherProvider};

/// Cities compared when none are given.
pub const DEFAULT_CITIES: [&str; 6] = ["London", "New York", "Tokyo", "Paris", "Mumbai", "Sydney"];

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct CityReading {
    /// The name as requested, not the provider's spelling.
    pub city: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub description: String,
}

impl CityReading {
    pub fn from_current(city: &str, data: &CurrentWeather) -> Self {
        Self {
            city: city.to_string(),
            temperature_c: data.temperature_c,
            feels_like_c: data.feels_like_c,
            humidity_pct: data.humidity_pct,
            pressure_hpa: data.pressure_hpa,
            wind_speed_mps: data.wind_speed_mps,
            description: data.description.clone(),
        }
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature_c,
            Metric::FeelsLike => self.feels_like_c,
            Metric::Humidity => f64::from(self.humidity_pct),
            Metric::WindSpeed => self.wind_speed_mps,
            Metric::Pressure => f64::from(self.pressure_hpa),
        }
    }
}

/// A numeric column of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
    WindSpeed,
    Pressure,
    FeelsLike,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::WindSpeed,
        Metric::Pressure,
        Metric::FeelsLike,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::WindSpeed => "Wind Speed",
            Metric::Pressure => "Pressure",
            Metric::FeelsLike => "Feels Like",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature | Metric::FeelsLike => "°C",
            Metric::Humidity => "%",
            Metric::WindSpeed => "m/s",
            Metric::Pressure => "hPa",
        }
    }

    /// File-name friendly form, e.g. `wind-speed`.
    pub fn slug(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::WindSpeed => "wind-speed",
            Metric::Pressure => "pressure",
            Metric::FeelsLike => "feels-like",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Readings that arrived, in request order, plus the cities that failed.
#[derive(Debug, Default)]
pub struct Comparison {
    pub readings: Vec<CityReading>,
    pub failures: Vec<(String, WeatherError)>,
}

impl Comparison {
    /// Mean of `metric` over the readings; `None` when nothing arrived.
    pub fn average(&self, metric: Metric) -> Option<f64> {
        if self.readings.is_empty() {
            return None;
        }
        let sum: f64 = self.readings.iter().map(|r| r.value(metric)).sum();
        Some(sum / self.readings.len() as f64)
    }
}

/// Fetch current conditions for each city, one after another.
///
/// A failing city is recorded and skipped; the rest are still fetched.
pub async fn compare_cities<S: AsRef<str>>(
    provider: &dyn WeatherProvider,
    cities: &[S],
) -> Comparison {
    let mut comparison = Comparison::default();

    for city in cities {
        let city = city.as_ref().trim();
        if city.is_empty() {
            comparison.failures.push((String::new(), WeatherError::MalformedInput));
            continue;
        }

        debug!(city, "fetching weather for comparison");
        match provider.fetch_current(city).await {
            Ok(data) => comparison.readings.push(CityReading::from_current(city, &data)),
            Err(err) => {
                warn!(city, error = %err, "comparison lookup failed");
                comparison.failures.push((city.to_string(), err));
            }
        }
    }

    info!(
        fetched = comparison.readings.len(),
        failed = comparison.failures.len(),
        "compared cities"
    );
    comparison
}
