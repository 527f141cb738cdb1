use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for one city, as returned by a single provider call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    pub description: String,
    /// Primary condition category, e.g. "Rain" or "Clouds".
    pub condition: String,
    pub icon: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub wind_deg: f64,
    /// Meters; the provider omits it for some stations.
    pub visibility_m: Option<u32>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub cloudiness_pct: u8,
    pub coord: Coordinates,
    pub utc_offset_secs: i32,
}

impl CurrentWeather {
    pub fn utc_offset(&self) -> FixedOffset {
        offset_from_secs(self.utc_offset_secs)
    }
}

/// One 3-hour reading from the forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub samples: Vec<ForecastSample>,
    pub utc_offset_secs: i32,
}

impl Forecast {
    pub fn utc_offset(&self) -> FixedOffset {
        offset_from_secs(self.utc_offset_secs)
    }
}

/// Summary of all samples that fall on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Short day label, e.g. "Mon, Jan 5".
    pub label: String,
    pub avg_temp_c: f64,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub avg_humidity_pct: u8,
    pub avg_wind_speed_mps: f64,
    pub description: String,
    pub icon: String,
}

impl DailyForecast {
    /// Weekday part of the label ("Mon").
    pub fn weekday(&self) -> &str {
        self.label.split(',').next().unwrap_or(&self.label)
    }
}

fn offset_from_secs(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(|| Utc.fix())
}
