//! Text side of the dashboard: the rendering context and its field formatting.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::model::{CurrentWeather, DailyForecast};

/// Loading/error indicator shown around a search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Page-wide mood, picked from the current primary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Neutral,
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl Background {
    /// First matching keyword wins; no match keeps the neutral look.
    pub fn from_condition(condition: &str) -> Self {
        let condition = condition.to_lowercase();

        if condition.contains("clear") {
            Background::Sunny
        } else if condition.contains("cloud") {
            Background::Cloudy
        } else if condition.contains("rain") || condition.contains("drizzle") {
            Background::Rainy
        } else if condition.contains("snow") {
            Background::Snowy
        } else {
            Background::Neutral
        }
    }

    pub fn overlay(self) -> Option<Overlay> {
        match self {
            Background::Rainy => Some(Overlay::Rain),
            Background::Snowy => Some(Overlay::Snow),
            _ => None,
        }
    }
}

/// Animated effect layered over the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Rain,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    const ORDER: [Compass; 8] = [
        Compass::North,
        Compass::NorthEast,
        Compass::East,
        Compass::SouthEast,
        Compass::South,
        Compass::SouthWest,
        Compass::West,
        Compass::NorthWest,
    ];

    /// Nearest of the 8 principal directions; 360° wraps to North.
    pub fn from_degrees(degrees: f64) -> Self {
        let idx = (degrees / 45.0).round().rem_euclid(8.0) as usize;
        Self::ORDER[idx % 8]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compass::North => "North",
            Compass::NorthEast => "NorthEast",
            Compass::East => "East",
            Compass::SouthEast => "SouthEast",
            Compass::South => "South",
            Compass::SouthWest => "SouthWest",
            Compass::West => "West",
            Compass::NorthWest => "NorthWest",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formatted current-conditions fields, one per display region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrentView {
    pub location: String,
    pub description: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub pressure: String,
    pub visibility_km: String,
    pub sunrise: String,
    pub sunset: String,
    pub cloudiness: String,
    pub icon_url: String,
    pub icon_glyph: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub date: String,
    pub icon_url: String,
    pub icon_glyph: &'static str,
    pub avg_temp: String,
    pub max_temp: String,
    pub min_temp: String,
    pub description: String,
}

/// Everything the dashboard shows besides the two charts.
///
/// Each render call overwrites the regions it owns, so a page can be reused
/// across searches without leftovers.
#[derive(Debug, Clone)]
pub struct Page {
    icon_base_url: String,
    pub status: Status,
    pub current: Option<CurrentView>,
    pub background: Background,
    pub overlay: Option<Overlay>,
    pub forecast: Vec<ForecastCard>,
    pub date_time: String,
    pub last_updated: String,
}

impl Page {
    pub fn new(icon_base_url: impl Into<String>) -> Self {
        Self {
            icon_base_url: icon_base_url.into().trim_end_matches('/').to_string(),
            status: Status::Idle,
            current: None,
            background: Background::Neutral,
            overlay: None,
            forecast: Vec::new(),
            date_time: String::new(),
            last_updated: String::new(),
        }
    }

    /// Drop the rendered weather, keeping only the status.
    pub fn clear(&mut self) {
        self.current = None;
        self.forecast.clear();
        self.background = Background::Neutral;
        self.overlay = None;
        self.date_time.clear();
        self.last_updated.clear();
    }

    pub fn render_current(&mut self, data: &CurrentWeather) {
        self.render_current_at(data, Local::now());
    }

    /// Same as [`Page::render_current`] with an explicit "now" for the clock fields.
    pub fn render_current_at<Tz: TimeZone>(&mut self, data: &CurrentWeather, now: DateTime<Tz>)
    where
        Tz::Offset: fmt::Display,
    {
        let offset = data.utc_offset();

        self.current = Some(CurrentView {
            location: format!("{}, {}", data.city, data.country),
            description: data.description.clone(),
            temperature: format!("{}°", whole(data.temperature_c)),
            feels_like: whole(data.feels_like_c),
            humidity: data.humidity_pct.to_string(),
            wind_speed: format!("{:.1}", data.wind_speed_mps),
            wind_direction: Compass::from_degrees(data.wind_deg).to_string(),
            pressure: data.pressure_hpa.to_string(),
            visibility_km: data
                .visibility_m
                .map(|m| format!("{:.1}", f64::from(m) / 1000.0))
                .unwrap_or_else(|| "n/a".to_string()),
            sunrise: format_time(data.sunrise, &offset),
            sunset: format_time(data.sunset, &offset),
            cloudiness: format!("{}%", data.cloudiness_pct),
            icon_url: self.icon_url(&data.icon),
            icon_glyph: icon_glyph(&data.icon),
        });

        self.apply_background(&data.condition);

        self.date_time = now.format("%A, %B %-d, %Y at %I:%M %p").to_string();
        self.last_updated = now.format("%-m/%-d/%Y, %I:%M:%S %p").to_string();
    }

    pub fn render_forecast(&mut self, days: &[DailyForecast]) {
        self.forecast = days
            .iter()
            .map(|day| ForecastCard {
                date: day.label.clone(),
                icon_url: self.icon_url(&day.icon),
                icon_glyph: icon_glyph(&day.icon),
                avg_temp: format!("{:.1}°C", day.avg_temp_c),
                max_temp: format!("↑{:.1}°", day.max_temp_c),
                min_temp: format!("↓{:.1}°", day.min_temp_c),
                description: day.description.clone(),
            })
            .collect();
    }

    fn apply_background(&mut self, condition: &str) {
        // Drop the previous effect before deciding on a new one.
        self.overlay.take();
        self.background = Background::from_condition(condition);
        self.overlay = self.background.overlay();
    }

    fn icon_url(&self, icon: &str) -> String {
        format!("{}/{icon}@2x.png", self.icon_base_url)
    }
}

// Adding 0.0 turns -0 into 0.
pub(crate) fn whole(value: f64) -> String {
    (value.round() + 0.0).to_string()
}

/// Localized "hh:mm AM" time of a timestamp in the given zone.
pub fn format_time<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format("%I:%M %p").to_string()
}

/// Terminal stand-in for a provider icon code such as "10d".
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "🌧",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "·",
    }
}
