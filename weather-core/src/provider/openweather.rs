use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    WeatherError,
    model::{Coordinates, CurrentWeather, Forecast, ForecastSample},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// `base_url` is the API root, e.g. `https://api.openweathermap.org/data/2.5`,
    /// or a proxy or mock server standing in for it.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        not_found: &'static str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(WeatherError::Network)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::Network)?;

        if !status.is_success() {
            debug!(endpoint, %status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(WeatherError::NotFound { message: not_found, status });
        }

        serde_json::from_str(&body).map_err(WeatherError::Parse)
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: Option<String>,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    visibility: Option<u32>,
    sys: OwSys,
    clouds: OwClouds,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwSampleMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwSampleMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
    city: Option<OwCity>,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, description, icon) = match parsed.weather.into_iter().next() {
            Some(w) => (w.main.unwrap_or_default(), w.description, w.icon),
            None => (String::new(), "Unknown".to_string(), String::new()),
        };

        CurrentWeather {
            city: parsed.name,
            country: parsed.sys.country,
            description,
            condition,
            icon,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.speed,
            wind_deg: parsed.wind.deg,
            visibility_m: parsed.visibility,
            sunrise: unix_to_utc(parsed.sys.sunrise),
            sunset: unix_to_utc(parsed.sys.sunset),
            cloudiness_pct: parsed.clouds.all,
            coord: Coordinates { lat: parsed.coord.lat, lon: parsed.coord.lon },
            utc_offset_secs: parsed.timezone,
        }
    }
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(entry: OwForecastEntry) -> Self {
        let (description, icon) = entry
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        ForecastSample {
            time: unix_to_utc(entry.dt),
            temperature_c: entry.main.temp,
            humidity_pct: entry.main.humidity,
            wind_speed_mps: entry.wind.speed,
            description,
            icon,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        debug!(city, "requesting current weather");

        let parsed: OwCurrentResponse =
            self.get_json("weather", &[("q", city)], "City not found").await?;

        Ok(parsed.into())
    }

    async fn fetch_forecast(&self, coord: Coordinates) -> Result<Forecast, WeatherError> {
        debug!(lat = coord.lat, lon = coord.lon, "requesting forecast");

        let lat = coord.lat.to_string();
        let lon = coord.lon.to_string();
        let parsed: OwForecastResponse = self
            .get_json(
                "forecast",
                &[("lat", lat.as_str()), ("lon", lon.as_str())],
                "Forecast data not available",
            )
            .await?;

        Ok(Forecast {
            utc_offset_secs: parsed.city.map(|c| c.timezone).unwrap_or_default(),
            samples: parsed.list.into_iter().map(ForecastSample::from).collect(),
        })
    }
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
