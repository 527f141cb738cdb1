use crate::{
    Config, WeatherError,
    model::{Coordinates, CurrentWeather, Forecast},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name.
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, WeatherError>;

    /// 5-day / 3-hour forecast for a location.
    async fn fetch_forecast(&self, coord: Coordinates) -> Result<Forecast, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    Ok(Box::new(OpenWeatherProvider::with_base_url(api_key, config.base_url.clone())))
}
