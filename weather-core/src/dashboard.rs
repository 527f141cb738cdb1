//! One search end to end: validate, fetch, aggregate, render.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::{
    WeatherError,
    aggregate::aggregate,
    chart::{Canvas, draw_snapshot_chart, draw_trend_chart},
    model::{CurrentWeather, DailyForecast},
    present::{Page, Status},
    provider::WeatherProvider,
};

/// What the dashboard currently shows.
#[derive(Debug, Clone)]
pub struct View {
    pub page: Page,
    pub snapshot: Canvas,
    pub trend: Canvas,
}

impl View {
    /// Hide every weather region and show `status` alone.
    fn clear(&mut self, status: Status) {
        self.page.clear();
        self.page.status = status;
        self.snapshot.clear();
        self.trend.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The results were rendered.
    Rendered,
    /// A newer search started while this one was in flight; its results were dropped.
    Superseded,
}

/// Owns the rendering context and runs searches against a provider.
///
/// Searches may overlap. Every search takes a generation number when it starts
/// and only the newest generation is allowed to touch the view.
#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    generation: AtomicU64,
    view: Mutex<View>,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>, icon_base_url: &str, chart_width: f64) -> Self {
        Self {
            provider,
            generation: AtomicU64::new(0),
            view: Mutex::new(View {
                page: Page::new(icon_base_url),
                snapshot: Canvas::new(chart_width),
                trend: Canvas::new(chart_width),
            }),
        }
    }

    /// Snapshot of what is on screen right now.
    pub fn view(&self) -> View {
        self.view.lock().clone()
    }

    pub fn set_chart_width(&self, width: f64) {
        let mut view = self.view.lock();
        view.snapshot.set_layout_width(width);
        view.trend.set_layout_width(width);
    }

    /// Search for `city` and render the results.
    ///
    /// Errors are also written to the page status; the dashboard stays usable
    /// for the next search either way.
    pub async fn search(&self, city: &str) -> Result<SearchOutcome, WeatherError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let city = city.trim();
        if city.is_empty() {
            let err = WeatherError::MalformedInput;
            self.view.lock().page.status = Status::Error(err.to_string());
            return Err(err);
        }

        self.view.lock().clear(Status::Loading);

        let result = self.fetch(city).await;

        let mut view = self.view.lock();
        if self.generation.load(Ordering::SeqCst) != ticket {
            warn!(city, ticket, "discarding superseded search results");
            return result.map(|_| SearchOutcome::Superseded);
        }

        match result {
            Ok((current, days)) => {
                view.page.render_current(&current);
                view.page.render_forecast(&days);
                draw_snapshot_chart(&mut view.snapshot, &current);
                draw_trend_chart(&mut view.trend, &days);
                view.page.status = Status::Ready;

                info!(city, days = days.len(), "rendered weather");
                Ok(SearchOutcome::Rendered)
            }
            Err(err) => {
                warn!(city, error = %err, "weather search failed");
                view.clear(Status::Error(format!(
                    "Error: {err}. Please check the city name and try again."
                )));
                Err(err)
            }
        }
    }

    async fn fetch(&self, city: &str) -> Result<(CurrentWeather, Vec<DailyForecast>), WeatherError> {
        let current = self.provider.fetch_current(city).await?;
        let forecast = self.provider.fetch_forecast(current.coord).await?;
        let days = aggregate(&forecast.samples, &forecast.utc_offset());

        Ok((current, days))
    }
}
