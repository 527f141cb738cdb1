//! Plain-text rendering of the dashboard view.

use std::fmt::Write as _;

use weather_core::{
    Comparison, Metric, View,
    present::{Background, Overlay, Status},
};

pub fn render_view(view: &View) -> String {
    let page = &view.page;
    let mut out = String::new();

    match &page.status {
        Status::Idle => return out,
        Status::Loading => {
            out.push_str("Loading...\n");
            return out;
        }
        Status::Error(message) => {
            let _ = writeln!(out, "{message}");
            return out;
        }
        Status::Ready => {}
    }

    if let Some(current) = &page.current {
        let _ = writeln!(out, "{}  {}", current.location, page.date_time);
        let _ = writeln!(
            out,
            "{} {}  {} (feels like {}°)  {}",
            current.icon_glyph,
            current.description,
            current.temperature,
            current.feels_like,
            mood(page.background, page.overlay),
        );
        let _ = writeln!(
            out,
            "  Humidity {}%   Wind {} m/s {}   Pressure {} hPa",
            current.humidity, current.wind_speed, current.wind_direction, current.pressure,
        );
        let _ = writeln!(
            out,
            "  Visibility {} km   Cloudiness {}   Sunrise {}   Sunset {}",
            current.visibility_km, current.cloudiness, current.sunrise, current.sunset,
        );
    }

    if !page.forecast.is_empty() {
        out.push_str("\nForecast\n");
        for card in &page.forecast {
            let _ = writeln!(
                out,
                "  {:<12} {}  {:>7}  {} {}  {}",
                card.date,
                card.icon_glyph,
                card.avg_temp,
                card.max_temp,
                card.min_temp,
                card.description,
            );
        }
    }

    let _ = writeln!(out, "\nLast updated: {}", page.last_updated);
    out
}

/// Table of readings per city, then averages and the cities that failed.
pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();

    if !comparison.readings.is_empty() {
        let _ = writeln!(
            out,
            "{:<14} {:>8} {:>9} {:>9} {:>9} {:>9}  Description",
            "City", "Temp °C", "Feels °C", "Humidity", "Pressure", "Wind m/s",
        );
        for r in &comparison.readings {
            let _ = writeln!(
                out,
                "{:<14} {:>8.1} {:>9.1} {:>8}% {:>9} {:>9.1}  {}",
                r.city,
                r.temperature_c,
                r.feels_like_c,
                r.humidity_pct,
                r.pressure_hpa,
                r.wind_speed_mps,
                r.description,
            );
        }
    }

    if let (Some(humidity), Some(wind)) =
        (comparison.average(Metric::Humidity), comparison.average(Metric::WindSpeed))
    {
        let _ = writeln!(out, "\nAverage humidity {humidity:.1}%   Average wind {wind:.1} m/s");
    }

    for (city, err) in &comparison.failures {
        let city = if city.is_empty() { "(blank)" } else { city.as_str() };
        let _ = writeln!(out, "Skipped {city}: {err}");
    }

    out
}

fn mood(background: Background, overlay: Option<Overlay>) -> String {
    let sky = match background {
        Background::Neutral => return String::new(),
        Background::Sunny => "[sunny]",
        Background::Cloudy => "[cloudy]",
        Background::Rainy => "[rainy]",
        Background::Snowy => "[snowy]",
    };

    match overlay {
        Some(Overlay::Rain) => format!("{sky} ' ' '"),
        Some(Overlay::Snow) => format!("{sky} * * *"),
        None => sky.to_string(),
    }
}
