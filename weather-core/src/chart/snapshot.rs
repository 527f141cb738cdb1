use crate::{model::CurrentWeather, present::whole};

use super::{Anchor, Canvas, Color, TextStyle};

pub const SNAPSHOT_HEIGHT: f64 = 250.0;

const BAR_WIDTH: f64 = 60.0;
const CAPTIONS: [&str; 4] = ["Temperature", "Feels Like", "Humidity", "Wind Speed"];
const COLORS: [Color; 4] = [Color::RED, Color::BLUE, Color::YELLOW, Color::TEAL];

/// Four bars summarizing one reading: temperature, feels-like, humidity and wind.
///
/// Humidity is drawn at half scale and wind at triple scale so the four series
/// share one axis. Labels always show the unscaled reading.
pub fn draw_snapshot_chart(canvas: &mut Canvas, data: &CurrentWeather) {
    canvas.reset(SNAPSHOT_HEIGHT);

    let width = canvas.width();
    let height = canvas.height();

    let raw = [
        data.temperature_c,
        data.feels_like_c,
        f64::from(data.humidity_pct),
        data.wind_speed_mps,
    ];
    let scaled = [raw[0], raw[1], raw[2] / 2.0, raw[3] * 3.0];

    let max_value = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bar_count = scaled.len() as f64;
    let spacing = ((width - BAR_WIDTH * bar_count) / (bar_count + 1.0)).max(0.0);
    let chart_height = height - 60.0;

    for (i, value) in scaled.iter().enumerate() {
        // Non-positive readings collapse onto the baseline.
        let bar_height = if max_value > 0.0 {
            (value / max_value * chart_height).max(0.0)
        } else {
            0.0
        };
        let x = spacing + (BAR_WIDTH + spacing) * i as f64;
        let y = height - bar_height - 30.0;
        let center = x + BAR_WIDTH / 2.0;

        canvas.fill_rect(x, y, BAR_WIDTH, bar_height, COLORS[i]);
        canvas.fill_text(
            whole(raw[i]),
            center,
            y - 5.0,
            TextStyle::new(14.0, Anchor::Middle, Color::TEXT).bold(),
        );
        canvas.fill_text(
            CAPTIONS[i],
            center,
            height - 10.0,
            TextStyle::new(11.0, Anchor::Middle, Color::TEXT),
        );
    }
}
