use crate::compare::{CityReading, Metric};

use super::{Anchor, Canvas, Color, TextStyle};

const TOP: f64 = 40.0;
const BOTTOM: f64 = 20.0;
const ROW_HEIGHT: f64 = 32.0;
const BAR_HEIGHT: f64 = 20.0;
const LABEL_WIDTH: f64 = 100.0;
const VALUE_ROOM: f64 = 80.0;

const TEMPERATURE: Color = Color("#f39c12");
const FEELS_LIKE: Color = Color("#e74c3c");

fn metric_color(metric: Metric) -> Color {
    match metric {
        Metric::Temperature => TEMPERATURE,
        Metric::Humidity => Color("#3498db"),
        Metric::WindSpeed => Color("#1abc9c"),
        Metric::Pressure => Color("#27ae60"),
        Metric::FeelsLike => FEELS_LIKE,
    }
}

/// Horizontal value axis shared by every bar of one chart.
///
/// The axis always includes zero, so negative readings extend left of it.
#[derive(Debug, Clone, Copy)]
struct ValueAxis {
    zero_x: f64,
    px_per_unit: f64,
}

impl ValueAxis {
    fn new(values: impl IntoIterator<Item = f64>, left: f64, plot_width: f64) -> Self {
        let (lo, hi) = values
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let span = hi - lo;

        if span > 0.0 {
            let px_per_unit = plot_width / span;
            Self { zero_x: left - lo * px_per_unit, px_per_unit }
        } else {
            Self { zero_x: left, px_per_unit: 0.0 }
        }
    }

    /// Left edge and width of the bar for `value`.
    fn bar(&self, value: f64) -> (f64, f64) {
        let length = value * self.px_per_unit;
        (self.zero_x.min(self.zero_x + length), length.abs())
    }

    /// Where a value label starts: just past the bar's far end.
    fn label_x(&self, value: f64) -> f64 {
        self.zero_x.max(self.zero_x + value * self.px_per_unit) + 5.0
    }
}

fn layout(canvas: &mut Canvas, rows: usize, title: &str) -> (f64, f64) {
    canvas.reset(TOP + rows as f64 * ROW_HEIGHT + BOTTOM);

    let width = canvas.width();
    canvas.fill_text(
        title,
        width / 2.0,
        24.0,
        TextStyle::new(15.0, Anchor::Middle, Color::TEXT).bold(),
    );

    (LABEL_WIDTH, (width - LABEL_WIDTH - VALUE_ROOM).max(0.0))
}

fn city_label(canvas: &mut Canvas, city: &str, row_top: f64) {
    canvas.fill_text(
        city,
        LABEL_WIDTH - 8.0,
        row_top + ROW_HEIGHT / 2.0 + 4.0,
        TextStyle::new(11.0, Anchor::End, Color::TEXT),
    );
}

fn zero_line(canvas: &mut Canvas, axis: &ValueAxis) {
    let bottom = canvas.height() - BOTTOM;
    canvas.line((axis.zero_x, TOP - 4.0), (axis.zero_x, bottom + 4.0), Color::FAINT, 1.0);
}

/// One horizontal bar per city for a single metric, labeled with the value.
pub fn draw_metric_chart(canvas: &mut Canvas, readings: &[CityReading], metric: Metric) {
    let (left, plot_width) =
        layout(canvas, readings.len(), &format!("{} ({})", metric.title(), metric.unit()));
    let axis = ValueAxis::new(readings.iter().map(|r| r.value(metric)), left, plot_width);
    let color = metric_color(metric);

    for (i, reading) in readings.iter().enumerate() {
        let row_top = TOP + i as f64 * ROW_HEIGHT;
        let value = reading.value(metric);
        let (x, width) = axis.bar(value);
        let y = row_top + (ROW_HEIGHT - BAR_HEIGHT) / 2.0;

        city_label(canvas, &reading.city, row_top);
        canvas.fill_rect(x, y, width, BAR_HEIGHT, color);
        canvas.fill_text(
            format!("{value:.1}{}", metric.unit()),
            axis.label_x(value),
            y + BAR_HEIGHT / 2.0 + 4.0,
            TextStyle::new(10.0, Anchor::Start, Color::TEXT).bold(),
        );
    }

    zero_line(canvas, &axis);
}

/// Temperature and feels-like side by side for every city.
pub fn draw_feels_like_chart(canvas: &mut Canvas, readings: &[CityReading]) {
    let (left, plot_width) = layout(canvas, readings.len(), "Temperature & Feels Like");
    let axis = ValueAxis::new(
        readings.iter().flat_map(|r| [r.temperature_c, r.feels_like_c]),
        left,
        plot_width,
    );
    let half = BAR_HEIGHT / 2.0;

    for (i, reading) in readings.iter().enumerate() {
        let row_top = TOP + i as f64 * ROW_HEIGHT;
        let y = row_top + (ROW_HEIGHT - BAR_HEIGHT) / 2.0;

        city_label(canvas, &reading.city, row_top);
        for (offset, value, color) in [
            (0.0, reading.temperature_c, TEMPERATURE),
            (half, reading.feels_like_c, FEELS_LIKE),
        ] {
            let (x, width) = axis.bar(value);
            canvas.fill_rect(x, y + offset, width, half, color);
            canvas.fill_text(
                format!("{value:.1}°C"),
                axis.label_x(value),
                y + offset + half - 1.0,
                TextStyle::new(9.0, Anchor::Start, Color::MUTED),
            );
        }
    }

    zero_line(canvas, &axis);

    let legend_x = canvas.width() - 110.0;
    for (i, (text, color)) in [("Temperature", TEMPERATURE), ("Feels Like", FEELS_LIKE)]
        .into_iter()
        .enumerate()
    {
        let y = 12.0 + i as f64 * 14.0;
        canvas.fill_rect(legend_x, y - 8.0, 10.0, 10.0, color);
        canvas.fill_text(text, legend_x + 14.0, y, TextStyle::new(10.0, Anchor::Start, Color::TEXT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Shape;

    fn reading(city: &str, temp: f64, feels: f64) -> CityReading {
        CityReading {
            city: city.into(),
            temperature_c: temp,
            feels_like_c: feels,
            humidity_pct: 60,
            pressure_hpa: 1000,
            wind_speed_mps: 4.0,
            description: "clear sky".into(),
        }
    }

    fn rects(canvas: &Canvas) -> Vec<(f64, f64, f64, f64)> {
        canvas
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Rect { x, y, width, height, .. } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    fn texts(canvas: &Canvas) -> Vec<String> {
        canvas
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bars_scale_to_largest_reading() {
        let mut canvas = Canvas::new(500.0);
        let readings = [reading("London", 10.0, 8.0), reading("Mumbai", 32.0, 38.0)];

        draw_metric_chart(&mut canvas, &readings, Metric::Temperature);

        // plot = 500 - 100 - 80 = 320 px for 0..32
        let bars = rects(&canvas);
        assert_eq!(bars, vec![(100.0, 46.0, 100.0, 20.0), (100.0, 78.0, 320.0, 20.0)]);
        assert_eq!(canvas.height(), 40.0 + 2.0 * 32.0 + 20.0);
        assert_eq!(
            texts(&canvas),
            vec!["Temperature (°C)", "London", "10.0°C", "Mumbai", "32.0°C"]
        );
    }

    #[test]
    fn negative_readings_extend_left_of_zero() {
        let mut canvas = Canvas::new(500.0);
        let readings = [reading("Yakutsk", -30.0, -38.0), reading("Cairo", 10.0, 9.0)];

        draw_metric_chart(&mut canvas, &readings, Metric::Temperature);

        // range -30..10 over 320 px: 8 px per degree, zero at x = 340
        let bars = rects(&canvas);
        assert_eq!(bars[0].0, 100.0);
        assert_eq!(bars[0].2, 240.0);
        assert_eq!(bars[1].0, 340.0);
        assert_eq!(bars[1].2, 80.0);
        match canvas.shapes().last() {
            Some(Shape::Polyline { points, .. }) => assert_eq!(points[0].0, 340.0),
            other => panic!("expected zero line last, got {other:?}"),
        }
    }

    #[test]
    fn all_zero_metric_draws_empty_bars() {
        let mut canvas = Canvas::new(500.0);
        let mut calm = reading("Calm", 1.0, 1.0);
        calm.wind_speed_mps = 0.0;

        draw_metric_chart(&mut canvas, &[calm], Metric::WindSpeed);

        assert_eq!(rects(&canvas), vec![(100.0, 46.0, 0.0, 20.0)]);
        assert!(texts(&canvas).contains(&"0.0m/s".to_string()));
    }

    #[test]
    fn feels_like_chart_pairs_bars_and_adds_legend() {
        let mut canvas = Canvas::new(500.0);
        let readings = [reading("Paris", 16.0, 15.0), reading("Tokyo", 8.0, 6.0)];

        draw_feels_like_chart(&mut canvas, &readings);

        // two bars per city plus two legend swatches
        let bars = rects(&canvas);
        assert_eq!(bars.len(), 6);
        assert_eq!(bars[0], (100.0, 46.0, 320.0, 10.0));
        assert_eq!(bars[1], (100.0, 56.0, 300.0, 10.0));
        let svg = canvas.to_svg();
        assert!(svg.contains("Temperature &amp; Feels Like"));
        assert!(svg.contains(">Feels Like</text>"));
    }

    #[test]
    fn redraw_with_fewer_cities_shrinks() {
        let mut canvas = Canvas::new(400.0);
        let readings = [reading("A", 1.0, 1.0), reading("B", 2.0, 2.0), reading("C", 3.0, 3.0)];
        draw_metric_chart(&mut canvas, &readings, Metric::Humidity);

        draw_metric_chart(&mut canvas, &readings[..1], Metric::Humidity);

        assert_eq!(rects(&canvas).len(), 1);
        assert_eq!(canvas.height(), 40.0 + 32.0 + 20.0);
    }
}
