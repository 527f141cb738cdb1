use crate::{aggregate::MAX_DAYS, model::DailyForecast, present::whole};

use super::{Anchor, Canvas, Color, TextStyle};

pub const TREND_HEIGHT: f64 = 300.0;

const PADDING: f64 = 40.0;
const GRID_BANDS: usize = 5;
const LINE_WIDTH: f64 = 3.0;
const POINT_RADIUS: f64 = 5.0;
const LEGEND: [(Color, &str); 3] =
    [(Color::RED, "Max Temp"), (Color::BLUE, "Avg Temp"), (Color::TEAL, "Min Temp")];

/// Maps temperatures onto the vertical extent of the plot area.
#[derive(Debug, Clone, Copy)]
struct YScale {
    min_value: f64,
    range: f64,
    top: f64,
    height: f64,
}

impl YScale {
    fn y(&self, value: f64) -> f64 {
        // A flat series has nothing to spread out; park it mid-plot.
        if self.range.abs() < f64::EPSILON {
            return self.top + self.height / 2.0;
        }
        self.top + self.height - (value - self.min_value) / self.range * self.height
    }
}

/// Max/avg/min temperature lines over up to seven days.
///
/// Layers are drawn back to front: gridlines, the max, avg and min lines,
/// point markers, rotated day labels, then the legend.
pub fn draw_trend_chart(canvas: &mut Canvas, days: &[DailyForecast]) {
    canvas.reset(TREND_HEIGHT);

    let days = &days[..days.len().min(MAX_DAYS)];
    if days.is_empty() {
        return;
    }

    let width = canvas.width();
    let height = canvas.height();
    let chart_width = width - PADDING * 2.0;
    let chart_height = height - PADDING * 2.0;

    let series: [Vec<f64>; 3] = [
        days.iter().map(|d| d.max_temp_c).collect(),
        days.iter().map(|d| d.avg_temp_c).collect(),
        days.iter().map(|d| d.min_temp_c).collect(),
    ];

    let all = || series.iter().flatten().copied();
    let max_value = all().fold(f64::NEG_INFINITY, f64::max);
    let min_value = all().fold(f64::INFINITY, f64::min);
    let range = max_value - min_value;
    let scale = YScale { min_value, range, top: PADDING, height: chart_height };

    let x_at = |i: usize| {
        if days.len() == 1 {
            PADDING + chart_width / 2.0
        } else {
            PADDING + chart_width / (days.len() - 1) as f64 * i as f64
        }
    };

    for band in 0..=GRID_BANDS {
        let y = PADDING + chart_height / GRID_BANDS as f64 * band as f64;
        canvas.line((PADDING, y), (width - PADDING, y), Color::GRID, 1.0);

        let temp = max_value - range / GRID_BANDS as f64 * band as f64;
        canvas.fill_text(
            format!("{}°", whole(temp)),
            PADDING - 10.0,
            y + 4.0,
            TextStyle::new(11.0, Anchor::End, Color::FAINT),
        );
    }

    for (values, (color, _)) in series.iter().zip(LEGEND) {
        let points = values.iter().enumerate().map(|(i, &t)| (x_at(i), scale.y(t))).collect();
        canvas.polyline(points, color, LINE_WIDTH);
    }

    for i in 0..days.len() {
        for (values, (color, _)) in series.iter().zip(LEGEND) {
            canvas.fill_circle(x_at(i), scale.y(values[i]), POINT_RADIUS, color);
        }
    }

    let label_style = TextStyle::new(11.0, Anchor::Middle, Color::MUTED).rotated(-45.0);
    for (i, day) in days.iter().enumerate() {
        canvas.fill_text(day.weekday(), x_at(i), height - 10.0, label_style);
    }

    let legend_x = width - 150.0;
    let legend_y = 15.0;
    for (i, (color, text)) in LEGEND.iter().enumerate() {
        let y = legend_y + i as f64 * 20.0;
        canvas.fill_rect(legend_x, y, 15.0, 3.0, *color);
        canvas.fill_text(
            *text,
            legend_x + 20.0,
            y + 3.0,
            TextStyle::new(11.0, Anchor::Start, Color::TEXT),
        );
    }
}
