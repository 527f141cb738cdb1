//! Drawing surface shared by the dashboard and comparison charts.
//!
//! A [`Canvas`] records shapes in draw order, so later shapes sit on top of
//! earlier ones, and can be serialized to a standalone SVG document.

use std::fmt::Write as _;

pub mod comparison;
pub mod snapshot;
pub mod trend;

pub use comparison::{draw_feels_like_chart, draw_metric_chart};
pub use snapshot::{SNAPSHOT_HEIGHT, draw_snapshot_chart};
pub use trend::{TREND_HEIGHT, draw_trend_chart};

/// CSS color literal, e.g. `#FF6384`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub &'static str);

impl Color {
    pub const RED: Color = Color("#FF6384");
    pub const BLUE: Color = Color("#36A2EB");
    pub const YELLOW: Color = Color("#FFCE56");
    pub const TEAL: Color = Color("#4BC0C0");
    pub const TEXT: Color = Color("#333");
    pub const MUTED: Color = Color("#666");
    pub const FAINT: Color = Color("#999");
    pub const GRID: Color = Color("#e0e0e0");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_svg(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub anchor: Anchor,
    pub color: Color,
    /// Clockwise rotation around the text origin, in degrees.
    pub rotate: f64,
}

impl TextStyle {
    pub const fn new(size: f64, anchor: Anchor, color: Color) -> Self {
        Self { size, bold: false, anchor, color, rotate: 0.0 }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64, fill: Color },
    Polyline { points: Vec<(f64, f64)>, stroke: Color, width: f64 },
    Circle { cx: f64, cy: f64, r: f64, fill: Color },
    Text { x: f64, y: f64, text: String, style: TextStyle },
}

/// Retained-mode drawing surface with a layout width and a fixed height.
#[derive(Debug, Clone)]
pub struct Canvas {
    layout_width: f64,
    width: f64,
    height: f64,
    shapes: Vec<Shape>,
}

impl Canvas {
    pub fn new(layout_width: f64) -> Self {
        Self { layout_width, width: layout_width, height: 0.0, shapes: Vec::new() }
    }

    pub fn set_layout_width(&mut self, width: f64) {
        self.layout_width = width;
    }

    /// Resize to the layout width and `height`, dropping everything drawn so far.
    pub fn reset(&mut self, height: f64) {
        self.width = self.layout_width;
        self.height = height;
        self.shapes.clear();
    }

    /// Drop everything drawn, keeping the current size.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Color) {
        self.shapes.push(Shape::Rect { x, y, width, height, fill });
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Color, width: f64) {
        self.polyline(vec![from, to], stroke, width);
    }

    pub fn polyline(&mut self, points: Vec<(f64, f64)>, stroke: Color, width: f64) {
        self.shapes.push(Shape::Polyline { points, stroke, width });
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, fill: Color) {
        self.shapes.push(Shape::Circle { cx, cy, r, fill });
    }

    pub fn fill_text(&mut self, text: impl Into<String>, x: f64, y: f64, style: TextStyle) {
        self.shapes.push(Shape::Text { x, y, text: text.into(), style });
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Arial, sans-serif">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        );

        for shape in &self.shapes {
            let _ = match shape {
                Shape::Rect { x, y, width, height, fill } => writeln!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*width),
                    fmt_num(*height),
                    fill.0
                ),
                Shape::Polyline { points, stroke, width } => {
                    let points = points
                        .iter()
                        .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
                        .collect::<Vec<_>>()
                        .join(" ");
                    writeln!(
                        out,
                        r#"  <polyline points="{points}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
                        stroke.0,
                        fmt_num(*width)
                    )
                }
                Shape::Circle { cx, cy, r, fill } => writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    fmt_num(*cx),
                    fmt_num(*cy),
                    fmt_num(*r),
                    fill.0
                ),
                Shape::Text { x, y, text, style } => {
                    let weight = if style.bold { r#" font-weight="bold""# } else { "" };
                    let transform = if style.rotate == 0.0 {
                        String::new()
                    } else {
                        format!(
                            r#" transform="rotate({} {} {})""#,
                            fmt_num(style.rotate),
                            fmt_num(*x),
                            fmt_num(*y)
                        )
                    };
                    writeln!(
                        out,
                        r#"  <text x="{}" y="{}" font-size="{}"{weight} text-anchor="{}" fill="{}"{transform}>{}</text>"#,
                        fmt_num(*x),
                        fmt_num(*y),
                        fmt_num(style.size),
                        style.anchor.as_svg(),
                        style.color.0,
                        escape_xml(text)
                    )
                }
            };
        }

        out.push_str("</svg>\n");
        out
    }
}

fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    (rounded + 0.0).to_string()
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_and_takes_layout_width() {
        let mut canvas = Canvas::new(640.0);
        canvas.reset(100.0);
        canvas.fill_rect(0.0, 0.0, 10.0, 10.0, Color::RED);

        canvas.set_layout_width(320.0);
        canvas.reset(200.0);

        assert!(canvas.shapes().is_empty());
        assert_eq!(canvas.width(), 320.0);
        assert_eq!(canvas.height(), 200.0);
    }

    #[test]
    fn svg_keeps_draw_order_and_escapes_text() {
        let mut canvas = Canvas::new(200.0);
        canvas.reset(100.0);
        canvas.line((0.0, 10.0), (200.0, 10.0), Color::GRID, 1.0);
        canvas.fill_text(
            "Tom & <Jerry>",
            50.0,
            60.0,
            TextStyle::new(11.0, Anchor::Middle, Color::MUTED).rotated(-45.0),
        );

        let svg = canvas.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="200" height="100""#));
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(svg.contains(r#"transform="rotate(-45 50 60)""#));
        let line_at = svg.find("<polyline").unwrap();
        let text_at = svg.find("<text").unwrap();
        assert!(line_at < text_at);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(1.23456), "1.23");
        assert_eq!(fmt_num(-0.001), "0");
    }
}
