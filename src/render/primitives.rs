//! Canvas geometry and the drawing instructions handed to the display layer.

use crate::render::color::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Whether `(x, y)` lies inside; the right and bottom edges are exclusive.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Target surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
    pub margin: i32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            margin: 50,
        }
    }
}

impl Canvas {
    pub fn new(width: i32, height: i32, margin: i32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Width between the margins; saturates instead of overflowing.
    pub fn plot_width(&self) -> i32 {
        self.width.saturating_sub(self.margin.saturating_mul(2))
    }

    pub fn plot_height(&self) -> i32 {
        self.height.saturating_sub(self.margin.saturating_mul(2))
    }

    /// The margin-bounded plot area, or `None` when it has no pixels.
    pub fn plot_rect(&self) -> Option<Rect> {
        if self.margin < 0 || self.plot_width() <= 0 || self.plot_height() <= 0 {
            return None;
        }
        Some(Rect {
            x: self.margin,
            y: self.margin,
            width: self.plot_width(),
            height: self.plot_height(),
        })
    }

    /// Maps normalized plot coordinates to pixels. `v` grows upward from the
    /// bottom plot edge.
    pub fn plot_point(&self, u: f64, v: f64) -> Point {
        let x = self.margin as f64 + self.plot_width() as f64 * u;
        let y = self.height as f64 - self.margin as f64 - self.plot_height() as f64 * v;
        Point::new(x as i32, y as i32)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Fill `rect` with the color-space ramp, see `BackgroundGradient`.
    Gradient { rect: Rect },
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        width: u32,
    },
    Circle {
        center: Point,
        radius: i32,
        fill: Rgb,
        outline: Rgb,
    },
    FilledRect { rect: Rect, fill: Rgb },
    Text {
        at: Point,
        text: String,
        color: Rgb,
        /// Point size; `None` keeps the surface default.
        size: Option<u32>,
    },
}

impl Primitive {
    pub fn text(at: Point, text: impl Into<String>) -> Self {
        Primitive::Text {
            at,
            text: text.into(),
            color: Rgb::BLACK,
            size: None,
        }
    }
}

/// Ordered drawing instructions for one paint cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    pub primitives: Vec<Primitive>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    /// Every text string, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }
}
