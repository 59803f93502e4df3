//! The color-space ramp painted behind the plot.
//!
//! Red grows left to right, green grows bottom to top, and blue is strongest in
//! the bottom-left corner, fading toward whichever of red or green dominates.

use crate::render::color::Rgb;
use crate::render::primitives::{Canvas, Rect};
use ndarray::Array3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundGradient {
    plot: Rect,
}

impl BackgroundGradient {
    /// `None` when the canvas has no plot area.
    pub fn new(canvas: &Canvas) -> Option<Self> {
        canvas.plot_rect().map(|plot| Self { plot })
    }

    pub fn rect(&self) -> Rect {
        self.plot
    }

    /// Normalized plot coordinates of pixel `(x, y)`.
    fn normalize(&self, x: i32, y: i32) -> (f64, f64) {
        let width = self.plot.width as f64;
        let height = self.plot.height as f64;
        let norm_x = (x - self.plot.x) as f64 / width;
        let norm_y = (height - (y - self.plot.y) as f64) / height;
        (norm_x, norm_y)
    }

    /// Color of pixel `(x, y)`, or `None` outside the plot area.
    pub fn color_at(&self, x: i32, y: i32) -> Option<Rgb> {
        if !self.plot.contains(x, y) {
            return None;
        }
        let (nx, ny) = self.normalize(x, y);
        Some(Rgb::from_unit(nx, ny, 1.0 - nx.max(ny)))
    }

    /// Renders the plot area into a `height x width x 3` RGB image.
    pub fn rasterize(&self) -> Array3<u8> {
        let (w, h) = (self.plot.width as usize, self.plot.height as usize);
        let mut image = Array3::<u8>::zeros((h, w, 3));
        for row in 0..h {
            let y = self.plot.y + row as i32;
            for col in 0..w {
                let x = self.plot.x + col as i32;
                let (nx, ny) = self.normalize(x, y);
                let color = Rgb::from_unit(nx, ny, 1.0 - nx.max(ny));
                image[[row, col, 0]] = color.r;
                image[[row, col, 1]] = color.g;
                image[[row, col, 2]] = color.b;
            }
        }
        tracing::trace!(width = w, height = h, "background rasterized");
        image
    }
}
