use crate::core::errors::ConfigError;
use crate::core::{BASIS_LABELS, DIM, QuantumState};
use crate::render::color::{Rgb, channel_colors, state_color};
use crate::render::gradient::BackgroundGradient;
use crate::render::layout::Layout;
use crate::render::primitives::{Canvas, Frame, Point, Primitive, Rect};
use serde::Serialize;

/// Values along both axes that get a tick label.
const TICKS: [i32; 4] = [0, 64, 128, 192];

/// One basis-state glyph: a probability circle with a phase needle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Glyph {
    pub index: usize,
    pub center: Point,
    pub radius: i32,
    /// End of the phase needle drawn from `center`.
    pub phase_tip: Point,
    pub fill: Rgb,
    pub caption: String,
    pub caption_at: Point,
}

/// The aggregate state color.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Swatch {
    pub color: Rgb,
    pub hex: String,
}

/// Per-basis color chip: the palette color dimmed by the probability.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelSwatch {
    pub label: &'static str,
    pub color: Rgb,
    pub hex: String,
    pub probability: f64,
    pub phase: f64,
}

impl ChannelSwatch {
    /// `"|01⟩ #003F00  P=0.250  ∠0.00"`
    pub fn caption(&self) -> String {
        format!(
            "{} {}  P={:.3}  ∠{:.2}",
            self.label, self.hex, self.probability, self.phase
        )
    }
}

/// Turns a state and a canvas into drawing instructions.
///
/// Holds only the layout table; every call is independent.
#[derive(Clone, Debug, Default)]
pub struct StateRenderer {
    layout: Layout,
}

impl StateRenderer {
    /// Wraps a layout after checking it with [`Layout::validate`].
    pub fn new(layout: Layout) -> Result<Self, ConfigError> {
        layout.validate()?;
        Ok(Self { layout })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Full frame: background, axes, glyphs, aggregate swatch.
    ///
    /// Nothing is drawn without a state or when the canvas has no plot area.
    pub fn render(&self, state: Option<&QuantumState>, canvas: &Canvas) -> Frame {
        let mut frame = Frame::default();
        let Some(state) = state else {
            return frame;
        };
        let Some(gradient) = BackgroundGradient::new(canvas) else {
            tracing::debug!(?canvas, "canvas has no plot area, nothing to draw");
            return frame;
        };

        frame.primitives.push(Primitive::Gradient {
            rect: gradient.rect(),
        });
        frame.extend(self.axes(canvas));
        for glyph in self.glyphs(state, canvas) {
            frame.extend(glyph_primitives(glyph));
        }
        frame.extend(self.swatch_primitives(&self.state_swatch(state), canvas));

        tracing::debug!(primitives = frame.len(), "frame rendered");
        frame
    }

    /// Axis lines, tick labels, axis letters and corner ket labels.
    ///
    /// Empty when the canvas has no plot area.
    pub fn axes(&self, canvas: &Canvas) -> Vec<Primitive> {
        if canvas.plot_rect().is_none() {
            return Vec::new();
        }
        let Canvas {
            width: w,
            height: h,
            margin: m,
        } = *canvas;
        let (pw, ph) = (canvas.plot_width() as f64, canvas.plot_height() as f64);
        let origin = Point::new(m, h - m);
        let below = (h - m).saturating_add(15);

        let mut out = vec![
            Primitive::Line {
                from: origin,
                to: Point::new(w - m, h - m),
                color: Rgb::BLACK,
                width: 2,
            },
            Primitive::Line {
                from: origin,
                to: Point::new(m, m),
                color: Rgb::BLACK,
                width: 2,
            },
            Primitive::text(Point::new((w - m).saturating_add(5), below), "R"),
            Primitive::text(Point::new(m - 15, m - 5), "G"),
        ];

        for tick in TICKS {
            let x = m as f64 + pw * tick as f64 / 255.0;
            let y = (h - m) as f64 - ph * tick as f64 / 255.0;
            out.push(Primitive::text(Point::new(x as i32, below), tick.to_string()));
            out.push(Primitive::text(Point::new(m - 30, y as i32), tick.to_string()));
        }

        let corners = self.layout.corners;
        let placed = [
            (corners.bottom_left, Point::new(m, below)),
            (corners.top_left, Point::new(m, m + 15)),
            (corners.bottom_right, Point::new(w - m - 30, below)),
            (corners.top_right, Point::new(w - m - 30, m + 15)),
        ];
        for (ket, at) in placed {
            out.push(Primitive::Text {
                at,
                text: BASIS_LABELS[ket].to_string(),
                color: Rgb::BLACK,
                size: Some(self.layout.label_font_size),
            });
        }
        out
    }

    /// The four basis glyphs, in basis-index order.
    pub fn glyphs(&self, state: &QuantumState, canvas: &Canvas) -> [Glyph; DIM] {
        let probabilities = state.probabilities();
        let phases = state.phases();

        std::array::from_fn(|i| {
            let [u, v] = self.layout.positions[i];
            let center = canvas.plot_point(u, v);
            let radius = self.layout.radius(probabilities[i]);
            let r = radius as f64;
            let phase_tip = Point::new(
                (center.x as f64 + r * phases[i].cos()) as i32,
                (center.y as f64 - r * phases[i].sin()) as i32,
            );
            let [dx, dy] = self.layout.label_offsets[i];

            Glyph {
                index: i,
                center,
                radius,
                phase_tip,
                fill: self.layout.palette[i],
                caption: format!(
                    "{}: {:.3}, ∠{:.2}",
                    BASIS_LABELS[i], probabilities[i], phases[i]
                ),
                caption_at: Point::new(center.x.saturating_add(dx), center.y.saturating_add(dy)),
            }
        })
    }

    pub fn state_swatch(&self, state: &QuantumState) -> Swatch {
        let color = state_color(state);
        Swatch {
            color,
            hex: color.hex(),
        }
    }

    pub fn channel_swatches(&self, state: &QuantumState) -> [ChannelSwatch; DIM] {
        let colors = channel_colors(state, &self.layout.palette);
        let probabilities = state.probabilities();
        let phases = state.phases();

        std::array::from_fn(|i| ChannelSwatch {
            label: BASIS_LABELS[i],
            color: colors[i],
            hex: colors[i].hex(),
            probability: probabilities[i],
            phase: phases[i],
        })
    }

    fn swatch_primitives(&self, swatch: &Swatch, canvas: &Canvas) -> Vec<Primitive> {
        let geometry = self.layout.swatch;
        let x = canvas.width.saturating_sub(geometry.inset);
        let y = canvas.height.saturating_sub(geometry.inset);
        vec![
            Primitive::FilledRect {
                rect: Rect {
                    x,
                    y,
                    width: geometry.size,
                    height: geometry.size,
                },
                fill: swatch.color,
            },
            Primitive::text(Point::new(x, y.saturating_sub(10)), "State Color"),
            Primitive::text(
                Point::new(x, y.saturating_add(geometry.size).saturating_add(10)),
                format!("Hex: {}", swatch.hex),
            ),
        ]
    }
}

fn glyph_primitives(glyph: Glyph) -> [Primitive; 3] {
    [
        Primitive::Circle {
            center: glyph.center,
            radius: glyph.radius,
            fill: glyph.fill,
            outline: Rgb::BLACK,
        },
        Primitive::Line {
            from: glyph.center,
            to: glyph.phase_tip,
            color: Rgb::BLACK,
            width: 1,
        },
        Primitive::text(glyph.caption_at, glyph.caption),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn state(values: [(f64, f64); DIM]) -> QuantumState {
        QuantumState::new(values.map(|(re, im)| Complex64::new(re, im)))
    }

    #[test]
    fn missing_state_draws_nothing() {
        let frame = StateRenderer::default().render(None, &Canvas::default());
        assert!(frame.is_empty());
    }

    #[test]
    fn tiny_canvas_draws_nothing() {
        let s = QuantumState::basis(0).unwrap();
        let frame = StateRenderer::default().render(Some(&s), &Canvas::new(80, 500, 50));
        assert!(frame.is_empty());
    }

    #[test]
    fn extreme_canvases_do_not_overflow() {
        let renderer = StateRenderer::default();
        let s = QuantumState::basis(0).unwrap();
        let huge_margin = Canvas::new(1000, 1000, i32::MAX);
        assert!(renderer.render(Some(&s), &huge_margin).is_empty());
        assert!(renderer.axes(&huge_margin).is_empty());

        let huge = Canvas::new(i32::MAX, i32::MAX, 0);
        let frame = renderer.render(Some(&s), &huge);
        assert_eq!(frame.len(), 1 + 4 + 8 + 4 + 12 + 3);
    }

    #[test]
    fn invalid_layout_is_refused() {
        let mut layout = Layout::default();
        layout.corners.top_right = 9;
        assert!(matches!(
            StateRenderer::new(layout),
            Err(ConfigError::UnknownKet(9))
        ));
    }

    #[test]
    fn frame_order_and_content() {
        let s = QuantumState::basis(0).unwrap();
        let frame = StateRenderer::default().render(Some(&s), &Canvas::default());
        assert!(matches!(frame.primitives[0], Primitive::Gradient { .. }));
        // 4 axis items, 8 ticks, 4 corner labels, 4 x 3 glyph items, 3 swatch items
        assert_eq!(frame.len(), 1 + 4 + 8 + 4 + 12 + 3);
        let texts: Vec<&str> = frame.texts().collect();
        assert!(texts.contains(&"|00⟩: 1.000, ∠0.00"));
        assert!(texts.contains(&"|11⟩: 0.000, ∠0.00"));
        assert!(texts.contains(&"Hex: #FF00FF"));
        assert!(texts.contains(&"192"));
    }

    #[test]
    fn glyph_geometry_on_default_canvas() {
        let s = state([(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, 0.0)]);
        let glyphs = StateRenderer::default().glyphs(&s, &Canvas::default());

        assert_eq!(glyphs[0].center, Point::new(50, 950));
        assert_eq!(glyphs[1].center, Point::new(950, 950));
        assert_eq!(glyphs[2].center, Point::new(50, 50));
        assert_eq!(glyphs[3].center, Point::new(950, 50));

        // p = 1/3 for the first three: 100·√(1/3) = 57.7, capped at 50
        assert_eq!(glyphs[0].radius, 50);
        assert_eq!(glyphs[3].radius, 0);

        // phase 0 points right, π/2 points up on screen, π points left
        assert_eq!(glyphs[0].phase_tip, Point::new(100, 950));
        assert_eq!(glyphs[1].phase_tip, Point::new(950, 900));
        // sin(π) is a hair above zero, so the tip truncates one pixel up
        assert_eq!(glyphs[2].phase_tip, Point::new(0, 49));
        assert_eq!(glyphs[3].phase_tip, glyphs[3].center);

        assert_eq!(glyphs[1].caption_at, Point::new(850, 970));
        assert_eq!(glyphs[2].caption_at, Point::new(60, 40));
        assert_eq!(glyphs[2].caption, "|10⟩: 0.333, ∠3.14");
        assert_eq!(glyphs[2].fill, Rgb::RED);
    }

    #[test]
    fn raising_the_cap_uncaps_the_radius() {
        let s = state([(0.2, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
        let mut layout = Layout::default();
        layout.max_radius = 500.0;
        let glyphs = StateRenderer::new(layout).unwrap().glyphs(&s, &Canvas::default());
        assert_eq!(glyphs[0].radius, 100);
    }

    #[test]
    fn axis_ticks_are_spread_linearly() {
        let canvas = Canvas::new(560, 560, 50);
        let axes = StateRenderer::default().axes(&canvas);
        let bottom: Vec<Point> = axes
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { at, text, .. } if at.y == 525 && text.parse::<i32>().is_ok() => {
                    Some(*at)
                }
                _ => None,
            })
            .collect();
        // ticks at 0, 64, 128, 192 over a 460 px plot
        assert_eq!(bottom.len(), 4);
        assert_eq!(bottom[0].x, 50);
        assert_eq!(bottom[1].x, 50 + (460.0 * 64.0 / 255.0) as i32);
        assert_eq!(bottom[3].x, 50 + (460.0 * 192.0 / 255.0) as i32);
    }

    #[test]
    fn corner_labels_follow_the_layout() {
        let mut layout = Layout::default();
        layout.corners.top_left = 1;
        layout.corners.bottom_right = 2;
        let canvas = Canvas::default();
        let axes = StateRenderer::new(layout).unwrap().axes(&canvas);
        let top_left = axes.iter().find_map(|p| match p {
            Primitive::Text { at, text, .. } if *at == Point::new(50, 65) => Some(text.clone()),
            _ => None,
        });
        assert_eq!(top_left.as_deref(), Some("|01⟩"));
    }

    #[test]
    fn swatch_sits_in_bottom_right_corner() {
        let s = state([(1.0, 0.0); DIM]);
        let frame = StateRenderer::default().render(Some(&s), &Canvas::default());
        let rect = frame.iter().find_map(|p| match p {
            Primitive::FilledRect { rect, fill } => Some((*rect, *fill)),
            _ => None,
        });
        assert_eq!(
            rect,
            Some((
                Rect {
                    x: 850,
                    y: 850,
                    width: 100,
                    height: 100
                },
                Rgb::WHITE
            ))
        );
        assert!(frame.texts().any(|t| t == "Hex: #FFFFFF"));
    }

    #[test]
    fn channel_swatches_report_hex_and_text() {
        let s = state([(1.0, 0.0); DIM]);
        let chips = StateRenderer::default().channel_swatches(&s);
        assert_eq!(chips[1].hex, "#003F00");
        assert_eq!(chips[1].caption(), "|01⟩ #003F00  P=0.250  ∠0.00");
    }
}
