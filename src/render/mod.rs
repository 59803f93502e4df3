//! Pure rendering: a state and a canvas in, drawing instructions out.

pub mod color;
pub mod gradient;
pub mod layout;
pub mod primitives;
mod renderer;

pub use color::Rgb;
pub use gradient::BackgroundGradient;
pub use layout::{CornerLabels, Layout, SwatchLayout};
pub use primitives::{Canvas, Frame, Point, Primitive, Rect};
pub use renderer::{ChannelSwatch, Glyph, StateRenderer, Swatch};
