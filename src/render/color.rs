//! RGB values and the amplitude-to-color mappings.

use crate::core::errors::ColorError;
use crate::core::{DIM, QuantumState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGB color. Serialized as `"#RRGGBB"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from unit-interval intensities.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(unit_to_channel(r), unit_to_channel(g), unit_to_channel(b))
    }

    /// Upper-case `#RRGGBB`.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Multiplies every channel by `factor`, truncating.
    pub fn scale(&self, factor: f64) -> Self {
        let f = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

/// `255 · v` truncated toward zero and clamped to `0..=255`.
pub fn unit_to_channel(v: f64) -> u8 {
    (255.0 * v).clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ColorError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.hex()
    }
}

/// Single color summarizing the whole state.
///
/// `r = |a0 + a2|²`, `g = |a1 + a3|²`, `b = |a0 + a1|²`, divided by their
/// maximum when it is positive.
pub fn state_color(state: &QuantumState) -> Rgb {
    let a = |i: usize| state.amplitudes()[i];
    let mut r = (a(0) + a(2)).norm_sqr();
    let mut g = (a(1) + a(3)).norm_sqr();
    let mut b = (a(0) + a(1)).norm_sqr();

    let max = r.max(g).max(b);
    if max > 0.0 {
        r /= max;
        g /= max;
        b /= max;
    }
    Rgb::from_unit(r, g, b)
}

/// Palette colors dimmed by each basis state's probability.
pub fn channel_colors(state: &QuantumState, palette: &[Rgb; DIM]) -> [Rgb; DIM] {
    let probabilities = state.probabilities();
    std::array::from_fn(|i| palette[i].scale(probabilities[i]))
}
