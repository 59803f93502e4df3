//! Two-qubit state visualizer core.
//!
//! Four amplitude strings go in; a normalized [`QuantumState`], its derived
//! colors, and a [`Frame`] of drawing instructions come out. Painting the frame
//! is left to the caller.

mod core;
pub mod render;
mod visualize;

pub use crate::core::{
    BASIS_LABELS, DIM, Gate, NUM_QUBITS, QuantumState, errors, fixtures, parse, utils,
};
pub use crate::render::{Canvas, Frame, Layout, Primitive, Rgb, StateRenderer};
pub use crate::visualize::{GateStep, Summary, VisualizeRequest, VisualizeResult};
