use crate::core::errors::{GateError, ParseError, StateError, VisualizeError};
use crate::core::parse::parse_amplitudes;
use crate::core::{DIM, Gate, QuantumState};
use crate::render::{Canvas, ChannelSwatch, Frame, StateRenderer, Swatch};
use ndarray::Array2;
use num_complex::Complex64;
use serde::Serialize;
use std::str::FromStr;

/// A gate applied once, after the state is built and before rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum GateStep {
    /// Full-register operator, passed straight to `apply_gate`.
    Matrix(Array2<Complex64>),
    /// A named gate lifted onto `targets`, conditioned on `controls`.
    Targeted {
        gate: Gate,
        targets: Vec<usize>,
        controls: Vec<usize>,
    },
}

impl GateStep {
    fn apply(&self, state: &mut QuantumState) -> Result<(), StateError> {
        match self {
            GateStep::Matrix(matrix) => state.apply_gate(matrix),
            GateStep::Targeted {
                gate,
                targets,
                controls,
            } => state.apply_controlled(gate, targets, Some(controls)),
        }
    }
}

/// Parses `NAME[:TARGETS[:CONTROLS]]`, e.g. `h:0`, `x:0:1`, `cnot`.
///
/// Qubit lists are comma separated. Without targets the gate acts on qubits
/// `0..arity`.
impl FromStr for GateStep {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GateError::MalformedStep(s.to_string());
        let mut parts = s.trim().split(':');
        let gate = Gate::by_name(parts.next().unwrap_or_default())?;

        let qubits = |part: Option<&str>| -> Result<Option<Vec<usize>>, GateError> {
            part.map(|list| {
                list.split(',')
                    .map(|q| q.trim().parse::<usize>().map_err(|_| malformed()))
                    .collect::<Result<Vec<usize>, _>>()
            })
            .transpose()
        };
        let targets = qubits(parts.next())?.unwrap_or_else(|| (0..gate.num_qubits).collect());
        let controls = qubits(parts.next())?.unwrap_or_default();
        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(GateStep::Targeted {
            gate,
            targets,
            controls,
        })
    }
}

/// One "visualize" action: four raw amplitude strings plus the surface size.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizeRequest {
    pub amplitude_strings: [String; DIM],
    pub canvas: Canvas,
    pub gate: Option<GateStep>,
}

impl VisualizeRequest {
    pub fn new<S: Into<String>>(amplitude_strings: [S; DIM]) -> Self {
        Self {
            amplitude_strings: amplitude_strings.map(Into::into),
            canvas: Canvas::default(),
            gate: None,
        }
    }

    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Sets the single gate step; a later call replaces an earlier one.
    pub fn with_gate(mut self, step: GateStep) -> Self {
        self.gate = Some(step);
        self
    }

    /// Parses the four fields into a normalized state.
    pub fn parse_state(&self) -> Result<QuantumState, ParseError> {
        parse_amplitudes(&self.amplitude_strings).map(QuantumState::new)
    }

    /// Parses, applies the optional gate step, and renders.
    ///
    /// Nothing is rendered if any field fails to parse or the gate step fails.
    pub fn execute(&self, renderer: &StateRenderer) -> Result<VisualizeResult, VisualizeError> {
        let mut state = self.parse_state()?;
        if let Some(step) = &self.gate {
            step.apply(&mut state)?;
        }
        tracing::debug!(%state, gated = self.gate.is_some(), "state prepared");

        Ok(VisualizeResult {
            frame: renderer.render(Some(&state), &self.canvas),
            state_color: renderer.state_swatch(&state),
            channels: renderer.channel_swatches(&state),
            state,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualizeResult {
    pub state: QuantumState,
    pub frame: Frame,
    pub state_color: Swatch,
    pub channels: [ChannelSwatch; DIM],
}

/// Flat, serializable view of a result without the drawing instructions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// `[re, im]` per basis state.
    pub amplitudes: [[f64; 2]; DIM],
    pub probabilities: [f64; DIM],
    pub phases: [f64; DIM],
    pub state_color: Swatch,
    pub channels: [ChannelSwatch; DIM],
}

impl VisualizeResult {
    /// Text for the state label above the canvas.
    pub fn state_label(&self) -> String {
        format!("State: {}", self.state)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            amplitudes: std::array::from_fn(|i| {
                let a = self.state.amplitudes()[i];
                [a.re, a.im]
            }),
            probabilities: self.state.probabilities(),
            phases: self.state.phases(),
            state_color: self.state_color.clone(),
            channels: self.channels.clone(),
        }
    }
}
