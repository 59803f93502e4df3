use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Matrix is not Unitary (U†U != I)")]
    NonUnitary,

    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Invalid Dimensions")]
    InvalidDimensions,

    #[error("Qubit {0} cannot be both control and target")]
    ControlTargetOverlap(usize),

    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),

    #[error("Unknown gate name: {0:?}")]
    UnknownGate(String),

    #[error("Malformed gate step {0:?}, expected NAME[:TARGETS[:CONTROLS]]")]
    MalformedStep(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Gate shape mismatch: expected {expected}x{expected}, got {got_rows}x{got_cols}")]
    ShapeMismatch {
        expected: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("Qubit index {index} out of bounds for a {num_qubits}-qubit register")]
    IndexOutOfBounds { index: usize, num_qubits: usize },

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),
}

/// One of the four amplitude strings is not a usable complex literal.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Invalid input for |{index:02b}⟩ amplitude ({input:?}): {reason}. \
     Please enter valid complex numbers (e.g., 1+2i)."
)]
pub struct ParseError {
    /// Basis index of the offending field.
    pub index: usize,
    pub input: String,
    pub reason: ParseFailure,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("empty value")]
    Empty,

    #[error("not a complex number")]
    Malformed,

    #[error("value is not finite")]
    NonFinite,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed layout file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Cannot encode layout: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Position of |{index:02b}⟩ must lie in [0, 1]x[0, 1], got ({u}, {v})")]
    PositionOutOfRange { index: usize, u: f64, v: f64 },

    #[error("Corner label refers to basis index {0}, expected 0..=3")]
    UnknownKet(usize),

    #[error("Basis index {0} is assigned to more than one corner")]
    DuplicateKet(usize),
}

/// Failure of a complete visualize request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisualizeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    State(#[from] StateError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color {0:?}, expected #RRGGBB")]
pub struct ColorError(pub String);
