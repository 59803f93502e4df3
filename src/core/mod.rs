pub mod errors;
mod gates;
pub mod parse;
mod state;
pub mod utils;

pub use gates::Gate;
pub use state::{BASIS_LABELS, DIM, NUM_QUBITS, QuantumState, fixtures};
