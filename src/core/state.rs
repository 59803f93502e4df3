use crate::core::Gate;
use crate::core::errors::StateError;
use crate::core::utils::norm_sqr;
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use std::f64::consts::PI;
use std::fmt;

/// Number of qubits in the register.
pub const NUM_QUBITS: usize = 2;
/// Number of basis states, `2^NUM_QUBITS`.
pub const DIM: usize = 1 << NUM_QUBITS;

/// Ket labels in basis-index order.
pub const BASIS_LABELS: [&str; DIM] = ["|00⟩", "|01⟩", "|10⟩", "|11⟩"];

/// A two-qubit pure state held as four complex amplitudes.
///
/// The vector is normalized on construction and after every gate, except for
/// the all-zero vector which is left untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantumState {
    amplitudes: Array1<Complex64>,
}

impl QuantumState {
    /// Creates a state from raw amplitudes, normalizing them.
    pub fn new(amplitudes: [Complex64; DIM]) -> Self {
        let mut state = Self {
            amplitudes: Array1::from(amplitudes.to_vec()),
        };
        state.normalize();
        state
    }

    /// The computational basis state `|index⟩`, or `None` past the last ket.
    pub fn basis(index: usize) -> Option<Self> {
        let mut amplitudes = [Complex64::new(0.0, 0.0); DIM];
        *amplitudes.get_mut(index)? = Complex64::new(1.0, 0.0);
        Some(Self::new(amplitudes))
    }

    /// Scales the vector to unit norm; the zero vector is left as is.
    ///
    /// Components are first divided by the largest of them so that squaring
    /// neither underflows nor overflows for any finite input.
    fn normalize(&mut self) {
        let scale = self
            .amplitudes
            .iter()
            .map(|a| a.re.abs().max(a.im.abs()))
            .fold(0.0, f64::max);
        if scale == 0.0 {
            tracing::debug!("zero amplitude vector, skipping normalization");
            return;
        }
        self.amplitudes.mapv_inplace(|a| a / scale);
        let norm = norm_sqr(&self.amplitudes).sqrt();
        self.amplitudes.mapv_inplace(|a| a / norm);
    }

    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Amplitude of basis state `index`, or `None` past the last ket.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Squared magnitudes, one per basis state.
    pub fn probabilities(&self) -> [f64; DIM] {
        std::array::from_fn(|i| self.amplitudes[i].norm_sqr())
    }

    /// Arguments in (−π, π]; a zero amplitude has phase 0 and a negative real
    /// amplitude has phase π.
    pub fn phases(&self) -> [f64; DIM] {
        std::array::from_fn(|i| phase_of(self.amplitudes[i]))
    }

    pub fn norm_sqr(&self) -> f64 {
        norm_sqr(&self.amplitudes)
    }

    /// True for the all-zero vector, which cannot be normalized.
    pub fn is_degenerate(&self) -> bool {
        self.amplitudes.iter().all(|a| *a == Complex64::new(0.0, 0.0))
    }

    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() < 1e-9
    }

    /// Replaces the amplitudes with `matrix · amplitudes`, then renormalizes.
    ///
    /// The matrix need not be unitary, but it must be `4x4`.
    ///
    /// # Errors
    ///
    /// `StateError::ShapeMismatch` when the matrix has any other shape. The
    /// state is left unchanged in that case.
    pub fn apply_gate(&mut self, matrix: &Array2<Complex64>) -> Result<(), StateError> {
        let (rows, cols) = matrix.dim();
        if rows != DIM || cols != DIM {
            return Err(StateError::ShapeMismatch {
                expected: DIM,
                got_rows: rows,
                got_cols: cols,
            });
        }

        self.amplitudes = matrix.dot(&self.amplitudes);
        self.normalize();
        tracing::trace!(amplitudes = %self, "gate applied");
        Ok(())
    }

    /// Non-mutating form of [`apply_gate`](Self::apply_gate).
    pub fn with_gate(&self, matrix: &Array2<Complex64>) -> Result<Self, StateError> {
        let mut next = self.clone();
        next.apply_gate(matrix)?;
        Ok(next)
    }

    /// Applies a non-controlled gate to `target_qubits`.
    pub fn apply(&mut self, gate: &Gate, target_qubits: &[usize]) -> Result<(), StateError> {
        self.apply_controlled(gate, target_qubits, None)
    }

    /// Applies `gate` to `target_qubits`, conditioned on `control_qubits`.
    ///
    /// Qubit `k` is bit `k` of the basis index: qubit 1 is the left digit of
    /// the ket label.
    pub fn apply_controlled(
        &mut self,
        gate: &Gate,
        target_qubits: &[usize],
        control_qubits: Option<&[usize]>,
    ) -> Result<(), StateError> {
        if gate.num_qubits != target_qubits.len() {
            return Err(StateError::ShapeMismatch {
                expected: 1 << target_qubits.len(),
                got_rows: gate.matrix.nrows(),
                got_cols: gate.matrix.ncols(),
            });
        }

        let controls = control_qubits.unwrap_or(&[]);
        for &q in target_qubits.iter().chain(controls) {
            validate_qubit_index(q)?;
        }

        let full = Gate::expand_gate(NUM_QUBITS, gate, target_qubits, controls)?;
        self.apply_gate(&full.matrix)
    }
}

/// `arg` folded into (−π, π], with 0 for a zero amplitude of either sign.
fn phase_of(a: Complex64) -> f64 {
    if a == Complex64::new(0.0, 0.0) {
        return 0.0;
    }
    let phase = a.arg();
    if phase <= -PI { PI } else { phase }
}

/// Checks if a given index is within the register.
fn validate_qubit_index(index: usize) -> Result<(), StateError> {
    if index >= NUM_QUBITS {
        return Err(StateError::IndexOutOfBounds {
            index,
            num_qubits: NUM_QUBITS,
        });
    }
    Ok(())
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, a) in self.amplitudes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}{:+.4}i", a.re, a.im)?;
        }
        write!(f, "]")
    }
}

/// Fixtures used by tests and demos.
pub mod fixtures {
    use super::*;

    /// Single-qubit Hadamard, `[[1, 1], [1, -1]] / √2`. It is 2x2, so passing it
    /// straight to [`QuantumState::apply_gate`] is a shape mismatch.
    pub fn hadamard() -> Array2<Complex64> {
        Gate::h().matrix
    }

    /// Two-qubit CNOT permutation `[[1,0,0,0],[0,1,0,0],[0,0,0,1],[0,0,1,0]]`.
    pub fn cnot() -> Array2<Complex64> {
        Gate::cnot().matrix
    }
}
