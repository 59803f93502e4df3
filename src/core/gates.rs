use crate::core::errors::GateError;
use crate::core::utils;
use ndarray::{Array2, arr2};
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A quantum gate: a unitary matrix and the number of qubits it acts on.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    /// The unitary matrix of the gate.
    pub matrix: Array2<Complex64>,
    /// The number of qubits the gate acts on.
    pub num_qubits: usize,
}

impl Gate {
    /// Creates a new `Gate` from a unitary matrix.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if:
    /// - The matrix is not square.
    /// - The matrix dimensions are not a power of 2.
    /// - The matrix is not unitary.
    pub fn new(matrix: Array2<Complex64>) -> Result<Self, GateError> {
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(GateError::NotSquareMatrix);
        }

        if !rows.is_power_of_two() {
            return Err(GateError::InvalidDimensions);
        }

        if !utils::is_unitary(&matrix, 1e-6) {
            return Err(GateError::NonUnitary);
        }

        let num_qubits = rows.trailing_zeros() as usize;

        Ok(Self { matrix, num_qubits })
    }

    /// Builds a fixed gate from a matrix known to be unitary.
    fn fixed(matrix: Array2<Complex64>) -> Gate {
        let num_qubits = matrix.nrows().trailing_zeros() as usize;
        Gate { matrix, num_qubits }
    }

    /// Lifts `gate` onto a register of `num_total_qubits`.
    ///
    /// The result applies `gate` to `targets` when all `controls` are set and
    /// identity everywhere else.
    ///
    /// # Errors
    ///
    /// Returns `GateError` if:
    /// - Duplicate indices are found in `targets` or `controls`.
    /// - A qubit is used as both control and target.
    pub fn expand_gate(
        num_total_qubits: usize,
        gate: &Gate,
        targets: &[usize],
        controls: &[usize],
    ) -> Result<Gate, GateError> {
        if let Some(dup) = utils::find_duplicate(targets) {
            return Err(GateError::DuplicateQubit(dup));
        }

        if let Some(dup) = utils::find_duplicate(controls) {
            return Err(GateError::DuplicateQubit(dup));
        }

        if let Some(&c) = controls.iter().find(|c| targets.contains(c)) {
            return Err(GateError::ControlTargetOverlap(c));
        }

        Ok(Gate {
            matrix: utils::expand_operator(num_total_qubits, &gate.matrix, targets, controls),
            num_qubits: num_total_qubits,
        })
    }

    /// Looks up a named gate (`i`, `x`, `z`, `h`, `s`, `cnot`, `swap`).
    pub fn by_name(name: &str) -> Result<Gate, GateError> {
        match name.to_ascii_lowercase().as_str() {
            "i" | "id" => Ok(Gate::i()),
            "x" | "not" => Ok(Gate::x()),
            "z" => Ok(Gate::z()),
            "h" | "hadamard" => Ok(Gate::h()),
            "s" => Ok(Gate::s()),
            "cnot" | "cx" => Ok(Gate::cnot()),
            "swap" => Ok(Gate::swap()),
            _ => Err(GateError::UnknownGate(name.to_string())),
        }
    }

    // --- Standard Gates ---

    /// Identity gate.
    pub fn i() -> Gate {
        Gate::fixed(Array2::eye(2))
    }

    /// Pauli-X gate (NOT gate).
    pub fn x() -> Gate {
        Gate::fixed(arr2(&[[ZERO, ONE], [ONE, ZERO]]))
    }

    /// Pauli-Z gate.
    pub fn z() -> Gate {
        Gate::fixed(arr2(&[[ONE, ZERO], [ZERO, -ONE]]))
    }

    /// Hadamard gate, `[[1, 1], [1, -1]] / √2`.
    pub fn h() -> Gate {
        let f = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Gate::fixed(arr2(&[[f, f], [f, -f]]))
    }

    /// S gate (Phase gate, Z^1/2).
    pub fn s() -> Gate {
        Gate::fixed(arr2(&[[ONE, ZERO], [ZERO, Complex64::i()]]))
    }

    /// CNOT with the left ket digit as control: swaps |10⟩ and |11⟩.
    pub fn cnot() -> Gate {
        Gate::fixed(arr2(&[
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
            [ZERO, ZERO, ONE, ZERO],
        ]))
    }

    /// SWAP gate: exchanges |01⟩ and |10⟩.
    pub fn swap() -> Gate {
        Gate::fixed(arr2(&[
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
        ]))
    }
}
