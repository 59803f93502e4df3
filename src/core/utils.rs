//! Helpers shared by the state and gate code.
//!
//! - Lifting a local operator onto the whole register.
//! - Unitarity check.
//! - Bit manipulation for basis indices.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// Squared Euclidean norm of an amplitude vector.
pub fn norm_sqr(vector: &Array1<Complex64>) -> f64 {
    vector.iter().map(|c| c.norm_sqr()).sum()
}

/// Checks `U U† = I` entry by entry within `tol`.
pub fn is_unitary(matrix: &Array2<Complex64>, tol: f64) -> bool {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return false;
    }
    let eye = Array2::<Complex64>::eye(rows);
    let u_dagger = matrix.t().mapv(|x| x.conj());

    matrix
        .dot(&u_dagger)
        .iter()
        .zip(eye.iter())
        .all(|(a, b)| (*a - *b).norm() < tol)
}

/// Builds the `2^N x 2^N` operator acting as `matrix` on `targets` when every
/// qubit in `controls` is set, and as identity otherwise.
///
/// Qubit `k` is bit `k` of the basis index, so on two qubits qubit 1 is the
/// left digit of the ket label `|q1 q0⟩`.
pub fn expand_operator(
    num_total_qubits: usize,
    matrix: &Array2<Complex64>,
    targets: &[usize],
    controls: &[usize],
) -> Array2<Complex64> {
    let dim = 1 << num_total_qubits;
    let mut full_matrix = Array2::<Complex64>::zeros((dim, dim));

    let control_mask = controls.iter().fold(0usize, |mask, &c| mask | (1 << c));
    let target_mask = targets.iter().fold(0usize, |mask, &t| mask | (1 << t));
    let passive_mask = !target_mask;

    for col_idx in 0..dim {
        // Controls not all set: column passes through untouched.
        if (col_idx & control_mask) != control_mask {
            full_matrix[[col_idx, col_idx]] = Complex64::new(1.0, 0.0);
            continue;
        }

        let small_col = extract_bits(col_idx, targets);
        for small_row in 0..matrix.nrows() {
            let val = matrix[[small_row, small_col]];
            if val.norm_sqr() < f64::EPSILON {
                continue;
            }
            let row_idx = (col_idx & passive_mask) | deposit_bits(small_row, targets);
            full_matrix[[row_idx, col_idx]] = val;
        }
    }
    full_matrix
}

/// Gathers the bits of `value` found at `indices` into a compact integer.
fn extract_bits(value: usize, indices: &[usize]) -> usize {
    indices
        .iter()
        .enumerate()
        .filter(|&(_, &pos)| (value >> pos) & 1 == 1)
        .fold(0, |acc, (i, _)| acc | (1 << i))
}

/// Inverse of [`extract_bits`]: bit `i` of `compact_value` lands at `indices[i]`.
fn deposit_bits(compact_value: usize, indices: &[usize]) -> usize {
    indices
        .iter()
        .enumerate()
        .filter(|&(i, _)| (compact_value >> i) & 1 == 1)
        .fold(0, |acc, (_, &pos)| acc | (1 << pos))
}

/// First index that appears twice in `indices`.
pub fn find_duplicate(indices: &[usize]) -> Option<usize> {
    let mut seen = std::collections::HashSet::new();
    indices.iter().find(|&&idx| !seen.insert(idx)).copied()
}
