//! Dense solve for the source strengths.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::error::{SolverError, SolverResult};
use crate::influence::InfluenceSystem;

/// Dense solver configuration.
#[derive(Debug, Clone, Copy)]
pub struct LinearSolveConfig {
    /// Smallest accepted ratio min|U_ii| / max|U_ii| of the LU factor
    pub min_pivot_ratio: f64,
}

impl Default for LinearSolveConfig {
    fn default() -> Self {
        Self {
            min_pivot_ratio: 1e-12,
        }
    }
}

/// Solved source strength per panel. Read-only once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStrengths {
    values: DVector<f64>,
}

impl SourceStrengths {
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            values: DVector::from_vec(values),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    pub fn as_vector(&self) -> &DVector<f64> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn sum(&self) -> f64 {
        self.values.sum()
    }

    /// Net source output `sum(sigma_j * L_j)`; zero for a closed non-lifting body.
    pub fn net_output(&self, panel_lengths: impl IntoIterator<Item = f64>) -> f64 {
        self.values
            .iter()
            .zip(panel_lengths)
            .map(|(sigma, len)| sigma * len)
            .sum()
    }
}

/// Strengths plus the achieved residual.
#[derive(Debug, Clone)]
pub struct LinearSolution {
    pub strengths: SourceStrengths,
    /// ||A x - b|| / ||b|| (absolute norm when b = 0)
    pub relative_residual: f64,
}

/// Solve `A * sigma = rhs` by LU with partial pivoting.
///
/// Fails with [`SolverError::SingularSystem`] instead of returning an
/// approximate answer when the matrix is singular or too badly conditioned.
pub fn solve_system(
    system: &InfluenceSystem,
    config: &LinearSolveConfig,
) -> SolverResult<LinearSolution> {
    let a = &system.matrix;
    let b = &system.rhs;

    if !a.is_square() || a.nrows() != b.len() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "influence matrix is {}x{} but right-hand side has {} rows",
                a.nrows(),
                a.ncols(),
                b.len()
            ),
        });
    }
    if a.is_empty() {
        return Err(SolverError::ProblemSetup {
            what: "empty influence system".to_string(),
        });
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(SolverError::SingularSystem {
            what: "system contains non-finite entries".to_string(),
        });
    }

    let lu = a.clone().lu();
    let ratio = pivot_ratio(&lu.u());
    debug!(pivot_ratio = ratio, "LU factorization");
    if ratio < config.min_pivot_ratio {
        return Err(SolverError::SingularSystem {
            what: format!(
                "pivot ratio {:.3e} below tolerance {:.3e}",
                ratio, config.min_pivot_ratio
            ),
        });
    }

    let x = lu.solve(b).ok_or_else(|| SolverError::SingularSystem {
        what: "LU solve failed".to_string(),
    })?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::SingularSystem {
            what: "solution is not finite".to_string(),
        });
    }

    let residual = (a * &x - b).norm();
    let b_norm = b.norm();
    let relative_residual = if b_norm > 0.0 {
        residual / b_norm
    } else {
        residual
    };
    if relative_residual > 1e-8 {
        warn!(relative_residual, "large residual after dense solve");
    }

    Ok(LinearSolution {
        strengths: SourceStrengths { values: x },
        relative_residual,
    })
}

fn pivot_ratio(u: &DMatrix<f64>) -> f64 {
    let diag = u.diagonal();
    let max = diag.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if max == 0.0 {
        return 0.0;
    }
    let min = diag.iter().fold(f64::INFINITY, |acc, v| acc.min(v.abs()));
    min / max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(matrix: DMatrix<f64>, rhs: DVector<f64>) -> InfluenceSystem {
        InfluenceSystem { matrix, rhs }
    }

    #[test]
    fn solves_small_system() {
        let sys = system(
            DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]),
            DVector::from_vec(vec![3.0, 5.0]),
        );
        let sol = solve_system(&sys, &LinearSolveConfig::default()).unwrap();
        let x = sol.strengths.as_slice();
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
        assert!(sol.relative_residual < 1e-14);
    }

    #[test]
    fn singular_matrix_is_reported() {
        let sys = system(
            DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]),
            DVector::from_vec(vec![1.0, 1.0]),
        );
        let err = solve_system(&sys, &LinearSolveConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::SingularSystem { .. }));
    }

    #[test]
    fn nearly_singular_matrix_is_reported() {
        let sys = system(
            DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0 + 1e-15]),
            DVector::from_vec(vec![1.0, 2.0]),
        );
        let err = solve_system(&sys, &LinearSolveConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::SingularSystem { .. }));
    }

    #[test]
    fn non_finite_entries_are_reported() {
        let sys = system(
            DMatrix::from_row_slice(2, 2, &[1.0, f64::NAN, 0.0, 1.0]),
            DVector::from_vec(vec![1.0, 1.0]),
        );
        assert!(matches!(
            solve_system(&sys, &LinearSolveConfig::default()),
            Err(SolverError::SingularSystem { .. })
        ));
    }

    #[test]
    fn shape_mismatch_is_a_setup_error() {
        let sys = system(DMatrix::identity(3, 3), DVector::zeros(2));
        assert!(matches!(
            solve_system(&sys, &LinearSolveConfig::default()),
            Err(SolverError::ProblemSetup { .. })
        ));
    }

    #[test]
    fn net_output_weights_by_length() {
        let s = SourceStrengths {
            values: DVector::from_vec(vec![1.0, -2.0, 0.5]),
        };
        assert_eq!(s.sum(), -0.5);
        assert_eq!(s.net_output([2.0, 1.0, 4.0]), 2.0);
        assert_eq!(s.get(1), Some(-2.0));
        assert_eq!(s.get(3), None);
    }
}
