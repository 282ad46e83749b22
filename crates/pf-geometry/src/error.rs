//! Geometry-specific error types.

use thiserror::Error;

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Geometry construction and frame errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Panel start and end coincide, so no frame can be derived.
    #[error("Degenerate panel{}: start and end coincide at ({x}, {y})", fmt_index(.index))]
    DegeneratePanel {
        index: Option<usize>,
        x: f64,
        y: f64,
    },

    /// Too few panels to enclose a body.
    #[error("Closed body needs at least {min} panels, got {count}")]
    NotEnoughPanels { count: usize, min: usize },

    /// A boundary point has a NaN or infinite coordinate.
    #[error("Boundary point {index} is not finite")]
    NonFinitePoint { index: usize },

    /// Explicit point loop does not end where it starts.
    #[error("Point loop is not closed (gap = {gap:.3e})")]
    OpenContour { gap: f64 },

    /// Body parameter outside its valid range.
    #[error("Invalid geometry parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },
}

fn fmt_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" {}", i),
        None => String::new(),
    }
}
