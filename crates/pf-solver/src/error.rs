//! Error types for solver operations.

use pf_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur while setting up or solving a panel problem.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Singular influence system: {what}")]
    SingularSystem { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
