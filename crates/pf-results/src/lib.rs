//! pf-results: run records, run IDs and on-disk run storage.

pub mod export;
pub mod hash;
pub mod store;
pub mod types;

pub use export::surface_csv;
pub use hash::compute_run_id;
pub use store::{RunRecords, RunStore};
pub use types::*;

use pf_project::CaseDef;
use pf_solver::CaseResult;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}

/// Package a solved case for storage.
pub fn build_records(case: &CaseDef, result: &CaseResult, solver_version: &str) -> RunRecords {
    let manifest = RunManifest {
        run_id: compute_run_id(case, solver_version),
        case_name: case.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        solver_version: solver_version.to_string(),
        panel_count: result.solution.geometry.panel_count(),
        grid_points: result.field.grid.len(),
    };
    RunRecords {
        manifest,
        summary: run_summary(result),
        outline: outline_snapshot(result),
        surface: surface_records(result),
        field: field_snapshot(result),
    }
}
