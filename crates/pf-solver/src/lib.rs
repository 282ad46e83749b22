//! Source panel solver for 2D potential flow.
//!
//! A closed body is covered with constant-strength source panels. Strengths
//! are chosen so the normal velocity vanishes at every control point; the
//! solved strengths then give the velocity anywhere by superposition.

pub mod analytic;
pub mod config;
pub mod error;
pub mod field;
pub mod influence;
pub mod kernel;
pub mod linear;
pub mod solve;

pub use analytic::CylinderFlow;
pub use config::{FlowConfig, FreeStream};
pub use error::{SolverError, SolverResult};
pub use field::{
    FlowField, SamplingGrid, SurfaceSolution, SurfaceSummary, evaluate_grid, evaluate_surface,
    velocity_at, velocity_at_sanitized,
};
pub use influence::{InfluenceSystem, assemble, unit_velocity_matrices};
pub use kernel::{
    panel_source_velocity, point_vortex_velocity, point_vortex_velocity_sanitized,
    sanitize_velocity, source_velocity, source_velocity_in_frame,
};
pub use linear::{LinearSolution, LinearSolveConfig, SourceStrengths, solve_system};
pub use solve::{
    CaseResult, PanelSolution, SolveProgressEvent, SolveStage, SolveTiming, run_case,
    run_case_with_progress, solve_body,
};
