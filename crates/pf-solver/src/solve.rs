//! High-level solver interface.
//!
//! Runs the panel pipeline in order:
//! 1. Discretize the body (or take a prebuilt `Geometry`)
//! 2. Assemble the influence system
//! 3. Solve for the source strengths
//! 4. Evaluate surface velocity and Cp at the control points
//! 5. Optionally sample the flow field on a grid

use std::time::Instant;

use pf_core::{Point, Vec2};
use pf_geometry::{Geometry, GeometryBuilder};
use tracing::info;

use crate::config::{FlowConfig, FreeStream};
use crate::error::SolverResult;
use crate::field::{
    FlowField, SamplingGrid, SurfaceSolution, evaluate_grid, evaluate_surface,
    velocity_at_sanitized,
};
use crate::influence::assemble;
use crate::linear::{LinearSolveConfig, SourceStrengths, solve_system};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStage {
    BuildingGeometry,
    AssemblingSystem,
    SolvingSystem,
    EvaluatingSurface,
    SamplingField,
    Completed,
}

impl SolveStage {
    pub fn label(&self) -> &'static str {
        match self {
            SolveStage::BuildingGeometry => "geometry",
            SolveStage::AssemblingSystem => "assembly",
            SolveStage::SolvingSystem => "solve",
            SolveStage::EvaluatingSurface => "surface",
            SolveStage::SamplingField => "field",
            SolveStage::Completed => "done",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveProgressEvent {
    pub stage: SolveStage,
    pub elapsed_s: f64,
}

/// Wall time per pipeline stage, in seconds.
#[derive(Debug, Clone, Default)]
pub struct SolveTiming {
    pub geometry_s: f64,
    pub assembly_s: f64,
    pub solve_s: f64,
    pub surface_s: f64,
    pub field_s: f64,
    pub total_s: f64,
}

/// Solved body: geometry, strengths and surface quantities.
#[derive(Debug, Clone)]
pub struct PanelSolution {
    pub geometry: Geometry,
    pub free_stream: FreeStream,
    pub strengths: SourceStrengths,
    pub surface: SurfaceSolution,
    /// Relative residual of the dense solve
    pub relative_residual: f64,
}

impl PanelSolution {
    /// Total velocity at an arbitrary point, with singular contributions zeroed.
    pub fn velocity_at(&self, point: Point) -> Vec2 {
        velocity_at_sanitized(&self.geometry, &self.strengths, self.free_stream, point).0
    }

    pub fn sample(&self, grid: &SamplingGrid) -> SolverResult<FlowField> {
        evaluate_grid(&self.geometry, &self.strengths, self.free_stream, grid)
    }

    /// Net source output; zero for a closed body without circulation.
    pub fn net_source_output(&self) -> f64 {
        self.strengths
            .net_output(self.geometry.panels().iter().map(|p| p.length()))
    }
}

/// Full single-cylinder run.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub config: FlowConfig,
    pub solution: PanelSolution,
    pub field: FlowField,
    pub timing: SolveTiming,
}

type ProgressCb<'a> = Option<&'a mut dyn FnMut(SolveProgressEvent)>;

fn emit(progress: &mut ProgressCb<'_>, stage: SolveStage, started: Instant) {
    if let Some(cb) = progress.as_mut() {
        cb(SolveProgressEvent {
            stage,
            elapsed_s: started.elapsed().as_secs_f64(),
        });
    }
}

/// Solve the source strengths for a prebuilt body.
pub fn solve_body(geometry: Geometry, free_stream: FreeStream) -> SolverResult<PanelSolution> {
    let mut timing = SolveTiming::default();
    solve_body_internal(geometry, free_stream, &mut None, Instant::now(), &mut timing)
}

fn solve_body_internal(
    geometry: Geometry,
    free_stream: FreeStream,
    progress: &mut ProgressCb<'_>,
    started: Instant,
    timing: &mut SolveTiming,
) -> SolverResult<PanelSolution> {
    emit(progress, SolveStage::AssemblingSystem, started);
    let t = Instant::now();
    let system = assemble(&geometry, free_stream);
    timing.assembly_s = t.elapsed().as_secs_f64();

    emit(progress, SolveStage::SolvingSystem, started);
    let t = Instant::now();
    let linear = solve_system(&system, &LinearSolveConfig::default())?;
    timing.solve_s = t.elapsed().as_secs_f64();

    emit(progress, SolveStage::EvaluatingSurface, started);
    let t = Instant::now();
    let surface = evaluate_surface(&geometry, &linear.strengths, free_stream)?;
    timing.surface_s = t.elapsed().as_secs_f64();

    info!(
        panels = geometry.panel_count(),
        relative_residual = linear.relative_residual,
        max_normal_residual = surface.max_normal_residual(),
        "solved source strengths"
    );

    Ok(PanelSolution {
        geometry,
        free_stream,
        strengths: linear.strengths,
        surface,
        relative_residual: linear.relative_residual,
    })
}

/// Run the cylinder case described by `config`.
pub fn run_case(config: &FlowConfig) -> SolverResult<CaseResult> {
    run_case_with_progress(config, None)
}

pub fn run_case_with_progress(
    config: &FlowConfig,
    mut progress: ProgressCb<'_>,
) -> SolverResult<CaseResult> {
    let started = Instant::now();
    let mut timing = SolveTiming::default();
    config.validate()?;

    emit(&mut progress, SolveStage::BuildingGeometry, started);
    let t = Instant::now();
    let geometry = GeometryBuilder::new()
        .with_offset(config.control_offset)
        .circle(config.radius, config.panel_count)?;
    timing.geometry_s = t.elapsed().as_secs_f64();

    let solution = solve_body_internal(
        geometry,
        config.free_stream,
        &mut progress,
        started,
        &mut timing,
    )?;

    emit(&mut progress, SolveStage::SamplingField, started);
    let t = Instant::now();
    let grid = SamplingGrid::square(config.grid_half_width(), config.mesh_density);
    let field = solution.sample(&grid)?;
    timing.field_s = t.elapsed().as_secs_f64();

    timing.total_s = started.elapsed().as_secs_f64();
    emit(&mut progress, SolveStage::Completed, started);
    info!(
        total_s = timing.total_s,
        grid_points = grid.len(),
        "case complete"
    );

    Ok(CaseResult {
        config: *config,
        solution,
        field,
        timing,
    })
}
