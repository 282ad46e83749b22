//! Result data types.
//!
//! Everything here is plain numbers and strings so a plotting front end can
//! read runs back without linking the solver.

use pf_solver::CaseResult;
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub case_name: String,
    pub timestamp: String,
    pub solver_version: String,
    pub panel_count: usize,
    pub grid_points: usize,
}

/// One row per control point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceRecord {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub nx: f64,
    pub ny: f64,
    pub u: f64,
    pub w: f64,
    pub qt: f64,
    pub qn: f64,
    pub speed: f64,
    pub cp: f64,
    pub sigma: f64,
}

/// Panel polygon, closed (last node repeats the first).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutlineSnapshot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Grid samples in row-major order (one row per y value).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSnapshot {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub u: Vec<f64>,
    pub w: Vec<f64>,
    pub speed: Vec<f64>,
    pub sanitized_contributions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimingSnapshot {
    pub geometry_s: f64,
    pub assembly_s: f64,
    pub solve_s: f64,
    pub surface_s: f64,
    pub field_s: f64,
    pub total_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub free_stream_u: f64,
    pub free_stream_w: f64,
    pub radius: f64,
    pub panel_count: usize,
    pub relative_residual: f64,
    pub max_normal_residual: f64,
    pub sigma_sum: f64,
    pub net_source_output: f64,
    pub min_cp: f64,
    pub max_cp: f64,
    pub timing: TimingSnapshot,
}

pub fn surface_records(result: &CaseResult) -> Vec<SurfaceRecord> {
    let solution = &result.solution;
    let surface = &solution.surface;
    solution
        .geometry
        .iter()
        .zip(solution.strengths.iter())
        .map(|(p, sigma)| {
            let i = p.index;
            let n = p.normal();
            SurfaceRecord {
                index: i,
                x: p.control_point.x,
                y: p.control_point.y,
                nx: n.x,
                ny: n.y,
                u: surface.velocity[i].x,
                w: surface.velocity[i].y,
                qt: surface.tangential[i],
                qn: surface.normal[i],
                speed: surface.speed[i],
                cp: surface.pressure_coefficient[i],
                sigma,
            }
        })
        .collect()
}

pub fn outline_snapshot(result: &CaseResult) -> OutlineSnapshot {
    let (x, y) = result.solution.geometry.node_xy();
    OutlineSnapshot { x, y }
}

pub fn field_snapshot(result: &CaseResult) -> FieldSnapshot {
    let field = &result.field;
    FieldSnapshot {
        xs: field.grid.xs().to_vec(),
        ys: field.grid.ys().to_vec(),
        u: field.u(),
        w: field.w(),
        speed: field.speed.clone(),
        sanitized_contributions: field.sanitized_contributions,
    }
}

pub fn run_summary(result: &CaseResult) -> RunSummary {
    let solution = &result.solution;
    let t = &result.timing;
    let surface = solution.surface.summary();
    RunSummary {
        free_stream_u: solution.free_stream.u,
        free_stream_w: solution.free_stream.w,
        radius: result.config.radius,
        panel_count: solution.geometry.panel_count(),
        relative_residual: solution.relative_residual,
        max_normal_residual: surface.max_normal_residual,
        sigma_sum: solution.strengths.sum(),
        net_source_output: solution.net_source_output(),
        min_cp: surface.min_pressure_coefficient,
        max_cp: surface.max_pressure_coefficient,
        timing: TimingSnapshot {
            geometry_s: t.geometry_s,
            assembly_s: t.assembly_s,
            solve_s: t.solve_s,
            surface_s: t.surface_s,
            field_s: t.field_s,
            total_s: t.total_s,
        },
    }
}
