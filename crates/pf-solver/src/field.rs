//! Velocity evaluation by superposition of solved source panels.
//!
//! Surface evaluation runs at the control points and yields tangential and
//! normal velocity plus the pressure coefficient. Grid evaluation samples an
//! arbitrary rectangular mesh; any panel contribution that comes out NaN/Inf
//! (a node lying on the body outline) is replaced by zero before summing.

use pf_core::{Point, Real, Vec2, linspace};
use pf_geometry::Geometry;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::FreeStream;
use crate::error::{SolverError, SolverResult};
use crate::kernel::{panel_source_velocity, sanitize_velocity};
use crate::linear::SourceStrengths;

/// Total velocity at `point`: free stream plus every panel's contribution.
///
/// Not sanitized; use away from the panels themselves.
pub fn velocity_at(
    geometry: &Geometry,
    strengths: &SourceStrengths,
    free_stream: FreeStream,
    point: Point,
) -> Vec2 {
    geometry
        .panels()
        .iter()
        .zip(strengths.iter())
        .fold(free_stream.velocity(), |acc, (panel, sigma)| {
            acc + panel_source_velocity(sigma, point, panel)
        })
}

/// Like [`velocity_at`], but singular contributions count as zero.
///
/// Returns the velocity and how many contributions were replaced.
pub fn velocity_at_sanitized(
    geometry: &Geometry,
    strengths: &SourceStrengths,
    free_stream: FreeStream,
    point: Point,
) -> (Vec2, usize) {
    let mut replaced = 0;
    let mut total = free_stream.velocity();
    for (panel, sigma) in geometry.panels().iter().zip(strengths.iter()) {
        let (v, was_replaced) = sanitize_velocity(panel_source_velocity(sigma, point, panel));
        if was_replaced {
            replaced += 1;
        }
        total += v;
    }
    (total, replaced)
}

/// Reporting extremes of a [`SurfaceSolution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSummary {
    pub max_normal_residual: Real,
    pub min_pressure_coefficient: Real,
    pub max_pressure_coefficient: Real,
}

/// Per-control-point surface quantities.
#[derive(Debug, Clone)]
pub struct SurfaceSolution {
    pub velocity: Vec<Vec2>,
    /// Q . tangent
    pub tangential: Vec<Real>,
    /// Q . normal, ideally zero
    pub normal: Vec<Real>,
    pub speed: Vec<Real>,
    /// 1 - (Qt / V_inf)^2
    pub pressure_coefficient: Vec<Real>,
}

impl SurfaceSolution {
    pub fn len(&self) -> usize {
        self.velocity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocity.is_empty()
    }

    /// Largest |Qn| over the control points.
    pub fn max_normal_residual(&self) -> Real {
        self.normal.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Suction peak.
    pub fn min_pressure_coefficient(&self) -> Real {
        self.pressure_coefficient
            .iter()
            .copied()
            .fold(Real::INFINITY, Real::min)
    }

    /// Stagnation value.
    pub fn max_pressure_coefficient(&self) -> Real {
        self.pressure_coefficient
            .iter()
            .copied()
            .fold(Real::NEG_INFINITY, Real::max)
    }

    pub fn summary(&self) -> SurfaceSummary {
        SurfaceSummary {
            max_normal_residual: self.max_normal_residual(),
            min_pressure_coefficient: self.min_pressure_coefficient(),
            max_pressure_coefficient: self.max_pressure_coefficient(),
        }
    }
}

fn check_strengths(geometry: &Geometry, strengths: &SourceStrengths) -> SolverResult<()> {
    if strengths.len() != geometry.panel_count() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "{} source strengths for {} panels",
                strengths.len(),
                geometry.panel_count()
            ),
        });
    }
    Ok(())
}

/// Velocity, tangential/normal split and Cp at every control point.
pub fn evaluate_surface(
    geometry: &Geometry,
    strengths: &SourceStrengths,
    free_stream: FreeStream,
) -> SolverResult<SurfaceSolution> {
    check_strengths(geometry, strengths)?;
    let v_inf = free_stream.speed();
    if v_inf == 0.0 {
        return Err(SolverError::ProblemSetup {
            what: "free stream speed is zero".to_string(),
        });
    }

    let velocity: Vec<Vec2> = geometry
        .control_points()
        .par_iter()
        .map(|&cp| velocity_at(geometry, strengths, free_stream, cp))
        .collect();

    let n = velocity.len();
    let mut tangential = Vec::with_capacity(n);
    let mut normal = Vec::with_capacity(n);
    let mut speed = Vec::with_capacity(n);
    let mut pressure_coefficient = Vec::with_capacity(n);
    for (q, panel) in velocity.iter().zip(geometry.panels()) {
        let qt = q.dot(&panel.tangent());
        tangential.push(qt);
        normal.push(q.dot(&panel.normal()));
        speed.push(q.norm());
        pressure_coefficient.push(1.0 - (qt / v_inf).powi(2));
    }

    let surface = SurfaceSolution {
        velocity,
        tangential,
        normal,
        speed,
        pressure_coefficient,
    };
    debug!(
        max_normal_residual = surface.max_normal_residual(),
        "evaluated surface velocities"
    );
    Ok(surface)
}

/// Rectangular sampling mesh, stored as separate x and y axes.
///
/// Sample `(ix, iy)` sits at `(xs[ix], ys[iy])`; flattened storage is
/// row-major with one row per y value, like a `meshgrid`.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingGrid {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl SamplingGrid {
    pub fn new(xs: Vec<Real>, ys: Vec<Real>) -> Self {
        Self { xs, ys }
    }

    /// `density x density` samples over `[-half_width, half_width]^2`.
    pub fn square(half_width: Real, density: usize) -> Self {
        let axis = linspace(-half_width, half_width, density);
        Self {
            xs: axis.clone(),
            ys: axis,
        }
    }

    pub fn xs(&self) -> &[Real] {
        &self.xs
    }

    pub fn ys(&self) -> &[Real] {
        &self.ys
    }

    pub fn nx(&self) -> usize {
        self.xs.len()
    }

    pub fn ny(&self) -> usize {
        self.ys.len()
    }

    pub fn len(&self) -> usize {
        self.nx() * self.ny()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flat_index(&self, ix: usize, iy: usize) -> Option<usize> {
        (ix < self.nx() && iy < self.ny()).then(|| iy * self.nx() + ix)
    }

    pub fn point(&self, ix: usize, iy: usize) -> Option<Point> {
        Some(Point::new(*self.xs.get(ix)?, *self.ys.get(iy)?))
    }

    /// All sample points in row-major order.
    pub fn points(&self) -> Vec<Point> {
        self.ys
            .iter()
            .flat_map(|&y| self.xs.iter().map(move |&x| Point::new(x, y)))
            .collect()
    }
}

/// Velocity sampled on a [`SamplingGrid`].
#[derive(Debug, Clone)]
pub struct FlowField {
    pub grid: SamplingGrid,
    /// Row-major, see [`SamplingGrid`]
    pub velocity: Vec<Vec2>,
    pub speed: Vec<Real>,
    /// Panel contributions replaced by zero
    pub sanitized_contributions: usize,
}

impl FlowField {
    pub fn velocity_at(&self, ix: usize, iy: usize) -> Option<Vec2> {
        self.grid.flat_index(ix, iy).map(|k| self.velocity[k])
    }

    pub fn speed_at(&self, ix: usize, iy: usize) -> Option<Real> {
        self.grid.flat_index(ix, iy).map(|k| self.speed[k])
    }

    pub fn u(&self) -> Vec<Real> {
        self.velocity.iter().map(|v| v.x).collect()
    }

    pub fn w(&self) -> Vec<Real> {
        self.velocity.iter().map(|v| v.y).collect()
    }
}

/// Sample the total velocity at every grid node.
pub fn evaluate_grid(
    geometry: &Geometry,
    strengths: &SourceStrengths,
    free_stream: FreeStream,
    grid: &SamplingGrid,
) -> SolverResult<FlowField> {
    check_strengths(geometry, strengths)?;

    let samples: Vec<(Vec2, usize)> = grid
        .points()
        .into_par_iter()
        .map(|p| velocity_at_sanitized(geometry, strengths, free_stream, p))
        .collect();

    let sanitized_contributions = samples.iter().map(|(_, n)| n).sum();
    let velocity: Vec<Vec2> = samples.into_iter().map(|(v, _)| v).collect();
    let speed = velocity.iter().map(|v| v.norm()).collect();

    if sanitized_contributions > 0 {
        warn!(
            sanitized_contributions,
            "grid nodes on the body outline; singular contributions set to zero"
        );
    }
    debug!(nx = grid.nx(), ny = grid.ny(), "evaluated flow field");

    Ok(FlowField {
        grid: grid.clone(),
        velocity,
        speed,
        sanitized_contributions,
    })
}
