//! Flow configuration.

use pf_core::{Real, Vec2};
use pf_geometry::ControlPointOffset;

use crate::error::{SolverError, SolverResult};

/// Uniform far-field velocity `(u, w)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeStream {
    pub u: Real,
    pub w: Real,
}

impl FreeStream {
    pub fn new(u: Real, w: Real) -> Self {
        Self { u, w }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.u, self.w)
    }

    pub fn speed(&self) -> Real {
        self.u.hypot(self.w)
    }
}

/// Everything needed to run the single-cylinder case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConfig {
    pub free_stream: FreeStream,
    /// Cylinder radius
    pub radius: Real,
    /// Number of panels (and control points)
    pub panel_count: usize,
    /// Samples per axis of the field grid
    pub mesh_density: usize,
    /// Half-width of the square field grid, in radii
    pub mesh_extent: Real,
    pub control_offset: ControlPointOffset,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            free_stream: FreeStream::new(10.0, 0.0),
            radius: 1.0,
            panel_count: 100,
            mesh_density: 100,
            mesh_extent: 2.0,
            control_offset: ControlPointOffset::default(),
        }
    }
}

impl FlowConfig {
    pub fn validate(&self) -> SolverResult<()> {
        let fs = self.free_stream;
        if !fs.u.is_finite() || !fs.w.is_finite() {
            return Err(SolverError::ProblemSetup {
                what: format!("free stream ({}, {}) is not finite", fs.u, fs.w),
            });
        }
        if fs.speed() == 0.0 {
            return Err(SolverError::ProblemSetup {
                what: "free stream speed is zero; pressure coefficient is undefined".to_string(),
            });
        }
        if !(self.mesh_extent.is_finite() && self.mesh_extent > 0.0) {
            return Err(SolverError::ProblemSetup {
                what: format!("mesh extent must be positive, got {}", self.mesh_extent),
            });
        }
        if self.mesh_density < 2 {
            return Err(SolverError::ProblemSetup {
                what: format!("mesh density must be at least 2, got {}", self.mesh_density),
            });
        }
        // radius and panel count are checked by the geometry builder
        Ok(())
    }

    /// Half-width of the field grid in length units.
    pub fn grid_half_width(&self) -> Real {
        self.mesh_extent * self.radius
    }
}
