//! Influence matrix assembly.
//!
//! Row `i` holds the normal velocity at control point `i` induced by a unit
//! source on every panel `j`. The right-hand side cancels the free-stream
//! normal velocity, so `A * sigma = rhs` is the no-penetration condition.

use nalgebra::{DMatrix, DVector};
use pf_geometry::Geometry;
use rayon::prelude::*;
use tracing::debug;

use crate::config::FreeStream;
use crate::kernel::panel_source_velocity;

/// Assembled linear system for the source strengths.
#[derive(Debug, Clone)]
pub struct InfluenceSystem {
    pub matrix: DMatrix<f64>,
    pub rhs: DVector<f64>,
}

impl InfluenceSystem {
    pub fn size(&self) -> usize {
        self.rhs.len()
    }
}

/// Unit-strength induced velocity components: `u[(i, j)]`, `w[(i, j)]` at
/// control point `i` from panel `j`.
pub fn unit_velocity_matrices(geometry: &Geometry) -> (DMatrix<f64>, DMatrix<f64>) {
    let n = geometry.control_points().len();
    let m = geometry.panel_count();

    let rows: Vec<Vec<(f64, f64)>> = geometry
        .control_points()
        .par_iter()
        .map(|&cp| {
            geometry
                .panels()
                .iter()
                .map(|panel| {
                    let v = panel_source_velocity(1.0, cp, panel);
                    (v.x, v.y)
                })
                .collect()
        })
        .collect();

    let mut u = DMatrix::zeros(n, m);
    let mut w = DMatrix::zeros(n, m);
    for (i, row) in rows.iter().enumerate() {
        for (j, &(uij, wij)) in row.iter().enumerate() {
            u[(i, j)] = uij;
            w[(i, j)] = wij;
        }
    }
    (u, w)
}

/// Build `A` and `rhs` for the given body and free stream.
pub fn assemble(geometry: &Geometry, free_stream: FreeStream) -> InfluenceSystem {
    let normals = geometry.normals();
    let (u, w) = unit_velocity_matrices(geometry);

    let n = normals.len();
    let m = geometry.panel_count();
    let matrix = DMatrix::from_fn(n, m, |i, j| {
        u[(i, j)] * normals[i].x + w[(i, j)] * normals[i].y
    });
    let rhs = DVector::from_fn(n, |i, _| {
        -(free_stream.u * normals[i].x + free_stream.w * normals[i].y)
    });

    debug!(rows = n, cols = m, "assembled influence system");
    InfluenceSystem { matrix, rhs }
}
