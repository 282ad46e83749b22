//! Input checks run by the builder before any panel is created.

use pf_core::{Point, Real};

use crate::error::{GeometryError, GeometryResult};

pub(crate) const MIN_PANELS: usize = 3;

/// Relative tolerance used to accept an explicit point loop as closed.
pub(crate) const CLOSURE_REL_TOL: Real = 1e-12;

pub(crate) fn validate_circle(radius: Real, panel_count: usize) -> GeometryResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::InvalidParameter {
            what: "radius",
            value: radius,
        });
    }
    validate_panel_count(panel_count)
}

pub(crate) fn validate_panel_count(panel_count: usize) -> GeometryResult<()> {
    if panel_count < MIN_PANELS {
        return Err(GeometryError::NotEnoughPanels {
            count: panel_count,
            min: MIN_PANELS,
        });
    }
    Ok(())
}

pub(crate) fn validate_points(points: &[Point]) -> GeometryResult<()> {
    for (index, p) in points.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(GeometryError::NonFinitePoint { index });
        }
    }
    Ok(())
}

/// Check that the loop ends where it starts, relative to the loop's extent.
pub(crate) fn validate_closure(points: &[Point]) -> GeometryResult<()> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Ok(());
    };
    let extent = points
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, Real::max)
        .max(1.0);
    let gap = (last - first).norm();
    if gap > CLOSURE_REL_TOL * extent {
        return Err(GeometryError::OpenContour { gap });
    }
    Ok(())
}
