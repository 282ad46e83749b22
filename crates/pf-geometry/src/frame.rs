//! Panel-local coordinate frames.
//!
//! A panel frame puts its origin at the panel start with the x-axis running
//! along the panel toward its end. Global points are rotated and translated
//! into the frame; panel-local vectors are rotated back to global axes with the
//! transposed rotation.

use pf_core::{Point, Real, Vec2};

use crate::error::{GeometryError, GeometryResult};

/// Cached rotation for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    origin: Point,
    cos_alpha: Real,
    sin_alpha: Real,
    length: Real,
}

impl PanelFrame {
    /// Derive the frame of the segment `origin -> end`.
    ///
    /// Fails with [`GeometryError::DegeneratePanel`] when the two points coincide.
    pub fn new(origin: Point, end: Point) -> GeometryResult<Self> {
        let d = end - origin;
        let length = d.norm();
        if length == 0.0 || !length.is_finite() {
            return Err(GeometryError::DegeneratePanel {
                index: None,
                x: origin.x,
                y: origin.y,
            });
        }
        Ok(Self {
            origin,
            cos_alpha: d.x / length,
            sin_alpha: d.y / length,
            length,
        })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn length(&self) -> Real {
        self.length
    }

    pub fn cos_alpha(&self) -> Real {
        self.cos_alpha
    }

    pub fn sin_alpha(&self) -> Real {
        self.sin_alpha
    }

    /// Express a global point in this frame.
    #[inline]
    pub fn to_local(&self, p: Point) -> Point {
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        Point::new(
            self.cos_alpha * dx + self.sin_alpha * dy,
            -self.sin_alpha * dx + self.cos_alpha * dy,
        )
    }

    /// Rotate a frame-local vector back to global axes.
    #[inline]
    pub fn to_global(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.cos_alpha * v.x - self.sin_alpha * v.y,
            self.sin_alpha * v.x + self.cos_alpha * v.y,
        )
    }
}

/// Transform `point` into the frame of the panel `origin -> end`.
pub fn to_panel_frame(point: Point, origin: Point, end: Point) -> GeometryResult<Point> {
    Ok(PanelFrame::new(origin, end)?.to_local(point))
}

/// Rotate a vector given in the frame of the panel `origin -> end` to global axes.
pub fn to_global_frame(vector: Vec2, origin: Point, end: Point) -> GeometryResult<Vec2> {
    Ok(PanelFrame::new(origin, end)?.to_global(vector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{point, vec2};

    const TOL: Real = 1e-12;

    #[test]
    fn panel_end_maps_onto_local_x_axis() {
        let origin = point(1.0, 1.0);
        let end = point(4.0, 5.0);
        let frame = PanelFrame::new(origin, end).unwrap();

        let local_origin = frame.to_local(origin);
        let local_end = frame.to_local(end);

        assert!(local_origin.coords.norm() < TOL);
        assert!((local_end.x - 5.0).abs() < TOL);
        assert!(local_end.y.abs() < TOL);
        assert!((frame.length() - 5.0).abs() < TOL);
    }

    #[test]
    fn point_left_of_panel_has_positive_local_y() {
        // Panel along +x: the left side is +y.
        let p = to_panel_frame(point(0.5, 2.0), point(0.0, 0.0), point(1.0, 0.0)).unwrap();
        assert!((p.x - 0.5).abs() < TOL);
        assert!((p.y - 2.0).abs() < TOL);

        // Panel along -x: the left side is -y.
        let p = to_panel_frame(point(0.5, -2.0), point(1.0, 0.0), point(0.0, 0.0)).unwrap();
        assert!((p.x - 0.5).abs() < TOL);
        assert!((p.y - 2.0).abs() < TOL);
    }

    #[test]
    fn local_axes_rotate_to_tangent_and_normal() {
        let frame = PanelFrame::new(point(0.0, 0.0), point(0.0, 2.0)).unwrap();
        // tangent is +y, normal is -x
        let t = frame.to_global(vec2(1.0, 0.0));
        let n = frame.to_global(vec2(0.0, 1.0));
        assert!((t - vec2(0.0, 1.0)).norm() < TOL);
        assert!((n - vec2(-1.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn global_and_local_transforms_are_inverse_rotations() {
        let origin = point(-0.3, 0.7);
        let end = point(0.9, -1.4);
        let frame = PanelFrame::new(origin, end).unwrap();

        let g = point(2.0, 3.0);
        let local = frame.to_local(g);
        let back = origin + frame.to_global(local.coords);
        assert!((back - g).norm() < TOL);
    }

    #[test]
    fn coincident_points_are_rejected() {
        let p = point(1.0, 2.0);
        let err = to_panel_frame(point(0.0, 0.0), p, p).unwrap_err();
        assert!(matches!(err, GeometryError::DegeneratePanel { .. }));

        let err = to_global_frame(vec2(1.0, 0.0), p, p).unwrap_err();
        assert!(matches!(err, GeometryError::DegeneratePanel { .. }));
    }
}
