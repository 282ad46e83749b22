//! Closed-form induced velocities of 2D singularity elements.
//!
//! Source panel: constant strength per unit length along a straight segment.
//! Point vortex: concentrated circulation at a point. All results are global
//! `(u, w)` velocities.

use std::f64::consts::PI;

use pf_core::{Point, Real, Vec2, finite_or_zero_vec};
use pf_geometry::{GeometryResult, Panel, PanelFrame};

/// Velocity induced at `point` by a constant-strength source on `start -> end`.
///
/// Evaluating exactly on the panel yields NaN/Inf; this function does not
/// sanitize. Fails only when the panel has zero length.
pub fn source_velocity(
    strength: Real,
    point: Point,
    start: Point,
    end: Point,
) -> GeometryResult<Vec2> {
    let frame = PanelFrame::new(start, end)?;
    Ok(source_velocity_in_frame(strength, point, &frame))
}

/// [`source_velocity`] for an already built panel.
#[inline]
pub fn panel_source_velocity(strength: Real, point: Point, panel: &Panel) -> Vec2 {
    source_velocity_in_frame(strength, point, panel.frame())
}

/// Source panel kernel on a prevalidated frame.
///
/// In panel coordinates the panel spans `(0, 0) -> (L, 0)`:
///
/// ```text
/// u' = sigma / (4 pi) * ln(r1^2 / r2^2)
/// w' = sigma / (2 pi) * (theta2 - theta1)
/// ```
pub fn source_velocity_in_frame(strength: Real, point: Point, frame: &PanelFrame) -> Vec2 {
    let local = frame.to_local(point);
    let (x, y) = (local.x, local.y);
    let x1 = 0.0;
    let x2 = frame.length();

    let r1_sq = (x - x1) * (x - x1) + y * y;
    let r2_sq = (x - x2) * (x - x2) + y * y;
    let theta1 = y.atan2(x - x1);
    let theta2 = y.atan2(x - x2);

    let u_local = strength / (4.0 * PI) * (r1_sq / r2_sq).ln();
    let w_local = strength / (2.0 * PI) * (theta2 - theta1);

    frame.to_global(Vec2::new(u_local, w_local))
}

/// Velocity induced at `point` by a point vortex of circulation `gamma` at `vortex`.
///
/// Positive `gamma` turns clockwise. Singular at the vortex itself.
pub fn point_vortex_velocity(gamma: Real, point: Point, vortex: Point) -> Vec2 {
    let d = point - vortex;
    let r_sq = d.norm_squared();
    let k = gamma / (2.0 * PI);
    Vec2::new(k * d.y / r_sq, -k * d.x / r_sq)
}

/// [`point_vortex_velocity`] with non-finite components replaced by zero, for
/// sampling on meshes that may contain the vortex point.
pub fn point_vortex_velocity_sanitized(gamma: Real, point: Point, vortex: Point) -> Vec2 {
    sanitize_velocity(point_vortex_velocity(gamma, point, vortex)).0
}

/// Mesh policy for singular contributions: each non-finite component becomes
/// zero. The flag reports whether anything was replaced.
pub fn sanitize_velocity(v: Vec2) -> (Vec2, bool) {
    let replaced = !(v.x.is_finite() && v.y.is_finite());
    (finite_or_zero_vec(v), replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{point, vec2};

    const TOL: Real = 1e-12;

    #[test]
    fn sanitize_velocity_flags_replacements() {
        let (v, replaced) = sanitize_velocity(vec2(1.0, -2.0));
        assert_eq!(v, vec2(1.0, -2.0));
        assert!(!replaced);

        let (v, replaced) = sanitize_velocity(vec2(Real::INFINITY, -2.0));
        assert_eq!(v, vec2(0.0, -2.0));
        assert!(replaced);

        let (v, replaced) = sanitize_velocity(vec2(Real::NAN, Real::NAN));
        assert_eq!(v, vec2(0.0, 0.0));
        assert!(replaced);
    }

    #[test]
    fn self_induced_normal_velocity_is_half_strength() {
        // Just above the midpoint the normal jump is sigma/2.
        let v = source_velocity(2.0, point(0.5, 1e-12), point(0.0, 0.0), point(1.0, 0.0)).unwrap();
        assert!((v.y - 1.0).abs() < 1e-9);
        assert!(v.x.abs() < 1e-9);

        let v = source_velocity(2.0, point(0.5, -1e-12), point(0.0, 0.0), point(1.0, 0.0)).unwrap();
        assert!((v.y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn flow_on_axis_beyond_end_points_away() {
        let v = source_velocity(1.0, point(3.0, 0.0), point(0.0, 0.0), point(1.0, 0.0)).unwrap();
        let expected = 1.0 / (4.0 * PI) * (9.0_f64 / 4.0).ln();
        assert!((v.x - expected).abs() < TOL);
        assert!(v.y.abs() < TOL);
    }

    #[test]
    fn far_field_looks_like_point_source() {
        // Total output sigma*L, radial speed sigma*L / (2 pi r).
        let len = 0.1;
        let r = 1000.0;
        let v = source_velocity(3.0, point(0.05, r), point(0.0, 0.0), point(len, 0.0)).unwrap();
        let expected = 3.0 * len / (2.0 * PI * r);
        assert!((v.norm() - expected).abs() / expected < 1e-6);
        assert!(v.y > 0.0);
    }

    #[test]
    fn strength_scales_linearly() {
        let p = point(0.3, 0.7);
        let a = point(-0.2, 0.1);
        let b = point(0.4, -0.3);
        let v1 = source_velocity(1.0, p, a, b).unwrap();
        let v5 = source_velocity(5.0, p, a, b).unwrap();
        assert!((v5 - 5.0 * v1).norm() < TOL);
    }

    #[test]
    fn on_panel_evaluation_is_not_finite() {
        let v = source_velocity(1.0, point(0.0, 0.0), point(0.0, 0.0), point(1.0, 0.0)).unwrap();
        assert!(!v.x.is_finite());
    }

    #[test]
    fn degenerate_panel_fails() {
        let p = point(1.0, 1.0);
        assert!(source_velocity(1.0, point(0.0, 0.0), p, p).is_err());
    }

    #[test]
    fn vortex_velocity_is_tangential() {
        let gamma = 2.0 * PI;
        let v = point_vortex_velocity(gamma, point(1.0, 0.0), point(0.0, 0.0));
        assert!((v - vec2(0.0, -1.0)).norm() < TOL);

        let v = point_vortex_velocity(gamma, point(0.0, 2.0), point(0.0, 0.0));
        assert!((v - vec2(0.5, 0.0)).norm() < TOL);
    }

    #[test]
    fn sanitized_vortex_is_zero_at_its_centre() {
        let c = point(0.2, -0.4);
        let raw = point_vortex_velocity(1.0, c, c);
        assert!(raw.x.is_nan());
        assert_eq!(point_vortex_velocity_sanitized(1.0, c, c), vec2(0.0, 0.0));
    }
}
