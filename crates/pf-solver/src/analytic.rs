//! Exact potential flow past a circular cylinder.
//!
//! Reference values for checking the panel solution:
//! surface speed `2 V sin(theta)` and `Cp = 1 - 4 sin^2(theta)`, with theta
//! measured from the downstream stagnation point and the sign following the
//! clockwise panel tangent.

use pf_core::{Point, Real, Vec2};
use pf_geometry::Geometry;

use crate::config::FreeStream;
use crate::field::SurfaceSolution;

#[derive(Debug, Clone, Copy)]
pub struct CylinderFlow {
    pub radius: Real,
    pub free_stream: FreeStream,
}

impl CylinderFlow {
    pub fn new(radius: Real, free_stream: FreeStream) -> Self {
        Self {
            radius,
            free_stream,
        }
    }

    /// Flow angle of the free stream.
    fn stream_angle(&self) -> Real {
        self.free_stream.w.atan2(self.free_stream.u)
    }

    /// Polar angle of `p` measured from the free-stream direction.
    pub fn surface_angle(&self, p: Point) -> Real {
        p.y.atan2(p.x) - self.stream_angle()
    }

    pub fn surface_tangential_speed(&self, theta: Real) -> Real {
        2.0 * self.free_stream.speed() * theta.sin()
    }

    pub fn pressure_coefficient(&self, theta: Real) -> Real {
        let s = theta.sin();
        1.0 - 4.0 * s * s
    }

    /// Exact velocity at `p`; meaningful for `|p| >= radius`.
    pub fn velocity(&self, p: Point) -> Vec2 {
        let alpha = self.stream_angle();
        let (sin_a, cos_a) = alpha.sin_cos();
        // rotate into the stream-aligned frame
        let x = cos_a * p.x + sin_a * p.y;
        let y = -sin_a * p.x + cos_a * p.y;

        let v = self.free_stream.speed();
        let r2 = x * x + y * y;
        let k = self.radius * self.radius / (r2 * r2);
        let u_s = v * (1.0 - k * (x * x - y * y));
        let w_s = -v * 2.0 * k * x * y;

        Vec2::new(cos_a * u_s - sin_a * w_s, sin_a * u_s + cos_a * w_s)
    }

    /// Largest |Cp_panel - Cp_exact| over the control points.
    pub fn max_pressure_error(&self, geometry: &Geometry, surface: &SurfaceSolution) -> Real {
        geometry
            .control_points()
            .iter()
            .zip(&surface.pressure_coefficient)
            .map(|(&cp, &value)| (value - self.pressure_coefficient(self.surface_angle(cp))).abs())
            .fold(0.0, Real::max)
    }

    /// Largest |Qt_panel - Qt_exact| relative to the free-stream speed.
    pub fn max_tangential_error(&self, geometry: &Geometry, surface: &SurfaceSolution) -> Real {
        let v = self.free_stream.speed();
        geometry
            .control_points()
            .iter()
            .zip(&surface.tangential)
            .map(|(&cp, &qt)| {
                let exact = self.surface_tangential_speed(self.surface_angle(cp));
                (qt - exact).abs() / v
            })
            .fold(0.0, Real::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::point;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn surface_extremes() {
        let flow = CylinderFlow::new(1.0, FreeStream::new(10.0, 0.0));
        assert!((flow.pressure_coefficient(0.0) - 1.0).abs() < 1e-12);
        assert!((flow.pressure_coefficient(FRAC_PI_2) + 3.0).abs() < 1e-12);
        assert!((flow.surface_tangential_speed(FRAC_PI_2) - 20.0).abs() < 1e-12);
        assert!((flow.surface_tangential_speed(-FRAC_PI_2) + 20.0).abs() < 1e-12);
    }

    #[test]
    fn field_velocity_matches_surface_and_far_field() {
        let flow = CylinderFlow::new(2.0, FreeStream::new(3.0, 0.0));
        let top = flow.velocity(point(0.0, 2.0));
        assert!((top.x - 6.0).abs() < 1e-12);
        assert!(top.y.abs() < 1e-12);

        let stagnation = flow.velocity(point(-2.0, 0.0));
        assert!(stagnation.norm() < 1e-12);

        let far = flow.velocity(point(1e4, 3e4));
        assert!((far.x - 3.0).abs() < 1e-6);
        assert!(far.y.abs() < 1e-6);
    }

    #[test]
    fn rotated_free_stream_rotates_field() {
        let flow = CylinderFlow::new(1.0, FreeStream::new(0.0, 2.0));
        // stream along +y: stagnation at (0, -1), fastest at (+-1, 0)
        assert!(flow.velocity(point(0.0, -1.0)).norm() < 1e-12);
        let side = flow.velocity(point(1.0, 0.0));
        assert!(side.x.abs() < 1e-12);
        assert!((side.y - 4.0).abs() < 1e-12);
    }
}
