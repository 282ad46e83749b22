//! Body discretization.

use std::f64::consts::PI;

use pf_core::{EPSILON, Point, Real, linspace};

use crate::error::GeometryResult;
use crate::geometry::Geometry;
use crate::panel::Panel;
use crate::validate;

/// How far a control point sits outside its panel, along the outward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPointOffset {
    /// `multiple` machine epsilons relative to the panel's coordinate magnitude,
    /// `max(|midpoint|, length)`, so the offset stays above rounding in the
    /// panel frame for bodies of any size.
    MachineEpsilon { multiple: Real },
    /// A fraction of the panel length.
    RelativeToLength { fraction: Real },
}

impl Default for ControlPointOffset {
    fn default() -> Self {
        ControlPointOffset::MachineEpsilon { multiple: 100.0 }
    }
}

impl ControlPointOffset {
    /// Offset distance for `panel`.
    pub fn distance(&self, panel: &Panel) -> Real {
        match *self {
            ControlPointOffset::MachineEpsilon { multiple } => {
                let scale = panel.midpoint().coords.norm().max(panel.length());
                multiple * EPSILON * scale
            }
            ControlPointOffset::RelativeToLength { fraction } => fraction * panel.length(),
        }
    }
}

/// Builds an immutable [`Geometry`] from body parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryBuilder {
    offset: ControlPointOffset,
}

impl GeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: ControlPointOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn offset(&self) -> ControlPointOffset {
        self.offset
    }

    /// Circle of `radius` centred on the origin, split into `panel_count` panels.
    ///
    /// Nodes sit at evenly spaced angles from pi down to -pi, so the boundary
    /// is walked clockwise starting at the leading point (-R, 0). The final
    /// node is pinned to the first so the loop is closed exactly.
    pub fn circle(&self, radius: Real, panel_count: usize) -> GeometryResult<Geometry> {
        validate::validate_circle(radius, panel_count)?;

        let mut nodes: Vec<Point> = linspace(PI, -PI, panel_count + 1)
            .into_iter()
            .map(|theta| Point::new(radius * theta.cos(), radius * theta.sin()))
            .collect();
        nodes[panel_count] = nodes[0];

        self.from_nodes(nodes)
    }

    /// Body from an explicit clockwise point loop whose last point repeats the first.
    pub fn from_points(&self, mut points: Vec<Point>) -> GeometryResult<Geometry> {
        validate::validate_points(&points)?;
        validate::validate_panel_count(points.len().saturating_sub(1))?;
        validate::validate_closure(&points)?;

        let last = points.len() - 1;
        points[last] = points[0];
        self.from_nodes(points)
    }

    fn from_nodes(&self, nodes: Vec<Point>) -> GeometryResult<Geometry> {
        let panels = nodes
            .windows(2)
            .enumerate()
            .map(|(i, pair)| Panel::indexed(i, pair[0], pair[1]))
            .collect::<GeometryResult<Vec<_>>>()?;

        let control_points = panels
            .iter()
            .map(|panel| panel.midpoint() + panel.normal() * self.offset.distance(panel))
            .collect();

        Ok(Geometry {
            nodes,
            panels,
            control_points,
        })
    }
}
