//! Straight boundary panels.

use pf_core::{Point, Real, Vec2, perp};

use crate::error::{GeometryError, GeometryResult};
use crate::frame::PanelFrame;

/// A straight segment of the body boundary.
///
/// The tangent runs from `start` to `end`; the normal is the tangent rotated by
/// +90 degrees, which points out of the body for a clockwise traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub start: Point,
    pub end: Point,
    frame: PanelFrame,
}

impl Panel {
    pub fn new(start: Point, end: Point) -> GeometryResult<Self> {
        let frame = PanelFrame::new(start, end)?;
        Ok(Self { start, end, frame })
    }

    /// Same as [`Panel::new`] but tags a degenerate-panel error with its index.
    pub(crate) fn indexed(index: usize, start: Point, end: Point) -> GeometryResult<Self> {
        Self::new(start, end).map_err(|err| match err {
            GeometryError::DegeneratePanel { x, y, .. } => GeometryError::DegeneratePanel {
                index: Some(index),
                x,
                y,
            },
            other => other,
        })
    }

    pub fn length(&self) -> Real {
        self.frame.length()
    }

    pub fn tangent(&self) -> Vec2 {
        Vec2::new(self.frame.cos_alpha(), self.frame.sin_alpha())
    }

    pub fn normal(&self) -> Vec2 {
        perp(self.tangent())
    }

    pub fn midpoint(&self) -> Point {
        nalgebra::center(&self.start, &self.end)
    }

    pub fn frame(&self) -> &PanelFrame {
        &self.frame
    }

    /// The same segment traversed the other way.
    pub fn reversed(&self) -> GeometryResult<Self> {
        Self::new(self.end, self.start)
    }
}
