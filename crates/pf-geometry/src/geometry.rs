//! Immutable discretized body.

use pf_core::{Point, Real, Vec2};

use crate::panel::Panel;

/// A closed body split into panels, each paired with its control point.
///
/// Built by [`GeometryBuilder`](crate::GeometryBuilder); never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub(crate) nodes: Vec<Point>,
    pub(crate) panels: Vec<Panel>,
    pub(crate) control_points: Vec<Point>,
}

/// Borrowed view of panel `index` and its control point.
#[derive(Debug, Clone, Copy)]
pub struct PanelRef<'a> {
    pub index: usize,
    pub panel: &'a Panel,
    pub control_point: Point,
}

impl PanelRef<'_> {
    pub fn normal(&self) -> Vec2 {
        self.panel.normal()
    }

    pub fn tangent(&self) -> Vec2 {
        self.panel.tangent()
    }
}

impl Geometry {
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Panel endpoints in traversal order; `nodes()[panel_count()]` closes the loop.
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    pub fn normals(&self) -> Vec<Vec2> {
        self.panels.iter().map(Panel::normal).collect()
    }

    pub fn tangents(&self) -> Vec<Vec2> {
        self.panels.iter().map(Panel::tangent).collect()
    }

    pub fn get(&self, index: usize) -> Option<PanelRef<'_>> {
        let panel = self.panels.get(index)?;
        Some(PanelRef {
            index,
            panel,
            control_point: self.control_points[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = PanelRef<'_>> {
        self.panels
            .iter()
            .zip(&self.control_points)
            .enumerate()
            .map(|(index, (panel, &control_point))| PanelRef {
                index,
                panel,
                control_point,
            })
    }

    /// Distance between the last and first node.
    pub fn closure_gap(&self) -> Real {
        match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => (last - first).norm(),
            _ => 0.0,
        }
    }

    pub fn perimeter(&self) -> Real {
        self.panels.iter().map(Panel::length).sum()
    }

    /// Node coordinates split into x and y arrays, for plotting the polygon.
    pub fn node_xy(&self) -> (Vec<Real>, Vec<Real>) {
        self.nodes.iter().map(|p| (p.x, p.y)).unzip()
    }

    /// Control point coordinates split into x and y arrays.
    pub fn control_point_xy(&self) -> (Vec<Real>, Vec<Real>) {
        self.control_points.iter().map(|p| (p.x, p.y)).unzip()
    }
}
