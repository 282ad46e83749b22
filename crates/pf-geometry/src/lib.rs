//! pf-geometry: body discretization for panelflow.
//!
//! Provides:
//! - Straight panels with unit tangent and outward normal
//! - Panel-local coordinate frames (global <-> panel transforms)
//! - A builder that turns a circle (or an explicit closed point loop) into an
//!   immutable `Geometry` with offset control points
//!
//! # Example
//!
//! ```
//! use pf_geometry::GeometryBuilder;
//!
//! let geometry = GeometryBuilder::new().circle(1.0, 100).unwrap();
//!
//! assert_eq!(geometry.panel_count(), 100);
//! assert_eq!(geometry.nodes().len(), 101);
//! assert_eq!(geometry.nodes()[0], geometry.nodes()[100]);
//! ```

pub mod builder;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod panel;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{ControlPointOffset, GeometryBuilder};
pub use error::{GeometryError, GeometryResult};
pub use frame::{PanelFrame, to_global_frame, to_panel_frame};
pub use geometry::{Geometry, PanelRef};
pub use panel::Panel;
