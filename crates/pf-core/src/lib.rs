//! pf-core: stable foundation for panelflow.
//!
//! Contains:
//! - numeric (Real + float helpers)
//! - vector (2D point/vector aliases over nalgebra)

pub mod numeric;
pub mod vector;

// Re-exports: nice ergonomics for downstream crates
pub use numeric::*;
pub use vector::*;
