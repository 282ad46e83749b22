//! Case file schema definitions.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDef {
    pub version: u32,
    pub name: String,
    pub flow: FreeStreamDef,
    pub body: CylinderDef,
    #[serde(default)]
    pub grid: GridDef,
    #[serde(default)]
    pub control_offset: ControlOffsetDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FreeStreamDef {
    pub u: f64,
    #[serde(default)]
    pub w: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CylinderDef {
    pub radius: f64,
    pub panels: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridDef {
    /// Samples per axis
    #[serde(default = "default_density")]
    pub density: usize,
    /// Half-width in radii
    #[serde(default = "default_extent")]
    pub extent: f64,
}

fn default_density() -> usize {
    100
}

fn default_extent() -> f64 {
    2.0
}

impl Default for GridDef {
    fn default() -> Self {
        Self {
            density: default_density(),
            extent: default_extent(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ControlOffsetDef {
    MachineEpsilon { multiple: f64 },
    RelativeToLength { fraction: f64 },
}

impl Default for ControlOffsetDef {
    fn default() -> Self {
        ControlOffsetDef::MachineEpsilon { multiple: 100.0 }
    }
}

impl Default for CaseDef {
    /// The reference cylinder: R = 1, 100 panels, U = 10.
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "Single cylinder".to_string(),
            flow: FreeStreamDef { u: 10.0, w: 0.0 },
            body: CylinderDef {
                radius: 1.0,
                panels: 100,
            },
            grid: GridDef::default(),
            control_offset: ControlOffsetDef::default(),
        }
    }
}
