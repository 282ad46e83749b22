//! pf-project: case file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_case};

use pf_geometry::ControlPointOffset;
use pf_solver::{FlowConfig, FreeStream};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported case file extension: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CaseDef {
    /// Solver configuration for this case.
    pub fn to_flow_config(&self) -> FlowConfig {
        let control_offset = match self.control_offset {
            ControlOffsetDef::MachineEpsilon { multiple } => {
                ControlPointOffset::MachineEpsilon { multiple }
            }
            ControlOffsetDef::RelativeToLength { fraction } => {
                ControlPointOffset::RelativeToLength { fraction }
            }
        };
        FlowConfig {
            free_stream: FreeStream::new(self.flow.u, self.flow.w),
            radius: self.body.radius,
            panel_count: self.body.panels,
            mesh_density: self.grid.density,
            mesh_extent: self.grid.extent,
            control_offset,
        }
    }
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<CaseDef> {
    let content = std::fs::read_to_string(path)?;
    let case: CaseDef = serde_yaml::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_yaml(path: &std::path::Path, case: &CaseDef) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<CaseDef> {
    let content = std::fs::read_to_string(path)?;
    let case: CaseDef = serde_json::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_json(path: &std::path::Path, case: &CaseDef) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_json::to_string_pretty(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a case, picking the format from the file extension.
pub fn load_case(path: &std::path::Path) -> ProjectResult<CaseDef> {
    match extension(path).as_str() {
        "yaml" | "yml" => load_yaml(path),
        "json" => load_json(path),
        other => Err(ProjectError::UnsupportedFormat(other.to_string())),
    }
}

/// Save a case, picking the format from the file extension.
pub fn save_case(path: &std::path::Path, case: &CaseDef) -> ProjectResult<()> {
    match extension(path).as_str() {
        "yaml" | "yml" => save_yaml(path, case),
        "json" => save_json(path, case),
        other => Err(ProjectError::UnsupportedFormat(other.to_string())),
    }
}

fn extension(path: &std::path::Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
