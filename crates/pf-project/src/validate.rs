//! Case validation logic.

use crate::schema::{CaseDef, ControlOffsetDef, LATEST_VERSION};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

pub fn validate_case(case: &CaseDef) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    if case.name.trim().is_empty() {
        return Err(invalid("name", "", "must not be empty"));
    }

    let flow = case.flow;
    if !flow.u.is_finite() || !flow.w.is_finite() {
        return Err(invalid(
            "flow",
            format!("({}, {})", flow.u, flow.w),
            "must be finite",
        ));
    }
    if flow.u == 0.0 && flow.w == 0.0 {
        return Err(invalid("flow", "(0, 0)", "free stream speed must be non-zero"));
    }

    positive("body.radius", case.body.radius)?;
    if case.body.panels < 3 {
        return Err(invalid("body.panels", case.body.panels, "need at least 3 panels"));
    }

    if case.grid.density < 2 {
        return Err(invalid("grid.density", case.grid.density, "need at least 2 samples per axis"));
    }
    positive("grid.extent", case.grid.extent)?;

    match case.control_offset {
        ControlOffsetDef::MachineEpsilon { multiple } => {
            positive("control_offset.multiple", multiple)?
        }
        ControlOffsetDef::RelativeToLength { fraction } => {
            positive("control_offset.fraction", fraction)?;
            if fraction >= 0.5 {
                return Err(invalid(
                    "control_offset.fraction",
                    fraction,
                    "control point must stay close to its panel",
                ));
            }
        }
    }

    Ok(())
}
