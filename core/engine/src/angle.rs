//! FILENAME: core/engine/src/angle.rs
//! PURPOSE: Angle mode and degree/radian adaptation for trig operations.
//! CONTEXT: Both the function registry and the expression evaluator route
//! trigonometric calls through these conversions, so the two surfaces give
//! identical results for the same input and mode. Hyperbolic functions are
//! never adapted.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// Whether trigonometric inputs/outputs are interpreted in degrees or radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    /// Parses a mode name. Accepts "degrees"/"deg" and "radians"/"rad",
    /// case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "degrees" | "deg" => Ok(AngleMode::Degrees),
            "radians" | "rad" => Ok(AngleMode::Radians),
            other => Err(CalcError::domain(format!(
                "Angle mode must be 'degrees' or 'radians', got '{}'",
                other
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AngleMode::Degrees => "degrees",
            AngleMode::Radians => "radians",
        }
    }

    /// Converts a trig input to radians when in degree mode.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle.to_radians(),
            AngleMode::Radians => angle,
        }
    }

    /// Converts an inverse-trig output from radians when in degree mode.
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle.to_degrees(),
            AngleMode::Radians => angle,
        }
    }

    /// Toggles between the two modes.
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }
}

impl std::fmt::Display for AngleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
