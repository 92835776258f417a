//! FILENAME: core/engine/src/conversions.rs
//! PURPOSE: Pairwise unit conversions keyed by (category, from_unit, to_unit).
//! CONTEXT: Conversions are pure functions. An unrecognized category or an
//! unsupported unit pair is an unknown-operation error, not a domain error.

use crate::error::{CalcError, Result};

/// Conversion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionCategory {
    Temperature,
    Angle,
    Length,
}

impl ConversionCategory {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "temperature" => Ok(ConversionCategory::Temperature),
            "angle" => Ok(ConversionCategory::Angle),
            "length" => Ok(ConversionCategory::Length),
            other => Err(CalcError::unknown_operation(format!(
                "conversion category '{}'",
                other
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConversionCategory::Temperature => "temperature",
            ConversionCategory::Angle => "angle",
            ConversionCategory::Length => "length",
        }
    }

    /// Supported (from, to) unit pairs for this category.
    pub fn pairs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ConversionCategory::Temperature => &[
                ("celsius", "fahrenheit"),
                ("fahrenheit", "celsius"),
                ("celsius", "kelvin"),
                ("kelvin", "celsius"),
                ("fahrenheit", "kelvin"),
                ("kelvin", "fahrenheit"),
            ],
            ConversionCategory::Angle => &[
                ("degrees", "radians"),
                ("radians", "degrees"),
                ("degrees", "gradians"),
                ("gradians", "degrees"),
            ],
            ConversionCategory::Length => &[
                ("meters", "feet"),
                ("feet", "meters"),
                ("inches", "cm"),
                ("cm", "inches"),
            ],
        }
    }
}

/// Feet per meter.
const METERS_TO_FEET: f64 = 3.28084;
/// Centimeters per inch.
const INCHES_TO_CM: f64 = 2.54;

/// Converts `value` between units of the named category.
pub fn convert(category: &str, from_unit: &str, to_unit: &str, value: f64) -> Result<f64> {
    let category = ConversionCategory::from_name(category)?;

    let unknown_pair = || {
        CalcError::unknown_operation(format!(
            "conversion '{}_to_{}' in category '{}'",
            from_unit,
            to_unit,
            category.name()
        ))
    };

    match category {
        ConversionCategory::Temperature => match (from_unit, to_unit) {
            ("celsius", "fahrenheit") => Ok(value * 9.0 / 5.0 + 32.0),
            ("fahrenheit", "celsius") => Ok((value - 32.0) * 5.0 / 9.0),
            ("celsius", "kelvin") => Ok(value + 273.15),
            ("kelvin", "celsius") => Ok(value - 273.15),
            ("fahrenheit", "kelvin") => Ok((value - 32.0) * 5.0 / 9.0 + 273.15),
            ("kelvin", "fahrenheit") => Ok((value - 273.15) * 9.0 / 5.0 + 32.0),
            _ => Err(unknown_pair()),
        },
        ConversionCategory::Angle => match (from_unit, to_unit) {
            ("degrees", "radians") => Ok(value.to_radians()),
            ("radians", "degrees") => Ok(value.to_degrees()),
            ("degrees", "gradians") => Ok(value * 10.0 / 9.0),
            ("gradians", "degrees") => Ok(value * 9.0 / 10.0),
            _ => Err(unknown_pair()),
        },
        ConversionCategory::Length => match (from_unit, to_unit) {
            ("meters", "feet") => Ok(value * METERS_TO_FEET),
            ("feet", "meters") => Ok(value / METERS_TO_FEET),
            ("inches", "cm") => Ok(value * INCHES_TO_CM),
            ("cm", "inches") => Ok(value / INCHES_TO_CM),
            _ => Err(unknown_pair()),
        },
    }
}
