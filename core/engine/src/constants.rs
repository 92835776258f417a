//! FILENAME: core/engine/src/constants.rs
//! PURPOSE: Named mathematical and physical constants.
//! CONTEXT: Shells list these for display; the expression evaluator binds
//! only pi, e, and tau into its namespace.

use crate::error::{CalcError, Result};

/// Euler-Mascheroni constant.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// All named constants, in display order: (name, value, description).
pub const CONSTANTS: &[(&str, f64, &str)] = &[
    ("pi", std::f64::consts::PI, "Circle constant π"),
    ("e", std::f64::consts::E, "Euler's number"),
    ("tau", std::f64::consts::TAU, "Circle constant τ = 2π"),
    ("golden_ratio", 1.618_033_988_749_895, "Golden ratio φ"),
    ("sqrt2", std::f64::consts::SQRT_2, "Square root of 2"),
    ("sqrt3", 1.732_050_807_568_877_2, "Square root of 3"),
    ("euler_gamma", EULER_GAMMA, "Euler-Mascheroni constant γ"),
    ("speed_of_light", 299_792_458.0, "Speed of light in vacuum (m/s)"),
    ("planck_constant", 6.626_070_15e-34, "Planck constant (J·s)"),
    ("avogadro_number", 6.022_140_76e23, "Avogadro constant (1/mol)"),
    ("boltzmann_constant", 1.380_649e-23, "Boltzmann constant (J/K)"),
    ("elementary_charge", 1.602_176_634e-19, "Elementary charge (C)"),
    (
        "gravitational_constant",
        6.674_30e-11,
        "Gravitational constant (m³/(kg·s²))",
    ),
];

/// Looks up a constant by name.
pub fn lookup(name: &str) -> Result<f64> {
    CONSTANTS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, v, _)| *v)
        .ok_or_else(|| CalcError::unknown_operation(format!("constant '{}'", name)))
}

/// Returns all constants as (name, value) pairs.
pub fn all() -> Vec<(&'static str, f64)> {
    CONSTANTS.iter().map(|(n, v, _)| (*n, *v)).collect()
}
