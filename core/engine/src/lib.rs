//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the calculator engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod angle;
pub mod constants;
pub mod conversions;
pub mod error;
pub mod evaluator;
pub mod memory;
pub mod number_format;
pub mod registry;
pub mod session;
pub mod statistics;

// Re-export commonly used types at the crate root
pub use angle::AngleMode;
pub use conversions::{convert, ConversionCategory};
pub use error::{CalcError, Result};
pub use evaluator::{evaluate_expression, Evaluator};
pub use memory::{CalculatorMemory, HistoryEntry, DEFAULT_HISTORY_CAPACITY};
pub use number_format::{format_result, DEFAULT_PRECISION, MAX_PRECISION};
pub use registry::{
    evaluate, BasicOp, Category, CombFn, LogFn, NumberTheoryFn, PowerFn, StatFn, TrigFn,
};
pub use session::Session;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_test_expression_workflow() {
        let mut session = Session::new();

        let result = session.evaluate_expression("sqrt(16) + log(100) * sin(30)").unwrap();
        assert!((result - 5.0).abs() < 1e-9);

        let formatted = format_result(result, DEFAULT_PRECISION);
        session.memory_mut().add_to_history("sqrt(16) + log(100) * sin(30)", formatted.as_str());

        assert_eq!(session.memory().history_len(), 1);
        assert_eq!(session.memory().history(None)[0].result, "5");
    }

    #[test]
    fn integration_test_registry_and_evaluator_agree() {
        // Registry calls and expression evaluation must give identical
        // trig results for the same input and mode.
        for mode in [AngleMode::Degrees, AngleMode::Radians] {
            for op in ["sin", "cos", "tan"] {
                let via_registry = evaluate("trig", op, &[30.0], mode).unwrap();
                let via_expr =
                    evaluate_expression(&format!("{}(30)", op), mode).unwrap();
                assert_eq!(via_registry, via_expr, "{} in {:?}", op, mode);
            }
        }
    }

    #[test]
    fn integration_test_angle_round_trip() {
        let session = Session::new();
        let sine = session.evaluate("trig", "sine", &[30.0]).unwrap();
        let back = session.evaluate("trig", "arc_sine", &[sine]).unwrap();
        assert!((back - 30.0).abs() < 1e-9);
    }

    #[test]
    fn integration_test_memory_workflow() {
        let mut session = Session::new();

        let result = session.evaluate("basic", "+", &[5.0, 3.0]).unwrap();
        assert_eq!(result, 8.0);

        session.memory_mut().store(result);
        session.memory_mut().add(2.0);
        assert_eq!(session.memory().recall(), 10.0);

        // Failed divide leaves memory intact
        assert!(session.memory_mut().divide(0.0).is_err());
        assert_eq!(session.memory().recall(), 10.0);
    }

    #[test]
    fn integration_test_variables() {
        let mut session = Session::new();
        session.memory_mut().store_variable("rate", 0.07);
        assert_eq!(session.memory().recall_variable("rate").unwrap(), 0.07);
        assert!(matches!(
            session.memory().recall_variable("missing"),
            Err(CalcError::NotFound(_))
        ));
    }

    #[test]
    fn integration_test_conversions() {
        assert_eq!(convert("temperature", "celsius", "fahrenheit", 0.0).unwrap(), 32.0);
        assert!(matches!(
            convert("temperature", "celsius", "rankine", 0.0),
            Err(CalcError::UnknownOperation(_))
        ));
    }

    #[test]
    fn integration_test_angle_mode_serializes() {
        let json = serde_json::to_string(&AngleMode::Radians).unwrap();
        assert_eq!(json, "\"radians\"");
        let mode: AngleMode = serde_json::from_str("\"degrees\"").unwrap();
        assert_eq!(mode, AngleMode::Degrees);
    }
}
