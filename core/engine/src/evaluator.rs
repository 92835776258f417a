//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates parsed expression trees against the allow-list namespace.
//! CONTEXT: After an expression is parsed into an AST, this module traverses
//! the tree and computes the final result. Only the names below resolve;
//! everything else is rejected, which is what makes the evaluator safe by
//! construction. Trig and inverse-trig bind through the angle mode supplied
//! at evaluation time, so expression results match the function registry
//! for the same mode.
//!
//! ALLOWED NAMES:
//! - Constants: pi, e, tau
//! - Functions: sin, cos, tan, asin, acos, atan, sinh, cosh, tanh,
//!   asinh, acosh, atanh, log, log10, log2, ln, exp, sqrt, cbrt, abs,
//!   floor, ceil, round, factorial, min, max, sum, pow
//!
//! Note: log means log base 10 here; ln is the natural log.
//!
//! Every failure — syntax error, unknown name, wrong argument count,
//! domain violation, division by zero — surfaces as CalcError::Expression.

use parser::{BinaryOperator, Expression, UnaryOperator};

use crate::angle::AngleMode;
use crate::error::{CalcError, Result};
use crate::registry::{self, TrigFn};
use crate::statistics;

/// Parses and evaluates a textual expression in the given angle mode.
pub fn evaluate_expression(text: &str, mode: AngleMode) -> Result<f64> {
    let expr = parser::parse(text)?;
    Evaluator::new(mode).evaluate(&expr)
}

/// The expression evaluator.
/// Holds the angle mode under which trig names are bound.
pub struct Evaluator {
    mode: AngleMode,
}

impl Evaluator {
    pub fn new(mode: AngleMode) -> Self {
        Evaluator { mode }
    }

    /// Evaluates an AST expression and returns the result.
    pub fn evaluate(&self, expr: &Expression) -> Result<f64> {
        match expr {
            Expression::Number(n) => Ok(*n),
            Expression::Identifier(name) => self.eval_identifier(name),
            Expression::BinaryOp { left, op, right } => self.eval_binary_op(left, *op, right),
            Expression::UnaryOp { op, operand } => self.eval_unary_op(*op, operand),
            Expression::FunctionCall { name, args } => self.eval_function(name, args),
        }
    }

    /// Resolves a named constant. Only pi, e, and tau exist.
    fn eval_identifier(&self, name: &str) -> Result<f64> {
        match name {
            "pi" => Ok(std::f64::consts::PI),
            "e" => Ok(std::f64::consts::E),
            "tau" => Ok(std::f64::consts::TAU),
            _ => Err(CalcError::expression(format!(
                "Unknown identifier '{}'",
                name
            ))),
        }
    }

    /// Evaluates a binary operation.
    fn eval_binary_op(
        &self,
        left: &Expression,
        op: BinaryOperator,
        right: &Expression,
    ) -> Result<f64> {
        let l = self.evaluate(left)?;
        let r = self.evaluate(right)?;

        match op {
            BinaryOperator::Add => Ok(l + r),
            BinaryOperator::Subtract => Ok(l - r),
            BinaryOperator::Multiply => Ok(l * r),
            BinaryOperator::Divide => {
                if r == 0.0 {
                    Err(CalcError::expression("Division by zero"))
                } else {
                    Ok(l / r)
                }
            }
            BinaryOperator::Modulo => {
                if r == 0.0 {
                    Err(CalcError::expression("Modulo by zero"))
                } else {
                    // Result takes the sign of the divisor
                    Ok(l - r * (l / r).floor())
                }
            }
            BinaryOperator::FloorDivide => {
                if r == 0.0 {
                    Err(CalcError::expression("Division by zero"))
                } else {
                    Ok((l / r).floor())
                }
            }
            BinaryOperator::Power => {
                let result = l.powf(r);
                if result.is_finite() {
                    Ok(result)
                } else {
                    Err(CalcError::expression(format!(
                        "Power {}^{} is out of range",
                        l, r
                    )))
                }
            }
        }
    }

    /// Evaluates a unary operation.
    fn eval_unary_op(&self, op: UnaryOperator, operand: &Expression) -> Result<f64> {
        let val = self.evaluate(operand)?;
        match op {
            UnaryOperator::Negate => Ok(-val),
        }
    }

    /// Evaluates a function call against the allow-list.
    fn eval_function(&self, name: &str, args: &[Expression]) -> Result<f64> {
        let args = self.eval_args(args)?;

        // Trig and inverse trig bind through the angle mode
        let result = if let Some(f) = allowlisted_trig(name) {
            as_expression_error(f.apply(&args, self.mode))?
        } else {
            self.eval_named_function(name, &args)?
        };

        // A non-finite result from finite inputs means the computation
        // overflowed (e.g. exp(1000), sinh(10000)).
        if result.is_finite() || args.iter().any(|a| !a.is_finite()) {
            Ok(result)
        } else {
            Err(CalcError::expression(format!(
                "Result of {} is out of range",
                name
            )))
        }
    }

    /// Dispatches the non-trig allow-listed functions.
    fn eval_named_function(&self, name: &str, args: &[f64]) -> Result<f64> {
        match name {
            // Logarithms: log means log base 10, ln is the natural log
            "log" | "log10" => self.fn_unary(name, args, |x| positive(x).map(f64::log10)),
            "log2" => self.fn_unary(name, args, |x| positive(x).map(f64::log2)),
            "ln" => self.fn_unary(name, args, |x| positive(x).map(f64::ln)),
            "exp" => self.fn_unary(name, args, |x| Ok(x.exp())),

            // Roots
            "sqrt" => self.fn_unary(name, args, |x| {
                if x < 0.0 {
                    Err(CalcError::expression("Square root of negative number"))
                } else {
                    Ok(x.sqrt())
                }
            }),
            "cbrt" => self.fn_unary(name, args, |x| Ok(x.cbrt())),

            // Rounding and absolute value
            "abs" => self.fn_unary(name, args, |x| Ok(x.abs())),
            "floor" => self.fn_unary(name, args, |x| Ok(x.floor())),
            "ceil" => self.fn_unary(name, args, |x| Ok(x.ceil())),
            "round" => self.fn_round(args),

            // Combinatorics
            "factorial" => self.fn_factorial(args),

            // Variadic aggregates
            "min" => as_expression_error(statistics::min(args)),
            "max" => as_expression_error(statistics::max(args)),
            "sum" => as_expression_error(statistics::sum(args)),

            // Two-argument power
            "pow" => {
                self.expect_args(name, args, 2)?;
                let result = args[0].powf(args[1]);
                if result.is_finite() {
                    Ok(result)
                } else {
                    Err(CalcError::expression(format!(
                        "Power {}^{} is out of range",
                        args[0], args[1]
                    )))
                }
            }

            _ => Err(CalcError::expression(format!(
                "Unknown function '{}'",
                name
            ))),
        }
    }

    /// Evaluates all argument expressions.
    fn eval_args(&self, args: &[Expression]) -> Result<Vec<f64>> {
        args.iter().map(|arg| self.evaluate(arg)).collect()
    }

    fn expect_args(&self, name: &str, args: &[f64], arity: usize) -> Result<()> {
        if args.len() == arity {
            Ok(())
        } else {
            Err(CalcError::expression(format!(
                "{}() expects {} argument(s), got {}",
                name,
                arity,
                args.len()
            )))
        }
    }

    fn fn_unary(&self, name: &str, args: &[f64], f: impl Fn(f64) -> Result<f64>) -> Result<f64> {
        self.expect_args(name, args, 1)?;
        f(args[0])
    }

    /// round(x) or round(x, digits); ties round to even.
    fn fn_round(&self, args: &[f64]) -> Result<f64> {
        match args {
            [x] => Ok(x.round_ties_even()),
            [x, digits] => {
                if digits.fract() != 0.0 {
                    return Err(CalcError::expression("round() digits must be an integer"));
                }
                let factor = 10.0_f64.powi(*digits as i32);
                Ok((x * factor).round_ties_even() / factor)
            }
            _ => Err(CalcError::expression(format!(
                "round() expects 1 or 2 arguments, got {}",
                args.len()
            ))),
        }
    }

    fn fn_factorial(&self, args: &[f64]) -> Result<f64> {
        self.expect_args("factorial", args, 1)?;
        let x = args[0];
        if x.fract() != 0.0 || x < 0.0 {
            return Err(CalcError::expression(
                "factorial requires a non-negative integer",
            ));
        }
        as_expression_error(registry::factorial(x as u64))
    }
}

/// Maps a name to its trig binding. Only the short spellings are part of
/// the expression namespace; the registry's long aliases do not resolve here.
fn allowlisted_trig(name: &str) -> Option<TrigFn> {
    match name {
        "sin" => Some(TrigFn::Sin),
        "cos" => Some(TrigFn::Cos),
        "tan" => Some(TrigFn::Tan),
        "asin" => Some(TrigFn::Asin),
        "acos" => Some(TrigFn::Acos),
        "atan" => Some(TrigFn::Atan),
        "sinh" => Some(TrigFn::Sinh),
        "cosh" => Some(TrigFn::Cosh),
        "tanh" => Some(TrigFn::Tanh),
        "asinh" => Some(TrigFn::Asinh),
        "acosh" => Some(TrigFn::Acosh),
        "atanh" => Some(TrigFn::Atanh),
        _ => None,
    }
}

fn positive(x: f64) -> Result<f64> {
    if x <= 0.0 {
        Err(CalcError::expression("Logarithm requires positive input"))
    } else {
        Ok(x)
    }
}

/// Re-labels registry domain errors as expression errors, preserving the
/// message: inside the evaluator every fault is an expression fault.
fn as_expression_error(result: Result<f64>) -> Result<f64> {
    result.map_err(|err| match err {
        CalcError::Domain(msg) => CalcError::Expression(msg),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> Result<f64> {
        evaluate_expression(text, AngleMode::Degrees)
    }

    // ==================== Arithmetic ====================

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("2 + 3").unwrap(), 5.0);
        assert_eq!(eval("10 - 4").unwrap(), 6.0);
        assert_eq!(eval("6 * 7").unwrap(), 42.0);
        assert_eq!(eval("15 / 3").unwrap(), 5.0);
    }

    #[test]
    fn test_order_of_operations() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn test_caret_equals_double_star() {
        assert_eq!(eval("2^3").unwrap(), 8.0);
        assert_eq!(eval("2**3").unwrap(), 8.0);
    }

    #[test]
    fn test_display_glyphs() {
        assert_eq!(eval("6 × 7").unwrap(), 42.0);
        assert_eq!(eval("15 ÷ 3").unwrap(), 5.0);
        assert_eq!(eval("10 − 4").unwrap(), 6.0);
    }

    #[test]
    fn test_modulo_and_floor_division() {
        assert_eq!(eval("10 % 3").unwrap(), 1.0);
        assert_eq!(eval("10 // 3").unwrap(), 3.0);
    }

    #[test]
    fn test_unary_minus_and_power() {
        assert_eq!(eval("-2^2").unwrap(), -4.0);
        assert_eq!(eval("2^-3").unwrap(), 0.125);
        assert_eq!(eval("(-2)^2").unwrap(), 4.0);
    }

    // ==================== Constants ====================

    #[test]
    fn test_constants() {
        assert!((eval("pi").unwrap() - std::f64::consts::PI).abs() < 1e-12);
        assert!((eval("e").unwrap() - std::f64::consts::E).abs() < 1e-12);
        assert!((eval("tau").unwrap() - std::f64::consts::TAU).abs() < 1e-12);
    }

    #[test]
    fn test_only_listed_constants_resolve() {
        // The wider constants table is not part of the evaluator namespace
        assert!(eval("golden_ratio").is_err());
        assert!(eval("speed_of_light").is_err());
    }

    // ==================== Functions ====================

    #[test]
    fn test_trig_in_degrees() {
        assert!((eval("sin(30)").unwrap() - 0.5).abs() < 1e-9);
        assert!((eval("cos(60)").unwrap() - 0.5).abs() < 1e-9);
        assert!((eval("tan(45)").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trig_in_radians() {
        let result = evaluate_expression("sin(pi / 6)", AngleMode::Radians).unwrap();
        assert!((result - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_trig_respects_mode() {
        assert!((eval("asin(0.5)").unwrap() - 30.0).abs() < 1e-9);
        let rad = evaluate_expression("asin(0.5)", AngleMode::Radians).unwrap();
        assert!((rad - std::f64::consts::FRAC_PI_6).abs() < 1e-9);
    }

    #[test]
    fn test_evaluator_matches_registry_for_trig() {
        for mode in [AngleMode::Degrees, AngleMode::Radians] {
            let via_expr = evaluate_expression("sin(30)", mode).unwrap();
            let via_registry = registry::evaluate("trig", "sin", &[30.0], mode).unwrap();
            assert_eq!(via_expr, via_registry);
        }
    }

    #[test]
    fn test_log_is_base_10() {
        assert!((eval("log(100)").unwrap() - 2.0).abs() < 1e-9);
        assert!((eval("log10(100)").unwrap() - 2.0).abs() < 1e-9);
        assert!((eval("ln(e)").unwrap() - 1.0).abs() < 1e-9);
        assert!((eval("log2(8)").unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_roots_and_rounding() {
        assert_eq!(eval("sqrt(16)").unwrap(), 4.0);
        assert!((eval("cbrt(27)").unwrap() - 3.0).abs() < 1e-9);
        assert_eq!(eval("abs(-3)").unwrap(), 3.0);
        assert_eq!(eval("floor(2.7)").unwrap(), 2.0);
        assert_eq!(eval("ceil(2.1)").unwrap(), 3.0);
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(eval("round(0.5)").unwrap(), 0.0);
        assert_eq!(eval("round(1.5)").unwrap(), 2.0);
        assert_eq!(eval("round(2.5)").unwrap(), 2.0);
        assert_eq!(eval("round(3.14159, 2)").unwrap(), 3.14);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(eval("factorial(5)").unwrap(), 120.0);
        assert!(eval("factorial(-1)").is_err());
        assert!(eval("factorial(2.5)").is_err());
        assert!(eval("factorial(171)").is_err());
    }

    #[test]
    fn test_variadic_aggregates() {
        assert_eq!(eval("min(3, 1, 2)").unwrap(), 1.0);
        assert_eq!(eval("max(3, 1, 2)").unwrap(), 3.0);
        assert_eq!(eval("sum(1, 2, 3, 4)").unwrap(), 10.0);
    }

    #[test]
    fn test_pow() {
        assert_eq!(eval("pow(2, 10)").unwrap(), 1024.0);
        assert!(eval("pow(2)").is_err());
    }

    #[test]
    fn test_nested_expression() {
        // sqrt(16) + log(100) * sin(30) = 4 + 2 * 0.5 = 5
        let result = eval("sqrt(16) + log(100) * sin(30)").unwrap();
        assert!((result - 5.0).abs() < 1e-9);

        let result = eval("sqrt(log(100)**2)").unwrap();
        assert!((result - 2.0).abs() < 1e-9);
    }

    // ==================== Errors ====================

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(eval("5 / 0"), Err(CalcError::Expression(_))));
        assert!(matches!(eval("5 % 0"), Err(CalcError::Expression(_))));
        assert!(matches!(eval("5 // 0"), Err(CalcError::Expression(_))));
    }

    #[test]
    fn test_unknown_function() {
        assert!(matches!(
            eval("invalid_function(5)"),
            Err(CalcError::Expression(_))
        ));
    }

    #[test]
    fn test_unknown_identifier() {
        assert!(matches!(eval("x + 1"), Err(CalcError::Expression(_))));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(eval("2 + + 3"), Err(CalcError::Expression(_))));
        assert!(matches!(eval("(2 + 3"), Err(CalcError::Expression(_))));
        assert!(matches!(eval(""), Err(CalcError::Expression(_))));
    }

    #[test]
    fn test_domain_faults_become_expression_errors() {
        assert!(matches!(eval("sqrt(-1)"), Err(CalcError::Expression(_))));
        assert!(matches!(eval("log(0)"), Err(CalcError::Expression(_))));
        assert!(matches!(eval("asin(2)"), Err(CalcError::Expression(_))));
        assert!(matches!(eval("acosh(0.5)"), Err(CalcError::Expression(_))));
        assert!(matches!(eval("atanh(1)"), Err(CalcError::Expression(_))));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(eval("10^1000"), Err(CalcError::Expression(_))));
        assert!(matches!(eval("exp(1000)"), Err(CalcError::Expression(_))));
    }

    #[test]
    fn test_case_sensitive_names() {
        // The namespace is lower-case only, like the original
        assert!(eval("SIN(30)").is_err());
        assert!(eval("PI").is_err());
    }
}
