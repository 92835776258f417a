//! FILENAME: core/engine/src/registry.rs
//! PURPOSE: The function registry: named operations grouped by category.
//! CONTEXT: Operations are modeled as per-category enums rather than
//! string-keyed tables, so an operation name is validated once at lookup
//! and dispatch is a plain match. Each `apply` checks its arity and the
//! operation's domain predicate before computing.
//!
//! CATEGORIES:
//! - basic: add, subtract, multiply, divide, power, modulo, floor_divide
//! - trig: sin..atan (angle-mode adapted), sinh..atanh (never adapted)
//! - log: ln, log10, log2, log_base, exp, exp2, exp10
//! - power: sqrt, cbrt, nth_root, square, cube, power, reciprocal
//! - combinatorics: factorial, combination, permutation, double_factorial
//! - number_theory: gcd, lcm, is_prime, fibonacci
//! - statistics: mean, median, mode, std_dev, variance, sum, product,
//!   min, max, range (whole argument list is the data set)

use crate::angle::AngleMode;
use crate::error::{CalcError, Result};
use crate::statistics;

/// Largest n for which n! fits in an f64.
pub const MAX_FACTORIAL: u64 = 170;

/// Largest n for which fibonacci(n) fits in a u128.
pub const MAX_FIBONACCI: i64 = 185;

/// Operation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Basic,
    Trig,
    Log,
    Power,
    Combinatorics,
    NumberTheory,
    Statistics,
}

impl Category {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "basic" | "arithmetic" => Ok(Category::Basic),
            "trig" | "trigonometric" => Ok(Category::Trig),
            "log" | "logarithmic" => Ok(Category::Log),
            "power" | "power_root" => Ok(Category::Power),
            "combinatorics" => Ok(Category::Combinatorics),
            "number_theory" => Ok(Category::NumberTheory),
            "statistics" | "stats" => Ok(Category::Statistics),
            other => Err(CalcError::unknown_operation(format!(
                "category '{}'",
                other
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Basic => "basic",
            Category::Trig => "trig",
            Category::Log => "log",
            Category::Power => "power",
            Category::Combinatorics => "combinatorics",
            Category::NumberTheory => "number_theory",
            Category::Statistics => "statistics",
        }
    }
}

/// Evaluates a registry operation by category and name.
///
/// For every category except statistics the argument count must match the
/// operation's arity; statistics operations treat the whole argument list
/// as the data set.
pub fn evaluate(category: &str, operation: &str, args: &[f64], mode: AngleMode) -> Result<f64> {
    let unknown = || {
        CalcError::unknown_operation(format!(
            "operation '{}' in category '{}'",
            operation, category
        ))
    };

    match Category::from_name(category)? {
        Category::Basic => BasicOp::from_name(operation).ok_or_else(unknown)?.apply(args),
        Category::Trig => TrigFn::from_name(operation)
            .ok_or_else(unknown)?
            .apply(args, mode),
        Category::Log => LogFn::from_name(operation).ok_or_else(unknown)?.apply(args),
        Category::Power => PowerFn::from_name(operation).ok_or_else(unknown)?.apply(args),
        Category::Combinatorics => CombFn::from_name(operation).ok_or_else(unknown)?.apply(args),
        Category::NumberTheory => NumberTheoryFn::from_name(operation)
            .ok_or_else(unknown)?
            .apply(args),
        Category::Statistics => StatFn::from_name(operation).ok_or_else(unknown)?.apply(args),
    }
}

fn expect_args(name: &str, args: &[f64], arity: usize) -> Result<()> {
    if args.len() == arity {
        Ok(())
    } else {
        Err(CalcError::domain(format!(
            "{} expects {} argument(s), got {}",
            name,
            arity,
            args.len()
        )))
    }
}

/// Rejects non-integral or negative inputs for counting operations.
fn as_count(name: &str, x: f64) -> Result<u64> {
    if x.fract() != 0.0 {
        return Err(CalcError::domain(format!("{} requires an integer", name)));
    }
    if x < 0.0 {
        return Err(CalcError::domain(format!(
            "{} requires a non-negative integer",
            name
        )));
    }
    Ok(x as u64)
}

/// Rejects non-integral inputs for integer operations of either sign.
fn as_integer(name: &str, x: f64) -> Result<i64> {
    if x.fract() != 0.0 {
        return Err(CalcError::domain(format!("{} requires an integer", name)));
    }
    Ok(x as i64)
}

// ==================== Basic Operations ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
    FloorDivide,
}

impl BasicOp {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "+" | "add" => Some(BasicOp::Add),
            "-" | "subtract" => Some(BasicOp::Subtract),
            "*" | "multiply" => Some(BasicOp::Multiply),
            "/" | "divide" => Some(BasicOp::Divide),
            "**" | "^" | "power" => Some(BasicOp::Power),
            "%" | "modulo" => Some(BasicOp::Modulo),
            "//" | "floor_divide" => Some(BasicOp::FloorDivide),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BasicOp::Add => "add",
            BasicOp::Subtract => "subtract",
            BasicOp::Multiply => "multiply",
            BasicOp::Divide => "divide",
            BasicOp::Power => "power",
            BasicOp::Modulo => "modulo",
            BasicOp::FloorDivide => "floor_divide",
        }
    }

    pub fn apply(self, args: &[f64]) -> Result<f64> {
        expect_args(self.name(), args, 2)?;
        let (a, b) = (args[0], args[1]);

        match self {
            BasicOp::Add => Ok(a + b),
            BasicOp::Subtract => Ok(a - b),
            BasicOp::Multiply => Ok(a * b),
            BasicOp::Divide => {
                if b == 0.0 {
                    Err(CalcError::domain("Division by zero"))
                } else {
                    Ok(a / b)
                }
            }
            BasicOp::Power => checked_pow(a, b),
            BasicOp::Modulo => {
                if b == 0.0 {
                    Err(CalcError::domain("Modulo by zero"))
                } else {
                    // Result takes the sign of the divisor
                    Ok(a - b * (a / b).floor())
                }
            }
            BasicOp::FloorDivide => {
                if b == 0.0 {
                    Err(CalcError::domain("Division by zero"))
                } else {
                    Ok((a / b).floor())
                }
            }
        }
    }
}

/// Power with overflow and domain detection: a finite result is required.
fn checked_pow(base: f64, exponent: f64) -> Result<f64> {
    let result = base.powf(exponent);
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::domain(format!(
            "Power {}^{} is out of range",
            base, exponent
        )))
    }
}

// ==================== Trigonometric Functions ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
}

impl TrigFn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" | "sine" => Some(TrigFn::Sin),
            "cos" | "cosine" => Some(TrigFn::Cos),
            "tan" | "tangent" => Some(TrigFn::Tan),
            "asin" | "arc_sine" => Some(TrigFn::Asin),
            "acos" | "arc_cosine" => Some(TrigFn::Acos),
            "atan" | "arc_tangent" => Some(TrigFn::Atan),
            "sinh" => Some(TrigFn::Sinh),
            "cosh" => Some(TrigFn::Cosh),
            "tanh" => Some(TrigFn::Tanh),
            "asinh" => Some(TrigFn::Asinh),
            "acosh" => Some(TrigFn::Acosh),
            "atanh" => Some(TrigFn::Atanh),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
            TrigFn::Asin => "asin",
            TrigFn::Acos => "acos",
            TrigFn::Atan => "atan",
            TrigFn::Sinh => "sinh",
            TrigFn::Cosh => "cosh",
            TrigFn::Tanh => "tanh",
            TrigFn::Asinh => "asinh",
            TrigFn::Acosh => "acosh",
            TrigFn::Atanh => "atanh",
        }
    }

    pub fn apply(self, args: &[f64], mode: AngleMode) -> Result<f64> {
        expect_args(self.name(), args, 1)?;
        let x = args[0];

        match self {
            // Direct trig: input adapted to radians
            TrigFn::Sin => Ok(mode.to_radians(x).sin()),
            TrigFn::Cos => Ok(mode.to_radians(x).cos()),
            TrigFn::Tan => Ok(mode.to_radians(x).tan()),

            // Inverse trig: output adapted from radians
            TrigFn::Asin => {
                if x.abs() > 1.0 {
                    Err(CalcError::domain("asin requires input between -1 and 1"))
                } else {
                    Ok(mode.from_radians(x.asin()))
                }
            }
            TrigFn::Acos => {
                if x.abs() > 1.0 {
                    Err(CalcError::domain("acos requires input between -1 and 1"))
                } else {
                    Ok(mode.from_radians(x.acos()))
                }
            }
            TrigFn::Atan => Ok(mode.from_radians(x.atan())),

            // Hyperbolics: never angle-adapted
            TrigFn::Sinh => Ok(x.sinh()),
            TrigFn::Cosh => Ok(x.cosh()),
            TrigFn::Tanh => Ok(x.tanh()),
            TrigFn::Asinh => Ok(x.asinh()),
            TrigFn::Acosh => {
                if x < 1.0 {
                    Err(CalcError::domain("acosh requires input >= 1"))
                } else {
                    Ok(x.acosh())
                }
            }
            TrigFn::Atanh => {
                if x.abs() >= 1.0 {
                    Err(CalcError::domain("atanh requires input between -1 and 1"))
                } else {
                    Ok(x.atanh())
                }
            }
        }
    }
}

// ==================== Logarithmic Functions ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFn {
    Ln,
    Log10,
    Log2,
    LogBase,
    Exp,
    Exp2,
    Exp10,
}

impl LogFn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ln" | "natural_log" => Some(LogFn::Ln),
            "log" | "log10" => Some(LogFn::Log10),
            "log2" => Some(LogFn::Log2),
            "log_base" => Some(LogFn::LogBase),
            "exp" => Some(LogFn::Exp),
            "exp2" => Some(LogFn::Exp2),
            "exp10" => Some(LogFn::Exp10),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LogFn::Ln => "ln",
            LogFn::Log10 => "log10",
            LogFn::Log2 => "log2",
            LogFn::LogBase => "log_base",
            LogFn::Exp => "exp",
            LogFn::Exp2 => "exp2",
            LogFn::Exp10 => "exp10",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            LogFn::LogBase => 2,
            _ => 1,
        }
    }

    pub fn apply(self, args: &[f64]) -> Result<f64> {
        expect_args(self.name(), args, self.arity())?;
        let x = args[0];

        match self {
            LogFn::Ln => positive_log(x).map(|x| x.ln()),
            LogFn::Log10 => positive_log(x).map(|x| x.log10()),
            LogFn::Log2 => positive_log(x).map(|x| x.log2()),
            LogFn::LogBase => {
                let base = args[1];
                if base <= 0.0 || base == 1.0 {
                    return Err(CalcError::domain("Invalid logarithm base"));
                }
                positive_log(x).map(|x| x.ln() / base.ln())
            }
            LogFn::Exp => Ok(x.exp()),
            LogFn::Exp2 => Ok(x.exp2()),
            LogFn::Exp10 => Ok(10.0_f64.powf(x)),
        }
    }
}

fn positive_log(x: f64) -> Result<f64> {
    if x <= 0.0 {
        Err(CalcError::domain("Logarithm requires positive input"))
    } else {
        Ok(x)
    }
}

// ==================== Power and Root Functions ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerFn {
    Sqrt,
    Cbrt,
    NthRoot,
    Square,
    Cube,
    Power,
    Reciprocal,
}

impl PowerFn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" | "square_root" => Some(PowerFn::Sqrt),
            "cbrt" | "cube_root" => Some(PowerFn::Cbrt),
            "nth_root" => Some(PowerFn::NthRoot),
            "square" => Some(PowerFn::Square),
            "cube" => Some(PowerFn::Cube),
            "power" => Some(PowerFn::Power),
            "reciprocal" => Some(PowerFn::Reciprocal),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerFn::Sqrt => "sqrt",
            PowerFn::Cbrt => "cbrt",
            PowerFn::NthRoot => "nth_root",
            PowerFn::Square => "square",
            PowerFn::Cube => "cube",
            PowerFn::Power => "power",
            PowerFn::Reciprocal => "reciprocal",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            PowerFn::NthRoot | PowerFn::Power => 2,
            _ => 1,
        }
    }

    pub fn apply(self, args: &[f64]) -> Result<f64> {
        expect_args(self.name(), args, self.arity())?;
        let x = args[0];

        match self {
            PowerFn::Sqrt => {
                if x < 0.0 {
                    Err(CalcError::domain("Square root of negative number"))
                } else {
                    Ok(x.sqrt())
                }
            }
            PowerFn::Cbrt => Ok(x.cbrt()),
            PowerFn::NthRoot => {
                let n = args[1];
                if n == 0.0 {
                    return Err(CalcError::domain("Root index cannot be zero"));
                }
                let result = x.powf(1.0 / n);
                if result.is_finite() {
                    Ok(result)
                } else {
                    Err(CalcError::domain(format!("Cannot take root {} of {}", n, x)))
                }
            }
            PowerFn::Square => Ok(x * x),
            PowerFn::Cube => Ok(x * x * x),
            PowerFn::Power => checked_pow(x, args[1]),
            PowerFn::Reciprocal => {
                if x == 0.0 {
                    Err(CalcError::domain("Division by zero"))
                } else {
                    Ok(1.0 / x)
                }
            }
        }
    }
}

// ==================== Combinatorial Functions ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombFn {
    Factorial,
    Combination,
    Permutation,
    DoubleFactorial,
}

impl CombFn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "factorial" => Some(CombFn::Factorial),
            "combination" | "ncr" => Some(CombFn::Combination),
            "permutation" | "npr" => Some(CombFn::Permutation),
            "double_factorial" => Some(CombFn::DoubleFactorial),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CombFn::Factorial => "factorial",
            CombFn::Combination => "combination",
            CombFn::Permutation => "permutation",
            CombFn::DoubleFactorial => "double_factorial",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            CombFn::Combination | CombFn::Permutation => 2,
            _ => 1,
        }
    }

    pub fn apply(self, args: &[f64]) -> Result<f64> {
        expect_args(self.name(), args, self.arity())?;

        match self {
            CombFn::Factorial => factorial(as_count("factorial", args[0])?),
            CombFn::Combination => {
                let n = as_count("combination", args[0])?;
                let r = as_count("combination", args[1])?;
                combination(n, r)
            }
            CombFn::Permutation => {
                let n = as_count("permutation", args[0])?;
                let r = as_count("permutation", args[1])?;
                permutation(n, r)
            }
            CombFn::DoubleFactorial => double_factorial(as_count("double_factorial", args[0])?),
        }
    }
}

/// n! for 0 <= n <= 170.
pub fn factorial(n: u64) -> Result<f64> {
    if n > MAX_FACTORIAL {
        return Err(CalcError::domain(format!(
            "Factorial input too large (max {})",
            MAX_FACTORIAL
        )));
    }
    Ok((1..=n).fold(1.0, |acc, i| acc * i as f64))
}

/// n choose r, using the symmetric multiplicative form for precision.
pub fn combination(n: u64, r: u64) -> Result<f64> {
    if r > n {
        return Err(CalcError::domain("combination requires 0 <= r <= n"));
    }
    let r = r.min(n - r);
    let mut result = 1.0;
    for i in 1..=r {
        result = result * (n - r + i) as f64 / i as f64;
    }
    Ok(result.round())
}

/// Number of r-permutations of n items.
pub fn permutation(n: u64, r: u64) -> Result<f64> {
    if r > n {
        return Err(CalcError::domain("permutation requires 0 <= r <= n"));
    }
    let mut result = 1.0;
    for i in 0..r {
        result *= (n - i) as f64;
    }
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::domain("Permutation result too large"))
    }
}

/// n!! (product of every second integer down from n).
pub fn double_factorial(n: u64) -> Result<f64> {
    let mut result = 1.0;
    let mut i = n;
    while i > 0 {
        result *= i as f64;
        i = i.saturating_sub(2);
    }
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::domain("Double factorial input too large"))
    }
}

// ==================== Number Theory Functions ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberTheoryFn {
    Gcd,
    Lcm,
    IsPrime,
    Fibonacci,
}

impl NumberTheoryFn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gcd" => Some(NumberTheoryFn::Gcd),
            "lcm" => Some(NumberTheoryFn::Lcm),
            "is_prime" => Some(NumberTheoryFn::IsPrime),
            "fibonacci" => Some(NumberTheoryFn::Fibonacci),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NumberTheoryFn::Gcd => "gcd",
            NumberTheoryFn::Lcm => "lcm",
            NumberTheoryFn::IsPrime => "is_prime",
            NumberTheoryFn::Fibonacci => "fibonacci",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            NumberTheoryFn::Gcd | NumberTheoryFn::Lcm => 2,
            _ => 1,
        }
    }

    pub fn apply(self, args: &[f64]) -> Result<f64> {
        expect_args(self.name(), args, self.arity())?;

        match self {
            NumberTheoryFn::Gcd => {
                let a = as_integer("gcd", args[0])?;
                let b = as_integer("gcd", args[1])?;
                Ok(gcd(a.unsigned_abs(), b.unsigned_abs()) as f64)
            }
            NumberTheoryFn::Lcm => {
                let a = as_integer("lcm", args[0])?;
                let b = as_integer("lcm", args[1])?;
                if b == 0 {
                    return Err(CalcError::domain("lcm requires b != 0"));
                }
                let (a, b) = (a.unsigned_abs(), b.unsigned_abs());
                // gcd > 0 because b != 0
                Ok((a / gcd(a, b)) as f64 * b as f64)
            }
            NumberTheoryFn::IsPrime => {
                let n = as_integer("is_prime", args[0])?;
                Ok(if is_prime(n) { 1.0 } else { 0.0 })
            }
            NumberTheoryFn::Fibonacci => {
                let n = as_integer("fibonacci", args[0])?;
                fibonacci(n).map(|f| f as f64)
            }
        }
    }
}

/// Euclid's algorithm.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Trial division primality check.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// nth Fibonacci number for 0 <= n <= 185.
pub fn fibonacci(n: i64) -> Result<u128> {
    if n < 0 {
        return Err(CalcError::domain("Fibonacci index must be non-negative"));
    }
    if n > MAX_FIBONACCI {
        return Err(CalcError::domain(format!(
            "Fibonacci index too large (max {})",
            MAX_FIBONACCI
        )));
    }
    let (mut a, mut b) = (0u128, 1u128);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    Ok(a)
}

// ==================== Statistical Functions ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFn {
    Mean,
    Median,
    Mode,
    StdDev,
    Variance,
    Sum,
    Product,
    Min,
    Max,
    Range,
}

impl StatFn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mean" | "average" => Some(StatFn::Mean),
            "median" => Some(StatFn::Median),
            "mode" => Some(StatFn::Mode),
            "std_dev" => Some(StatFn::StdDev),
            "variance" => Some(StatFn::Variance),
            "sum" => Some(StatFn::Sum),
            "product" => Some(StatFn::Product),
            "min" => Some(StatFn::Min),
            "max" => Some(StatFn::Max),
            "range" => Some(StatFn::Range),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatFn::Mean => "mean",
            StatFn::Median => "median",
            StatFn::Mode => "mode",
            StatFn::StdDev => "std_dev",
            StatFn::Variance => "variance",
            StatFn::Sum => "sum",
            StatFn::Product => "product",
            StatFn::Min => "min",
            StatFn::Max => "max",
            StatFn::Range => "range",
        }
    }

    /// The whole argument list is the data set.
    pub fn apply(self, numbers: &[f64]) -> Result<f64> {
        match self {
            StatFn::Mean => statistics::mean(numbers),
            StatFn::Median => statistics::median(numbers),
            StatFn::Mode => statistics::mode(numbers),
            StatFn::StdDev => statistics::std_dev(numbers),
            StatFn::Variance => statistics::variance(numbers),
            StatFn::Sum => statistics::sum(numbers),
            StatFn::Product => statistics::product(numbers),
            StatFn::Min => statistics::min(numbers),
            StatFn::Max => statistics::max(numbers),
            StatFn::Range => statistics::range(numbers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(category: &str, op: &str, args: &[f64]) -> Result<f64> {
        evaluate(category, op, args, AngleMode::Degrees)
    }

    // ==================== Basic ====================

    #[test]
    fn test_basic_operations() {
        assert_eq!(eval("basic", "+", &[5.0, 3.0]).unwrap(), 8.0);
        assert_eq!(eval("basic", "-", &[10.0, 4.0]).unwrap(), 6.0);
        assert_eq!(eval("basic", "*", &[6.0, 7.0]).unwrap(), 42.0);
        assert_eq!(eval("basic", "/", &[15.0, 3.0]).unwrap(), 5.0);
        assert_eq!(eval("basic", "**", &[2.0, 3.0]).unwrap(), 8.0);
        assert_eq!(eval("basic", "%", &[10.0, 3.0]).unwrap(), 1.0);
        assert_eq!(eval("basic", "//", &[10.0, 3.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_divide_by_zero() {
        assert!(matches!(
            eval("basic", "/", &[10.0, 0.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("basic", "%", &[10.0, 0.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("basic", "//", &[10.0, 0.0]),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_modulo_sign_follows_divisor() {
        assert_eq!(eval("basic", "%", &[10.0, -3.0]).unwrap(), -2.0);
        assert_eq!(eval("basic", "%", &[-10.0, 3.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_power_overflow_rejected() {
        assert!(matches!(
            eval("basic", "power", &[10.0, 1000.0]),
            Err(CalcError::Domain(_))
        ));
        // Negative base with fractional exponent has no real result
        assert!(matches!(
            eval("basic", "power", &[-8.0, 0.5]),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_unknown_operation_and_category() {
        assert!(matches!(
            eval("basic", "bogus", &[1.0, 2.0]),
            Err(CalcError::UnknownOperation(_))
        ));
        assert!(matches!(
            eval("bogus", "+", &[1.0, 2.0]),
            Err(CalcError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_wrong_arity() {
        assert!(matches!(
            eval("basic", "+", &[1.0]),
            Err(CalcError::Domain(_))
        ));
    }

    // ==================== Trig ====================

    #[test]
    fn test_sin_degrees() {
        let result = eval("trig", "sin", &[30.0]).unwrap();
        assert!((result - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_sin_radians() {
        let result = evaluate(
            "trig",
            "sin",
            &[std::f64::consts::FRAC_PI_6],
            AngleMode::Radians,
        )
        .unwrap();
        assert!((result - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_cos_and_tan_degrees() {
        assert!((eval("trig", "cos", &[60.0]).unwrap() - 0.5).abs() < 1e-9);
        assert!((eval("trig", "tan", &[45.0]).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_trig_degrees() {
        assert!((eval("trig", "asin", &[0.5]).unwrap() - 30.0).abs() < 1e-9);
        assert!((eval("trig", "acos", &[0.5]).unwrap() - 60.0).abs() < 1e-9);
        assert!((eval("trig", "atan", &[1.0]).unwrap() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_mode_round_trip() {
        let s = eval("trig", "sine", &[30.0]).unwrap();
        let back = eval("trig", "arc_sine", &[s]).unwrap();
        assert!((back - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_trig_domain() {
        assert!(matches!(
            eval("trig", "asin", &[2.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("trig", "acos", &[-1.5]),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_hyperbolics_ignore_angle_mode() {
        // sinh(1) must not be interpreted as sinh(1 degree)
        let deg = eval("trig", "sinh", &[1.0]).unwrap();
        let rad = evaluate("trig", "sinh", &[1.0], AngleMode::Radians).unwrap();
        assert_eq!(deg, rad);
        assert!((deg - 1.0_f64.sinh()).abs() < 1e-12);
    }

    #[test]
    fn test_hyperbolic_domains() {
        assert!(matches!(
            eval("trig", "acosh", &[0.5]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("trig", "atanh", &[1.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(eval("trig", "atanh", &[0.5]).is_ok());
    }

    // ==================== Log ====================

    #[test]
    fn test_logarithms() {
        assert!((eval("log", "ln", &[std::f64::consts::E]).unwrap() - 1.0).abs() < 1e-9);
        assert!((eval("log", "log", &[100.0]).unwrap() - 2.0).abs() < 1e-9);
        assert!((eval("log", "log2", &[8.0]).unwrap() - 3.0).abs() < 1e-9);
        assert!((eval("log", "log_base", &[8.0, 2.0]).unwrap() - 3.0).abs() < 1e-9);
        assert!((eval("log", "exp", &[0.0]).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(eval("log", "exp2", &[10.0]).unwrap(), 1024.0);
        assert_eq!(eval("log", "exp10", &[3.0]).unwrap(), 1000.0);
    }

    #[test]
    fn test_log_domains() {
        assert!(matches!(
            eval("log", "ln", &[-1.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("log", "log", &[0.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("log", "log_base", &[10.0, 1.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("log", "log_base", &[10.0, -2.0]),
            Err(CalcError::Domain(_))
        ));
    }

    // ==================== Power ====================

    #[test]
    fn test_roots_and_powers() {
        assert_eq!(eval("power", "sqrt", &[16.0]).unwrap(), 4.0);
        assert!((eval("power", "cbrt", &[27.0]).unwrap() - 3.0).abs() < 1e-9);
        assert!((eval("power", "nth_root", &[32.0, 5.0]).unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(eval("power", "square", &[5.0]).unwrap(), 25.0);
        assert_eq!(eval("power", "cube", &[3.0]).unwrap(), 27.0);
        assert_eq!(eval("power", "power", &[2.0, 10.0]).unwrap(), 1024.0);
        assert_eq!(eval("power", "reciprocal", &[4.0]).unwrap(), 0.25);
    }

    #[test]
    fn test_sqrt_of_square_round_trip() {
        for x in [0.0, 1.0, 2.5, 13.7, 1e6] {
            let result = eval("power", "square_root", &[x * x]).unwrap();
            assert!((result - x).abs() < 1e-9 * x.max(1.0));
        }
    }

    #[test]
    fn test_power_domains() {
        assert!(matches!(
            eval("power", "sqrt", &[-1.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("power", "nth_root", &[8.0, 0.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("power", "reciprocal", &[0.0]),
            Err(CalcError::Domain(_))
        ));
    }

    // ==================== Combinatorics ====================

    #[test]
    fn test_factorial() {
        assert_eq!(eval("combinatorics", "factorial", &[5.0]).unwrap(), 120.0);
        assert_eq!(eval("combinatorics", "factorial", &[0.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_factorial_bounds() {
        assert!(matches!(
            eval("combinatorics", "factorial", &[-1.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("combinatorics", "factorial", &[171.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(eval("combinatorics", "factorial", &[170.0]).is_ok());
    }

    #[test]
    fn test_factorial_requires_integer() {
        assert!(matches!(
            eval("combinatorics", "factorial", &[2.5]),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_combination_and_permutation() {
        assert_eq!(eval("combinatorics", "combination", &[5.0, 2.0]).unwrap(), 10.0);
        assert_eq!(eval("combinatorics", "combination", &[10.0, 3.0]).unwrap(), 120.0);
        assert_eq!(eval("combinatorics", "permutation", &[5.0, 2.0]).unwrap(), 20.0);
        assert_eq!(eval("combinatorics", "permutation", &[10.0, 3.0]).unwrap(), 720.0);
    }

    #[test]
    fn test_combination_symmetry() {
        for (n, r) in [(10u64, 3u64), (20, 7), (52, 5)] {
            assert_eq!(
                combination(n, r).unwrap(),
                combination(n, n - r).unwrap(),
                "C({},{}) != C({},{})",
                n,
                r,
                n,
                n - r
            );
        }
    }

    #[test]
    fn test_combination_r_greater_than_n() {
        assert!(matches!(
            eval("combinatorics", "combination", &[3.0, 5.0]),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            eval("combinatorics", "permutation", &[3.0, 5.0]),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_double_factorial() {
        assert_eq!(eval("combinatorics", "double_factorial", &[0.0]).unwrap(), 1.0);
        assert_eq!(eval("combinatorics", "double_factorial", &[5.0]).unwrap(), 15.0);
        assert_eq!(eval("combinatorics", "double_factorial", &[6.0]).unwrap(), 48.0);
    }

    // ==================== Number Theory ====================

    #[test]
    fn test_gcd_and_lcm() {
        assert_eq!(eval("number_theory", "gcd", &[12.0, 18.0]).unwrap(), 6.0);
        assert_eq!(eval("number_theory", "gcd", &[-12.0, 18.0]).unwrap(), 6.0);
        assert_eq!(eval("number_theory", "lcm", &[4.0, 6.0]).unwrap(), 12.0);
        assert_eq!(eval("number_theory", "lcm", &[0.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_lcm_zero_divisor() {
        assert!(matches!(
            eval("number_theory", "lcm", &[4.0, 0.0]),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_is_prime() {
        assert_eq!(eval("number_theory", "is_prime", &[2.0]).unwrap(), 1.0);
        assert_eq!(eval("number_theory", "is_prime", &[17.0]).unwrap(), 1.0);
        assert_eq!(eval("number_theory", "is_prime", &[1.0]).unwrap(), 0.0);
        assert_eq!(eval("number_theory", "is_prime", &[15.0]).unwrap(), 0.0);
        assert_eq!(eval("number_theory", "is_prime", &[-7.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_fibonacci() {
        assert_eq!(fibonacci(0).unwrap(), 0);
        assert_eq!(fibonacci(1).unwrap(), 1);
        assert_eq!(fibonacci(10).unwrap(), 55);
        assert_eq!(fibonacci(50).unwrap(), 12_586_269_025);
        assert!(fibonacci(-1).is_err());
        assert!(fibonacci(186).is_err());
    }

    // ==================== Statistics ====================

    #[test]
    fn test_statistics_through_registry() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(eval("statistics", "mean", &data).unwrap(), 3.0);
        assert_eq!(eval("statistics", "median", &data).unwrap(), 3.0);
        assert_eq!(eval("statistics", "median", &[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert_eq!(eval("statistics", "sum", &data).unwrap(), 15.0);
        assert_eq!(eval("statistics", "range", &data).unwrap(), 4.0);
        let std_dev = eval("statistics", "std_dev", &data).unwrap();
        assert!((std_dev - 1.4142135623730951).abs() < 1e-9);
    }

    #[test]
    fn test_statistics_empty_rejected() {
        assert!(matches!(
            eval("statistics", "mean", &[]),
            Err(CalcError::Domain(_))
        ));
    }
}
