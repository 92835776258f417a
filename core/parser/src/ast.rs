//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for calculator expressions.
//! CONTEXT: After the Lexer tokenizes an expression string, the Parser converts
//! those tokens into this tree structure. The Evaluator then traverses
//! this tree to compute the final result.
//!
//! SUPPORTED EXPRESSIONS:
//! - Number literals: 42, 3.14, 1e-6
//! - Named identifiers: pi, e, tau (resolved by the evaluator)
//! - Binary operations: +, -, *, /, ^, %, //
//! - Unary operations: - (negation)
//! - Function calls: sin(30), pow(2, 10), max(1, 2, 3)

/// Represents a parsed expression.
/// This is the core data structure that the evaluator will traverse.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A numeric literal.
    Number(f64),

    /// A named identifier like pi or e. The parser has no opinion on
    /// which names exist; resolution happens in the evaluator.
    Identifier(String),

    /// A binary operation: left op right (e.g., 5 + 3, 2 ^ 10).
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// A unary operation: op operand (e.g., -5).
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// A function call like sin(30) or pow(2, 10).
    FunctionCall { name: String, args: Vec<Expression> },
}

/// Binary operators for expressions.
/// Listed in order of precedence groups (additive is lowest).
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BinaryOperator {
    // Additive operators (lowest precedence)
    Add,      // +
    Subtract, // -

    // Multiplicative operators
    Multiply,    // *
    Divide,      // /
    Modulo,      // %
    FloorDivide, // //

    // Power (highest precedence among binary ops, right-associative)
    Power, // ^ or **
}

/// Unary operators.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum UnaryOperator {
    Negate, // -
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
            BinaryOperator::Modulo => write!(f, "%"),
            BinaryOperator::FloorDivide => write!(f, "//"),
            BinaryOperator::Power => write!(f, "^"),
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Negate => write!(f, "-"),
        }
    }
}
