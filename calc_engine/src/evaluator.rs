/// Calculator Kernel: Evaluator
///
/// Applies operators to display text. Never fails: arithmetic errors
/// come back as sentinel display strings.
/// Every numeric result passes through the formatter.

use crate::format::format_number;
use crate::number::parse_float;
use crate::tokens::{BinaryOp, UnaryOp};

pub const ERROR_DIVISION_BY_ZERO: &str = "Error: division by zero";
pub const ERROR_NEGATIVE_ROOT: &str = "Error: square root of negative number";

/// `a <op> b`, formatted.
pub fn apply_binary(a: &str, b: &str, op: BinaryOp) -> String {
    let x = parse_float(a);
    let y = parse_float(b);
    let value = match op {
        BinaryOp::Add => x + y,
        BinaryOp::Subtract => x - y,
        BinaryOp::Multiply => x * y,
        BinaryOp::Divide => {
            if y == 0.0 {
                return ERROR_DIVISION_BY_ZERO.to_string();
            }
            x / y
        }
    };
    tracing::debug!(a, b, op = op.symbol(), value, "binary evaluation");
    format_number(value)
}

/// Symbol-keyed variant. An unknown operator leaves `b` as the result.
pub fn apply_binary_symbol(a: &str, b: &str, symbol: &str) -> String {
    match BinaryOp::from_symbol(symbol) {
        Some(op) => apply_binary(a, b, op),
        None => b.to_string(),
    }
}

/// `op(value)`, formatted.
pub fn apply_special(op: UnaryOp, value: &str) -> String {
    let x = parse_float(value);
    let result = match op {
        UnaryOp::SquareRoot => {
            if x < 0.0 {
                return ERROR_NEGATIVE_ROOT.to_string();
            }
            x.sqrt()
        }
        UnaryOp::Square => x * x,
        UnaryOp::Reciprocal => {
            if x == 0.0 {
                return ERROR_DIVISION_BY_ZERO.to_string();
            }
            1.0 / x
        }
    };
    tracing::debug!(value, op = op.symbol(), result, "special evaluation");
    format_number(result)
}

/// Symbol-keyed variant. An unknown function leaves `value` unchanged.
pub fn apply_special_symbol(symbol: &str, value: &str) -> String {
    match UnaryOp::from_symbol(symbol) {
        Some(op) => apply_special(op, value),
        None => value.to_string(),
    }
}
