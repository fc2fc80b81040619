use ariadne::Fmt;
use tac_attrs::ErrorKind;
use tac_error::EXPR;
use tac_parser::parser::token::op::BinOpKind;

/// Division or modulo by zero, or zero raised to a negative power.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{} by zero", self.operation),
    labels = ["this expression divides by zero"],
)]
pub struct DivisionByZero {
    /// The operation that failed, such as `division` or `modulo`.
    pub operation: &'static str,
}

/// An integer operation produced a value that does not fit in a signed 64-bit integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("integer overflow while evaluating `{}`", self.op),
    labels = ["this expression overflows"],
    help = format!("integers must be between {} and {}", i64::MIN, i64::MAX),
)]
pub struct IntegerOverflow {
    /// The operator being evaluated.
    pub op: &'static str,
}

/// A bitwise operator was applied to a floating-point operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot apply the `{}` operator to a floating-point number", self.op),
    labels = ["this expression"],
    help = format!("bitwise operators only accept {}", "integers".fg(EXPR)),
)]
pub struct FloatBitwise {
    /// The operator that was used.
    pub op: BinOpKind,
}

/// A bitshift by a negative amount.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "negative shift count",
    labels = ["this expression"],
)]
pub struct NegativeShift;

/// A negative number was raised to a fractional power.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "negative number cannot be raised to a fractional power",
    labels = ["the result of this expression is a complex number"],
)]
pub struct ComplexResult;

/// A floating-point operation produced an infinite or NaN value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("result of `{}` is too large to represent", self.op),
    labels = ["this expression"],
)]
pub struct NonFiniteResult {
    /// The operator being evaluated.
    pub op: &'static str,
}
