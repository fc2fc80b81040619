//! Numeric values and the arithmetic used to fold constant instructions.
//!
//! Integers are signed 64-bit and floats are IEEE doubles. Mixing the two promotes to float.
//! Every operation either produces a finite value or an [`EvalError`].

use crate::error::{
    kind::{ComplexResult, DivisionByZero, FloatBitwise, IntegerOverflow, NegativeShift, NonFiniteResult},
    EvalError,
};
use std::fmt;
use tac_parser::parser::token::op::{BinOpKind, UnaryOpKind};

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// A numeric constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer value.
    Int(i64),

    /// A floating-point value.
    Float(f64),
}

impl Number {
    /// Returns the value as a float.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    /// Returns true if the value is zero.
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(n) => n == 0.0,
        }
    }

    /// Applies a unary operator.
    pub fn unary(op: UnaryOpKind, operand: Number) -> Result<Number, EvalError> {
        match (op, operand) {
            (UnaryOpKind::Pos, n) => Ok(n),
            (UnaryOpKind::Neg, Number::Int(n)) => n
                .checked_neg()
                .map(Number::Int)
                .ok_or_else(|| IntegerOverflow { op: "-" }.into()),
            (UnaryOpKind::Neg, Number::Float(n)) => Ok(Number::Float(-n)),
        }
    }

    /// Applies a binary operator.
    pub fn binary(op: BinOpKind, lhs: Number, rhs: Number) -> Result<Number, EvalError> {
        match op {
            BinOpKind::Add => arith(op, lhs, rhs, i64::checked_add, |a, b| a + b),
            BinOpKind::Sub => arith(op, lhs, rhs, i64::checked_sub, |a, b| a - b),
            BinOpKind::Mul => arith(op, lhs, rhs, i64::checked_mul, |a, b| a * b),
            BinOpKind::Div => {
                if rhs.is_zero() {
                    return Err(DivisionByZero { operation: "division" }.into());
                }
                finite(op, lhs.as_f64() / rhs.as_f64())
            },
            BinOpKind::Mod => {
                if rhs.is_zero() {
                    return Err(DivisionByZero { operation: "modulo" }.into());
                }
                match (lhs, rhs) {
                    (Number::Int(a), Number::Int(b)) => {
                        let r = a.wrapping_rem(b);
                        Ok(Number::Int(if r != 0 && (r < 0) != (b < 0) { r + b } else { r }))
                    },
                    _ => {
                        let (a, b) = (lhs.as_f64(), rhs.as_f64());
                        let r = a % b;
                        finite(op, if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r })
                    },
                }
            },
            BinOpKind::Exp => pow(lhs, rhs),
            BinOpKind::BitAnd | BinOpKind::BitOr | BinOpKind::BitXor
                | BinOpKind::BitLeft | BinOpKind::BitRight => {
                let (Number::Int(a), Number::Int(b)) = (lhs, rhs) else {
                    return Err(FloatBitwise { op }.into());
                };
                bitwise(op, a, b).map(Number::Int)
            },
        }
    }
}

/// Applies `+`, `-` or `*`, staying integral when both operands are integers.
fn arith(
    op: BinOpKind,
    lhs: Number,
    rhs: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Number, EvalError> {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => int_op(a, b)
            .map(Number::Int)
            .ok_or_else(|| IntegerOverflow { op: op.symbol() }.into()),
        _ => finite(op, float_op(lhs.as_f64(), rhs.as_f64())),
    }
}

/// Wraps a float result, rejecting infinities and NaN.
fn finite(op: BinOpKind, value: f64) -> Result<Number, EvalError> {
    if value.is_finite() {
        Ok(Number::Float(value))
    } else {
        Err(NonFiniteResult { op: op.symbol() }.into())
    }
}

/// Exponentiation. An integer raised to a non-negative integer power stays an integer.
fn pow(lhs: Number, rhs: Number) -> Result<Number, EvalError> {
    let overflow = || EvalError::from(IntegerOverflow { op: "**" });

    match (lhs, rhs) {
        (Number::Int(base), Number::Int(exp)) if exp >= 0 => match u32::try_from(exp) {
            Ok(exp) => base.checked_pow(exp).map(Number::Int).ok_or_else(overflow),
            Err(_) => match base {
                0 | 1 => Ok(Number::Int(base)),
                -1 => Ok(Number::Int(if exp % 2 == 0 { 1 } else { -1 })),
                _ => Err(overflow()),
            },
        },
        _ => {
            let (base, exp) = (lhs.as_f64(), rhs.as_f64());
            if base == 0.0 && exp < 0.0 {
                return Err(DivisionByZero { operation: "division" }.into());
            }
            if base < 0.0 && exp.fract() != 0.0 {
                return Err(ComplexResult.into());
            }
            finite(BinOpKind::Exp, base.powf(exp))
        },
    }
}

/// Bitwise operators on two integers.
fn bitwise(op: BinOpKind, a: i64, b: i64) -> Result<i64, EvalError> {
    match op {
        BinOpKind::BitAnd => Ok(a & b),
        BinOpKind::BitOr => Ok(a | b),
        BinOpKind::BitXor => Ok(a ^ b),
        BinOpKind::BitLeft => {
            if b < 0 {
                return Err(NegativeShift.into());
            }
            if a == 0 {
                return Ok(0);
            }
            // shifting back must recover the original value, otherwise bits were lost
            match u32::try_from(b) {
                Ok(shift) if shift < 64 && (a << shift) >> shift == a => Ok(a << shift),
                _ => Err(IntegerOverflow { op: "<<" })?,
            }
        },
        BinOpKind::BitRight => {
            if b < 0 {
                return Err(NegativeShift.into());
            }
            match u32::try_from(b) {
                Ok(shift) if shift < 64 => Ok(a >> shift),
                _ => Ok(if a < 0 { -1 } else { 0 }),
            }
        },
        _ => unreachable!("`{}` is not a bitwise operator", op),
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            // `{:?}` always keeps a fractional part or exponent: `2.0`, `1e-7`
            Number::Float(n) => write!(f, "{:?}", n),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Int(n) => serializer.serialize_i64(*n),
            Number::Float(n) => serializer.serialize_f64(*n),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval(op: BinOpKind, lhs: impl Into<Number>, rhs: impl Into<Number>) -> Result<Number, EvalError> {
        Number::binary(op, lhs.into(), rhs.into())
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert_eq!(eval(BinOpKind::Add, 2, 3), Ok(Number::Int(5)));
        assert_eq!(eval(BinOpKind::Sub, 2, 3), Ok(Number::Int(-1)));
        assert_eq!(eval(BinOpKind::Mul, 4, 3), Ok(Number::Int(12)));
        assert_eq!(eval(BinOpKind::Exp, 2, 10), Ok(Number::Int(1024)));
    }

    #[test]
    fn mixed_arithmetic_promotes() {
        assert_eq!(eval(BinOpKind::Add, 2, 0.5), Ok(Number::Float(2.5)));
        assert_eq!(eval(BinOpKind::Mul, 1.5, 2), Ok(Number::Float(3.0)));
    }

    #[test]
    fn division_is_always_float() {
        assert_eq!(eval(BinOpKind::Div, 6, 3), Ok(Number::Float(2.0)));
        assert_eq!(eval(BinOpKind::Div, 7, 2), Ok(Number::Float(3.5)));
    }

    #[test]
    fn division_by_zero() {
        let err = eval(BinOpKind::Div, 1, 0).unwrap_err();
        assert_eq!(err.message(), "division by zero");

        let err = eval(BinOpKind::Mod, 1.0, 0.0).unwrap_err();
        assert_eq!(err.message(), "modulo by zero");

        // 0 ** -1 is 1 / 0
        let err = eval(BinOpKind::Exp, 0, -1).unwrap_err();
        assert_eq!(err.message(), "division by zero");
    }

    #[test]
    fn floored_modulo() {
        assert_eq!(eval(BinOpKind::Mod, 7, 3), Ok(Number::Int(1)));
        assert_eq!(eval(BinOpKind::Mod, -7, 3), Ok(Number::Int(2)));
        assert_eq!(eval(BinOpKind::Mod, 7, -3), Ok(Number::Int(-2)));
        assert_eq!(eval(BinOpKind::Mod, i64::MIN, -1), Ok(Number::Int(0)));
        assert_eq!(eval(BinOpKind::Mod, -7.5, 2), Ok(Number::Float(0.5)));
    }

    #[test]
    fn negative_exponent_is_float() {
        assert_eq!(eval(BinOpKind::Exp, 2, -1), Ok(Number::Float(0.5)));
    }

    #[test]
    fn fractional_power() {
        let Ok(Number::Float(root)) = eval(BinOpKind::Exp, 2, 0.5) else {
            panic!("expected a float");
        };
        assert_float_relative_eq!(root, std::f64::consts::SQRT_2);

        let err = eval(BinOpKind::Exp, -8, 0.5).unwrap_err();
        assert_eq!(err, EvalError::ComplexResult(ComplexResult));
    }

    #[test]
    fn huge_exponents() {
        assert_eq!(eval(BinOpKind::Exp, 1, 1i64 << 40), Ok(Number::Int(1)));
        assert_eq!(eval(BinOpKind::Exp, -1, (1i64 << 40) + 1), Ok(Number::Int(-1)));
        assert!(eval(BinOpKind::Exp, 3, 1i64 << 40).is_err());
    }

    #[test]
    fn integer_overflow() {
        let err = eval(BinOpKind::Add, i64::MAX, 1).unwrap_err();
        assert_eq!(err, EvalError::IntegerOverflow(IntegerOverflow { op: "+" }));
        assert!(eval(BinOpKind::Exp, 10, 19).is_err());
        assert!(Number::unary(UnaryOpKind::Neg, Number::Int(i64::MIN)).is_err());
    }

    #[test]
    fn float_overflow() {
        let err = eval(BinOpKind::Mul, 1e300, 1e300).unwrap_err();
        assert_eq!(err.message(), "result of `*` is too large to represent");
    }

    #[test]
    fn bitwise() {
        assert_eq!(eval(BinOpKind::BitAnd, 12, 10), Ok(Number::Int(8)));
        assert_eq!(eval(BinOpKind::BitOr, 12, 10), Ok(Number::Int(14)));
        assert_eq!(eval(BinOpKind::BitXor, 12, 10), Ok(Number::Int(6)));
        assert_eq!(eval(BinOpKind::BitLeft, 1, 10), Ok(Number::Int(1024)));
        assert_eq!(eval(BinOpKind::BitRight, -16, 2), Ok(Number::Int(-4)));
        assert_eq!(eval(BinOpKind::BitRight, -16, 100), Ok(Number::Int(-1)));
        assert_eq!(eval(BinOpKind::BitRight, 16, 100), Ok(Number::Int(0)));
    }

    #[test]
    fn bitwise_errors() {
        assert_eq!(
            eval(BinOpKind::BitAnd, 1.5, 1).unwrap_err(),
            EvalError::FloatBitwise(FloatBitwise { op: BinOpKind::BitAnd }),
        );
        assert_eq!(eval(BinOpKind::BitLeft, 1, -1).unwrap_err(), EvalError::NegativeShift(NegativeShift));
        assert!(eval(BinOpKind::BitLeft, 1, 64).is_err());
        assert!(eval(BinOpKind::BitLeft, i64::MAX, 1).is_err());
        assert_eq!(eval(BinOpKind::BitLeft, -1, 63), Ok(Number::Int(i64::MIN)));
    }

    #[test]
    fn display() {
        assert_eq!(Number::Int(14).to_string(), "14");
        assert_eq!(Number::Int(-5).to_string(), "-5");
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Number::Float(3.5).to_string(), "3.5");
    }
}
