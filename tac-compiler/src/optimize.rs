//! Constant folding and propagation over three-address code.
//!
//! The optimizer makes a single pass over the instructions, in order:
//!
//! 1. Operands whose value is already known are replaced by that value.
//! 2. If every operand is then a constant, the instruction is evaluated and dropped, and its
//!    destination is recorded as holding the result.
//! 3. Otherwise, `a + 0` and `a * 1` are simplified to `a`, and the instruction is kept. A
//!    temporary that ends up as a plain copy of another place is dropped as well; later uses of
//!    the temporary read the original place instead.
//!
//! If the result variable was folded, the whole program collapses to a single assignment of its
//! value. Otherwise, the kept instructions are returned, along with an assignment of each folded
//! user variable at its original position.

use crate::{
    error::EvalError,
    instruction::{Instruction, InstructionKind, Operand, Place},
    sym_table::SymbolTable,
    value::Number,
};
use std::ops::Range;
use tac_error::Error;
use tac_parser::parser::token::op::BinOpKind;
use tracing::{debug, trace};

/// The output of [`optimize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Optimized {
    /// The optimized instructions.
    pub instructions: Vec<Instruction>,

    /// The value of the result variable, if it could be folded to a constant.
    pub result: Option<Number>,
}

/// An entry of the optimized program, before it is known whether the program collapses.
enum Slot {
    /// An instruction that could not be folded.
    Kept(Instruction),

    /// A user variable that was folded to a constant at this position.
    Folded {
        dest: Place,
        value: Number,
        span: Range<usize>,
    },
}

/// Evaluates the instruction if all of its operands are constants. Returns [`None`] if any
/// operand is still a place.
fn fold(instruction: &Instruction) -> Option<Result<Number, EvalError>> {
    match &instruction.kind {
        InstructionKind::Copy { src, .. } => src.as_const().map(Ok),
        InstructionKind::Unary { op, operand, .. } => {
            operand.as_const().map(|value| Number::unary(*op, value))
        },
        InstructionKind::Binary { op, lhs, rhs, .. } => {
            let (lhs, rhs) = (lhs.as_const()?, rhs.as_const()?);
            Some(Number::binary(*op, lhs, rhs))
        },
    }
}

/// Rewrites `a + 0` and `a * 1` into the copy `a`. The constant must be the integer literal on
/// the right-hand side.
fn simplify(instruction: Instruction) -> Instruction {
    let Instruction { kind, span } = instruction;
    let kind = match kind {
        InstructionKind::Binary { dest, op: BinOpKind::Add, lhs, rhs: Operand::Const(Number::Int(0)) }
            | InstructionKind::Binary { dest, op: BinOpKind::Mul, lhs, rhs: Operand::Const(Number::Int(1)) } => {
            trace!(%dest, %lhs, "identity simplified");
            InstructionKind::Copy { dest, src: lhs }
        },
        kind => kind,
    };
    Instruction { kind, span }
}

/// Optimizes the given instructions, folding everything that can be computed ahead of time.
///
/// `result_var` names the variable whose folded value is reported in [`Optimized::result`].
/// Returns an error if evaluating a fully constant instruction fails, such as on division by
/// zero.
pub fn optimize(instructions: &[Instruction], result_var: &str) -> Result<Optimized, Error> {
    let mut table = SymbolTable::new();
    let mut slots = Vec::with_capacity(instructions.len());
    let result_place = Place::Var(result_var.to_owned());
    let mut result_span = None;

    for instruction in instructions {
        let mut instruction = instruction.clone();
        for operand in instruction.operands_mut() {
            *operand = table.resolve(operand);
        }

        if let Some(value) = fold(&instruction) {
            let value = value.map_err(|err| err.into_error(instruction.span.clone()))?;
            trace!(%instruction, %value, "folded");

            let dest = instruction.dest().clone();
            if dest == result_place {
                result_span = Some(instruction.span.clone());
            }
            table.insert(dest.clone(), value);
            if !dest.is_temp() {
                slots.push(Slot::Folded { dest, value, span: instruction.span });
            }
            continue;
        }

        let instruction = simplify(instruction);
        match &instruction.kind {
            InstructionKind::Copy { dest: Place::Temp(n), src: Operand::Place(src) } => {
                trace!(%instruction, "propagated copy");
                table.alias(*n, src.clone());
            },
            _ => {
                table.forget(instruction.dest());
                slots.push(Slot::Kept(instruction));
            },
        }
    }

    if let (Some(value), Some(span)) = (table.get(&result_place), result_span) {
        debug!(result = result_var, %value, "result folded to a constant");
        return Ok(Optimized {
            instructions: vec![Instruction::new(InstructionKind::Copy {
                dest: result_place,
                src: Operand::Const(value),
            }, span)],
            result: Some(value),
        });
    }

    let instructions = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Kept(instruction) => instruction,
            Slot::Folded { dest, value, span } => Instruction::new(InstructionKind::Copy {
                dest,
                src: Operand::Const(value),
            }, span),
        })
        .collect::<Vec<_>>();
    debug!(kept = instructions.len(), "optimized");

    Ok(Optimized { instructions, result: None })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tac_parser::parser::Parser;
    use crate::Compiler;
    use super::*;

    fn optimized(source: &str) -> Result<(Vec<String>, Option<Number>), Error> {
        let stmts = Parser::new(source).try_parse_full_many().unwrap();
        let compiler = Compiler::compile_program(&stmts);
        let Optimized { instructions, result } = optimize(&compiler.instructions, "x")?;
        Ok((instructions.iter().map(ToString::to_string).collect(), result))
    }

    #[test]
    fn fully_numeric() {
        assert_eq!(optimized("x = 2 + 3*4").unwrap(), (vec!["x = 14".to_string()], Some(Number::Int(14))));
    }

    #[test]
    fn float_result() {
        assert_eq!(optimized("x = 7 / 2").unwrap(), (vec!["x = 3.5".to_string()], Some(Number::Float(3.5))));
    }

    #[test]
    fn unresolved_variable() {
        assert_eq!(optimized("x = 3*x + 5").unwrap(), (vec![
            "t1 = 3 * x".to_string(),
            "t3 = t1 + 5".to_string(),
            "x = t3".to_string(),
        ], None));
    }

    #[test]
    fn add_zero_is_self_assignment() {
        assert_eq!(optimized("x = x + 0").unwrap(), (vec!["x = x".to_string()], None));
    }

    #[test]
    fn mul_one() {
        assert_eq!(optimized("y = z * 1").unwrap(), (vec!["y = z".to_string()], None));
    }

    #[test]
    fn identities_only_apply_on_the_right() {
        assert_eq!(optimized("y = 0 + z").unwrap(), (vec![
            "t1 = 0 + z".to_string(),
            "y = t1".to_string(),
        ], None));
        assert_eq!(optimized("y = z + 0.0").unwrap(), (vec![
            "t1 = z + 0.0".to_string(),
            "y = t1".to_string(),
        ], None));
    }

    #[test]
    fn propagates_across_statements() {
        assert_eq!(optimized("a = 2\nb = a * 3\nx = b - a").unwrap(), (vec!["x = 4".to_string()], Some(Number::Int(4))));
    }

    #[test]
    fn named_folds_stay_observable() {
        assert_eq!(optimized("a = 2\ny = a * z").unwrap(), (vec![
            "a = 2".to_string(),
            "t1 = 2 * z".to_string(),
            "y = t1".to_string(),
        ], None));
    }

    #[test]
    fn unfoldable_reassignment_forgets_value() {
        assert_eq!(optimized("a = 1\na = y\nb = a + 1").unwrap(), (vec![
            "a = 1".to_string(),
            "a = y".to_string(),
            "t3 = a + 1".to_string(),
            "b = t3".to_string(),
        ], None));
    }

    #[test]
    fn later_fold_overwrites() {
        assert_eq!(optimized("x = 1\nx = x + 1").unwrap(), (vec!["x = 2".to_string()], Some(Number::Int(2))));
    }

    #[test]
    fn user_variable_named_like_a_temporary() {
        // `t0` the variable is unknown, even though temporary `t0` holds 5
        assert_eq!(optimized("y = t0 + 5").unwrap(), (vec![
            "t1 = t0 + 5".to_string(),
            "y = t1".to_string(),
        ], None));
    }

    #[test]
    fn negation() {
        assert_eq!(optimized("x = -(2 * 3)").unwrap(), (vec!["x = -6".to_string()], Some(Number::Int(-6))));
        assert_eq!(optimized("y = -z").unwrap(), (vec!["t0 = -z".to_string(), "y = t0".to_string()], None));
    }

    #[test]
    fn division_by_zero() {
        let err = optimized("x = 1 / (2 - 2)").unwrap_err();
        assert_eq!(err.message(), "division by zero");
        assert_eq!(err.spans, vec![4..15]);
    }

    #[test]
    fn operands_are_names_or_literals() {
        let (instructions, result) = optimized("x = (y + 2 * 3) * (y - 4) / 2").unwrap();
        assert_eq!(result, None);
        assert_eq!(instructions, vec![
            "t3 = y + 6",
            "t5 = y - 4",
            "t6 = t3 * t5",
            "t8 = t6 / 2",
            "x = t8",
        ]);
    }
}
