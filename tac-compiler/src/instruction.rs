use crate::value::Number;
use std::{fmt, ops::Range};
use tac_parser::parser::token::op::{BinOpKind, UnaryOpKind};

/// A location that an instruction can write to.
///
/// Temporaries and user variables are kept apart, so a user variable named `t0` never aliases
/// the temporary `t0`, even though both print the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Place {
    /// A temporary created by the compiler, printed as `t<N>`.
    Temp(usize),

    /// A variable named in the source code.
    Var(String),
}

impl Place {
    /// Returns true if this is a compiler temporary.
    pub fn is_temp(&self) -> bool {
        matches!(self, Place::Temp(_))
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Place::Temp(n) => write!(f, "t{}", n),
            Place::Var(name) => write!(f, "{}", name),
        }
    }
}

/// A value read by an instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// The value stored in a place.
    Place(Place),

    /// A literal constant.
    Const(Number),
}

impl Operand {
    /// Returns the constant value of this operand, if it is one.
    pub fn as_const(&self) -> Option<Number> {
        match self {
            Operand::Const(n) => Some(*n),
            Operand::Place(_) => None,
        }
    }
}

impl From<Place> for Operand {
    fn from(place: Place) -> Self {
        Operand::Place(place)
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Const(n)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Place(place) => place.fmt(f),
            Operand::Const(n) => n.fmt(f),
        }
    }
}

/// The operation performed by an [`Instruction`].
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionKind {
    /// `dest = src`
    Copy {
        dest: Place,
        src: Operand,
    },

    /// `dest = op operand`
    Unary {
        dest: Place,
        op: UnaryOpKind,
        operand: Operand,
    },

    /// `dest = lhs op rhs`
    Binary {
        dest: Place,
        op: BinOpKind,
        lhs: Operand,
        rhs: Operand,
    },
}

/// A single three-address instruction: at most one operator, and a single destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,

    /// The region of the canonical source code that this instruction was generated from.
    pub span: Range<usize>,
}

impl Instruction {
    /// Creates a new instruction with the given span.
    pub fn new(kind: InstructionKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Returns the place this instruction writes to.
    pub fn dest(&self) -> &Place {
        match &self.kind {
            InstructionKind::Copy { dest, .. }
                | InstructionKind::Unary { dest, .. }
                | InstructionKind::Binary { dest, .. } => dest,
        }
    }

    /// Returns the operands this instruction reads, in order.
    pub fn operands(&self) -> Vec<&Operand> {
        match &self.kind {
            InstructionKind::Copy { src, .. } => vec![src],
            InstructionKind::Unary { operand, .. } => vec![operand],
            InstructionKind::Binary { lhs, rhs, .. } => vec![lhs, rhs],
        }
    }

    /// Returns mutable references to the operands this instruction reads, in order.
    pub fn operands_mut(&mut self) -> Vec<&mut Operand> {
        match &mut self.kind {
            InstructionKind::Copy { src, .. } => vec![src],
            InstructionKind::Unary { operand, .. } => vec![operand],
            InstructionKind::Binary { lhs, rhs, .. } => vec![lhs, rhs],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            InstructionKind::Copy { dest, src } => write!(f, "{} = {}", dest, src),
            InstructionKind::Unary { dest, op, operand } => write!(f, "{} = {}{}", dest, op, operand),
            InstructionKind::Binary { dest, op, lhs, rhs } => write!(f, "{} = {} {} {}", dest, lhs, op, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn display() {
        let copy = Instruction::new(InstructionKind::Copy {
            dest: Place::Temp(0),
            src: Number::Int(3).into(),
        }, 0..1);
        let neg = Instruction::new(InstructionKind::Unary {
            dest: Place::Temp(1),
            op: UnaryOpKind::Neg,
            operand: Place::Var("y".to_string()).into(),
        }, 0..2);
        let add = Instruction::new(InstructionKind::Binary {
            dest: Place::Var("x".to_string()),
            op: BinOpKind::Add,
            lhs: Place::Temp(0).into(),
            rhs: Number::Float(0.5).into(),
        }, 0..5);

        assert_eq!(copy.to_string(), "t0 = 3");
        assert_eq!(neg.to_string(), "t1 = -y");
        assert_eq!(add.to_string(), "x = t0 + 0.5");
    }

    #[test]
    fn temps_and_vars_are_distinct() {
        assert_eq!(Place::Temp(0).to_string(), Place::Var("t0".to_string()).to_string());
        assert!(Place::Temp(0) != Place::Var("t0".to_string()));
    }
}
