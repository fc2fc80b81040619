use tac_parser::parser::ast::literal::Literal;
use crate::{Compile, Compiler, Number, Operand, Place};

impl Compile for Literal {
    fn compile(&self, _: &mut Compiler) -> Operand {
        match self {
            Literal::Integer(int) => Operand::Const(Number::Int(int.value)),
            Literal::Float(float) => Operand::Const(Number::Float(float.value)),
            Literal::Symbol(sym) => Operand::Place(Place::Var(sym.name.clone())),
        }
    }
}
