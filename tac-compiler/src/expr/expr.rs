use tac_parser::parser::ast::expr::Expr;
use crate::{Compile, Compiler, Operand};

impl Compile for Expr {
    fn compile(&self, compiler: &mut Compiler) -> Operand {
        match self {
            Expr::Literal(literal) => literal.compile(compiler),
            Expr::Paren(paren) => paren.innermost().compile(compiler),
            Expr::Unary(unary) => unary.compile(compiler),
            Expr::Binary(binary) => binary.compile(compiler),
        }
    }
}
