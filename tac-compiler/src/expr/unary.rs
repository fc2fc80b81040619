use tac_parser::parser::{ast::unary::Unary, token::op::UnaryOpKind};
use crate::{Compile, Compiler, InstructionKind, Number, Operand};

impl Compile for Unary {
    fn compile(&self, compiler: &mut Compiler) -> Operand {
        let operand = self.operand.compile(compiler);
        if self.op.kind == UnaryOpKind::Pos {
            return operand;
        }

        // negative literals are folded into the literal itself
        if let Some(value) = operand.as_const() {
            if let Ok(negated) = Number::unary(UnaryOpKind::Neg, value) {
                return Operand::Const(negated);
            }
        }

        let dest = compiler.next_temp();
        compiler.add_instr(InstructionKind::Unary {
            dest: dest.clone(),
            op: self.op.kind,
            operand,
        }, self.span());
        dest.into()
    }
}
