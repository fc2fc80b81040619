use tac_parser::parser::ast::binary::Binary;
use crate::{Compile, Compiler, InstructionKind, Operand};

impl Compile for Binary {
    fn compile(&self, compiler: &mut Compiler) -> Operand {
        let lhs = self.lhs.compile(compiler);
        let rhs = self.rhs.compile(compiler);

        // both operands of a binary instruction are always places
        let lhs = compiler.materialize(lhs, self.lhs.span());
        let rhs = compiler.materialize(rhs, self.rhs.span());

        let dest = compiler.next_temp();
        compiler.add_instr(InstructionKind::Binary {
            dest: dest.clone(),
            op: self.op.kind,
            lhs,
            rhs,
        }, self.span());
        dest.into()
    }
}
