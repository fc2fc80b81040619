use tac_parser::parser::ast::stmt::Stmt;
use tracing::debug;
use crate::{Compile, Compiler, InstructionKind, Place};

/// Compiles each assignment in order, ending each with `<target> = <value>`. Unsupported
/// statements produce no instructions.
pub fn compile_stmts(stmts: &[Stmt], compiler: &mut Compiler) {
    for stmt in stmts {
        match stmt {
            Stmt::Assign(assign) => {
                let value = assign.value.compile(compiler);
                compiler.add_instr(InstructionKind::Copy {
                    dest: Place::Var(assign.target.name.clone()),
                    src: value,
                }, assign.span());
            },
            Stmt::Unsupported(unsupported) => {
                debug!(kind = ?unsupported.kind, span = ?unsupported.span, "skipping unsupported statement");
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tac_parser::parser::Parser;
    use crate::{Instruction, Operand, Place};
    use super::*;

    fn compile(source: &str) -> Vec<Instruction> {
        let stmts = Parser::new(source).try_parse_full_many().unwrap();
        Compiler::compile_program(&stmts).instructions
    }

    fn render(source: &str) -> Vec<String> {
        compile(source).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn constant_assignment() {
        assert_eq!(render("y = 5"), vec!["y = 5"]);
    }

    #[test]
    fn variable_assignment() {
        assert_eq!(render("y = z"), vec!["y = z"]);
    }

    #[test]
    fn linear() {
        assert_eq!(render("x = 3*x + 5"), vec![
            "t0 = 3",
            "t1 = t0 * x",
            "t2 = 5",
            "t3 = t1 + t2",
            "x = t3",
        ]);
    }

    #[test]
    fn literals_are_stored_after_both_sides() {
        assert_eq!(render("x = 2 * (a + 1)"), vec![
            "t0 = 1",
            "t1 = a + t0",
            "t2 = 2",
            "t3 = t2 * t1",
            "x = t3",
        ]);
    }

    #[test]
    fn negated_literals_fold() {
        assert_eq!(render("x = -5"), vec!["x = -5"]);
        assert_eq!(render("x = --2.5"), vec!["x = 2.5"]);
        assert_eq!(render("x = +y"), vec!["x = y"]);
    }

    #[test]
    fn negated_variable() {
        assert_eq!(render("x = -y * 2"), vec![
            "t0 = -y",
            "t1 = 2",
            "t2 = t0 * t1",
            "x = t2",
        ]);
    }

    #[test]
    fn parentheses_are_transparent() {
        assert_eq!(render("x = ((y))"), vec!["x = y"]);
    }

    #[test]
    fn temporaries_continue_across_statements() {
        assert_eq!(render("a = 1 + b\nc = a * 2"), vec![
            "t0 = 1",
            "t1 = t0 + b",
            "a = t1",
            "t3 = 2",
            "t4 = a * t3",
            "c = t4",
        ]);
    }

    #[test]
    fn unsupported_statements_emit_nothing() {
        assert_eq!(render("y + 1\na = b = 2\nc += 1\nd = 4"), vec!["d = 4"]);
    }

    #[test]
    fn binary_operands_are_places() {
        for instruction in compile("x = 1 + 2 * 3 ** -y - 4 / (5 % z)") {
            if let InstructionKind::Binary { lhs, rhs, .. } = &instruction.kind {
                assert!(matches!(lhs, Operand::Place(_)), "{}", instruction);
                assert!(matches!(rhs, Operand::Place(_)), "{}", instruction);
            }
        }
    }

    #[test]
    fn spans_point_at_the_source() {
        let source = "x = a + 10";
        let instructions = compile(source);
        assert_eq!(&source[instructions[0].span.clone()], "10");
        assert_eq!(&source[instructions[1].span.clone()], "a + 10");
        assert_eq!(&source[instructions[2].span.clone()], "x = a + 10");
    }

    fn operand() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u8..100).prop_map(|n| n.to_string()),
            "[a-e]",
        ]
    }

    proptest! {
        #[test]
        fn temporaries_strictly_increase(
            first in operand(),
            rest in prop::collection::vec((prop::sample::select(vec!["+", "-", "*", "/", "**"]), operand()), 0..12),
        ) {
            let mut source = format!("x = {}", first);
            for (op, operand) in &rest {
                source.push_str(&format!(" {} {}", op, operand));
            }

            let mut last = None;
            for instruction in compile(&source) {
                if let Place::Temp(n) = instruction.dest() {
                    prop_assert!(last.map_or(true, |last| *n > last));
                    last = Some(*n);
                }
            }
        }
    }
}
