//! Compiles algebraic expressions into three-address code (TAC), and folds the constant parts of
//! the result.
//!
//! The easiest entry point is [`compile`], which takes raw user input and returns a
//! [`CompileResult`] describing either the generated code or the error that occurred:
//!
//! ```
//! use tac_compiler::{compile, CompileResult};
//!
//! let CompileResult::Success { tac, optimized_tac, .. } = compile("2 + 3 * 4") else {
//!     panic!("expected the expression to compile");
//! };
//! assert_eq!(tac, vec![
//!     "t0 = 3",
//!     "t1 = 4",
//!     "t2 = t0 * t1",
//!     "t3 = 2",
//!     "t4 = t3 + t2",
//!     "x = t4",
//! ]);
//! assert_eq!(optimized_tac, vec!["x = 14"]);
//! ```
//!
//! The stages are also usable on their own: [`Compiler`] linearizes a parsed program,
//! [`optimize::optimize`] folds the result, and [`tree::TreeNode`] renders an expression as a
//! display tree.

pub mod compile;
pub mod error;
pub mod expr;
pub mod instruction;
pub mod optimize;
pub mod random;
pub mod sym_table;
pub mod tree;
pub mod value;

pub use compile::{compile, compile_with, Compilation, CompileError, CompileOptions, CompileResult};
pub use instruction::{Instruction, InstructionKind, Operand, Place};
pub use random::{generate_random_expression, generate_random_expression_with};
pub use value::Number;

use expr::compile_stmts;
use std::ops::Range;
use tac_parser::parser::ast::Stmt;
use tracing::trace;

/// A compiler that linearizes parsed statements into a flat list of [`Instruction`]s.
///
/// Each expression node is compiled by its [`Compile`] implementation, which appends the
/// instructions computing the node to the compiler, and returns the [`Operand`] holding its
/// value. Literals and variables produce no instructions at all; their operand refers to them
/// directly.
///
/// ```
/// use tac_compiler::Compiler;
/// use tac_parser::parser::Parser;
///
/// let stmts = Parser::new("y = 2 * a\nz = -y").try_parse_full_many().unwrap();
/// let compiler = Compiler::compile_program(&stmts);
///
/// let tac = compiler.instructions.iter().map(ToString::to_string).collect::<Vec<_>>();
/// assert_eq!(tac, vec![
///     "t0 = 2",
///     "t1 = t0 * a",
///     "y = t1",
///     "t3 = -y",
///     "z = t3",
/// ]);
/// ```
///
/// Temporaries are named after the number of instructions emitted before them, so their numbers
/// strictly increase across the whole program and are never reused.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    /// The instructions generated so far, in execution order.
    pub instructions: Vec<Instruction>,
}

impl Compiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles multiple statements into a sequence of [`Instruction`]s.
    pub fn compile_program(stmts: &[Stmt]) -> Self {
        let mut compiler = Self::new();
        compile_stmts(stmts, &mut compiler);
        compiler
    }

    /// Returns the place the next emitted instruction should write to, if it needs a temporary.
    pub fn next_temp(&self) -> Place {
        Place::Temp(self.instructions.len())
    }

    /// Adds an instruction with an associated source code span.
    pub fn add_instr(&mut self, kind: InstructionKind, span: Range<usize>) {
        let instruction = Instruction::new(kind, span);
        trace!(%instruction, "emit");
        self.instructions.push(instruction);
    }

    /// Stores a constant operand in a fresh temporary, returning the temporary. Other operands
    /// are returned unchanged.
    pub fn materialize(&mut self, operand: Operand, span: Range<usize>) -> Operand {
        match operand {
            Operand::Const(_) => {
                let dest = self.next_temp();
                self.add_instr(InstructionKind::Copy { dest: dest.clone(), src: operand }, span);
                dest.into()
            },
            place => place,
        }
    }
}

/// Any type that can be compiled into a sequence of [`Instruction`]s.
pub trait Compile {
    /// Appends the instructions that compute this value to the compiler, and returns the operand
    /// holding the value.
    fn compile(&self, compiler: &mut Compiler) -> Operand;
}
