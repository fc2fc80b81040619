//! The complete pipeline, from raw user input to optimized three-address code.

use crate::{
    instruction::Instruction,
    optimize::{optimize, Optimized},
    tree::TreeNode,
    value::Number,
    Compiler,
};
use std::fmt;
use tac_error::Error;
use tac_parser::{
    normalize::{normalize_with_target, DEFAULT_TARGET},
    parser::{ast::Stmt, Parser},
};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Options that control how source code is compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// The variable that bare expressions are assigned to, and whose folded value is reported as
    /// the final result.
    pub default_target: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { default_target: DEFAULT_TARGET.to_owned() }
    }
}

/// An error that stops compilation.
#[derive(Debug)]
pub enum CompileError {
    /// The normalized source could not be parsed.
    Parse(Error),

    /// A constant operation failed to evaluate while folding.
    Evaluation(Error),
}

impl CompileError {
    /// Returns the underlying error, with its spans into the normalized source.
    pub fn error(&self) -> &Error {
        match self {
            CompileError::Parse(err) | CompileError::Evaluation(err) => err,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error().fmt(f)
    }
}

impl std::error::Error for CompileError {}

/// The typed result of compiling a program successfully.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The source after normalization. Every span refers to this string.
    pub processed_expr: String,

    /// The parsed statements.
    pub stmts: Vec<Stmt>,

    /// The instructions generated by the linearizer.
    pub instructions: Vec<Instruction>,

    /// The instructions after optimization.
    pub optimized: Vec<Instruction>,

    /// The folded value of the result variable, if every input to it is a constant.
    pub final_result: Option<Number>,

    /// The display tree of the first statement's right-hand side.
    pub tree: TreeNode,
}

impl Compilation {
    /// Normalizes, parses, linearizes and optimizes the given source.
    pub fn new(source: &str, options: &CompileOptions) -> Result<Self, CompileError> {
        let processed_expr = normalize_with_target(source, &options.default_target);
        debug!(original = source, processed = %processed_expr, "normalized");

        let stmts = Parser::new(&processed_expr)
            .try_parse_full_many()
            .map_err(CompileError::Parse)?;
        debug!(statements = stmts.len(), "parsed");

        let compiler = Compiler::compile_program(&stmts);
        debug!(instructions = compiler.instructions.len(), "linearized");

        let Optimized { instructions: optimized, result } =
            optimize(&compiler.instructions, &options.default_target)
                .map_err(CompileError::Evaluation)?;
        let tree = TreeNode::from_program(&stmts);

        Ok(Self {
            processed_expr,
            stmts,
            instructions: compiler.instructions,
            optimized,
            final_result: result,
            tree,
        })
    }
}

/// The outcome of [`compile`], shaped for reporting to a caller that does not use Rust types.
///
/// With the `serde` feature, this serializes without a tag, as one of the two objects:
///
/// ```json
/// {"tac": [...], "optimized_tac": [...], "final_result": 14, "original_expr": "...", "processed_expr": "...", "ast": {...}}
/// {"error": "...", "original_expr": "..."}
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(untagged))]
pub enum CompileResult {
    /// The program compiled successfully.
    Success {
        /// The generated instructions, one per line.
        tac: Vec<String>,

        /// The optimized instructions, one per line.
        optimized_tac: Vec<String>,

        /// The folded value of the result variable, if known.
        final_result: Option<Number>,

        /// The source as given.
        original_expr: String,

        /// The source after normalization.
        processed_expr: String,

        /// The display tree of the first statement's right-hand side.
        ast: TreeNode,
    },

    /// The program failed to compile.
    Failure {
        /// A description of the error.
        error: String,

        /// The source as given.
        original_expr: String,
    },
}

impl CompileResult {
    /// Returns true if the program compiled successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, CompileResult::Success { .. })
    }

    /// Returns the error message, if compilation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            CompileResult::Success { .. } => None,
            CompileResult::Failure { error, .. } => Some(error),
        }
    }
}

impl From<(&str, Result<Compilation, CompileError>)> for CompileResult {
    fn from((original_expr, result): (&str, Result<Compilation, CompileError>)) -> Self {
        match result {
            Ok(compilation) => CompileResult::Success {
                tac: compilation.instructions.iter().map(ToString::to_string).collect(),
                optimized_tac: compilation.optimized.iter().map(ToString::to_string).collect(),
                final_result: compilation.final_result,
                original_expr: original_expr.to_owned(),
                processed_expr: compilation.processed_expr,
                ast: compilation.tree,
            },
            Err(err) => CompileResult::Failure {
                error: err.to_string(),
                original_expr: original_expr.to_owned(),
            },
        }
    }
}

/// Compiles the given source with the default options.
pub fn compile(code: &str) -> CompileResult {
    compile_with(code, &CompileOptions::default())
}

/// Compiles the given source with the given options.
pub fn compile_with(code: &str, options: &CompileOptions) -> CompileResult {
    CompileResult::from((code, Compilation::new(code, options)))
}
