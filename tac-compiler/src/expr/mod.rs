mod binary;
mod expr;
mod literal;
mod stmt;
mod unary;

pub use stmt::compile_stmts;
