//! Normalizer, tokenizer and parser for the algebraic expressions compiled by `tac-compiler`.
//!
//! Source goes through [`normalize::normalize`] first, which rewrites shorthand such as `3x` or
//! `x²` into canonical syntax, then through [`parser::Parser`], which produces a list of
//! [`parser::ast::Stmt`]s.

pub mod normalize;
pub mod parser;
pub mod tokenizer;
