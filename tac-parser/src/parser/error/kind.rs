use ariadne::Fmt;
use tac_attrs::ErrorKind;
use tac_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", self.lexeme),
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,

    /// The text of the token that was found.
    pub lexeme: String,
}

/// A statement was followed by something other than a newline or semicolon.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected the end of the statement, found `{}`", self.found),
    labels = ["this should not be here"],
    help = "separate statements with a newline or `;`",
)]
pub struct ExpectedEndOfStatement {
    /// The text that was found instead.
    pub found: String,
}

/// A parenthesis was opened without being closed, or closed without being opened.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = [if self.opening {
        "this parenthesis is never closed"
    } else {
        "this parenthesis was never opened"
    }],
    help = if self.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, it was a closing
    /// parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// An integer literal does not fit in a signed 64-bit integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("integer literal `{}` is too large", self.lexeme),
    labels = ["this literal"],
    help = format!("integers must be at most {}", i64::MAX),
)]
pub struct IntegerOutOfRange {
    /// The digits of the literal.
    pub lexeme: String,
}

/// A floating-point literal is too large to be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("floating-point literal `{}` is too large", self.lexeme),
    labels = ["this literal"],
)]
pub struct FloatOutOfRange {
    /// The text of the literal.
    pub lexeme: String,
}

/// An expression was nested too deeply to be compiled.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expression is nested more than {} levels deep", self.limit),
    labels = ["in this expression"],
    help = "split the expression into several statements",
)]
pub struct TooDeeplyNested {
    /// The nesting limit that was exceeded.
    pub limit: usize,
}
