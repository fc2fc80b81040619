use crate::{
    parser::{
        ast::{assign::Assign, expr::Expr, literal::LitSym},
        error::Error,
        token::{Assign as AssignToken, CompoundAssign},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a syntactically valid statement that is not compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnsupportedKind {
    /// A bare expression, such as `x + 1`.
    Expr,

    /// A chained assignment, such as `a = b = 1`.
    ChainedAssign,

    /// An augmented assignment, such as `x += 1`.
    AugmentedAssign,
}

/// A statement that parses successfully, but produces no instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unsupported {
    /// What kind of statement this is.
    pub kind: UnsupportedKind,

    /// The region of the source code that this statement was parsed from.
    pub span: Range<usize>,
}

/// Represents a single statement of a program. Statements are separated by newlines or
/// semicolons.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stmt {
    /// An assignment to a single variable, such as `x = 1`.
    Assign(Assign),

    /// Any other statement.
    Unsupported(Unsupported),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn span(&self) -> Range<usize> {
        match self {
            Stmt::Assign(assign) => assign.span(),
            Stmt::Unsupported(unsupported) => unsupported.span.clone(),
        }
    }

    /// Returns the expression this statement assigns, if it is a supported assignment.
    pub fn expr(&self) -> Option<&Expr> {
        match self {
            Stmt::Assign(assign) => Some(&assign.value),
            Stmt::Unsupported(_) => None,
        }
    }
}

impl Parse for Stmt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.peek_is(&[TokenKind::Name, TokenKind::Assign]) {
            let assign = input.try_parse::<Assign>()?;
            if input.peek_kind() != Some(TokenKind::Assign) {
                return Ok(Stmt::Assign(assign));
            }

            let mut end = assign.span.end;
            while input.peek_kind() == Some(TokenKind::Assign) {
                input.try_parse::<AssignToken>()?;
                end = input.try_parse::<Expr>()?.span().end;
            }
            return Ok(Stmt::Unsupported(Unsupported {
                kind: UnsupportedKind::ChainedAssign,
                span: assign.span.start..end,
            }));
        }

        if input.peek_is(&[TokenKind::Name, TokenKind::CompoundAssign]) {
            let target = input.try_parse::<LitSym>()?;
            input.try_parse::<CompoundAssign>()?;
            let value = input.try_parse::<Expr>()?;
            return Ok(Stmt::Unsupported(Unsupported {
                kind: UnsupportedKind::AugmentedAssign,
                span: target.span.start..value.span().end,
            }));
        }

        let expr = input.try_parse::<Expr>()?;
        Ok(Stmt::Unsupported(Unsupported {
            kind: UnsupportedKind::Expr,
            span: expr.span(),
        }))
    }
}

impl std::fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Assign(assign) => assign.fmt(f),
            Stmt::Unsupported(_) => write!(f, "?"),
        }
    }
}
