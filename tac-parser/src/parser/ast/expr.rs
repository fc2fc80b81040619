use crate::{
    parser::{
        ast::{binary::Binary, literal::Literal, paren::Paren, unary::Unary},
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general expression.
///
/// An expression is any piece of code that produces a value: the right-hand side of an
/// assignment, or the inside of a pair of parentheses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is a [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns the height of the expression tree, where a literal has a height of 1. Parentheses
    /// count as a level of their own.
    ///
    /// The tree is walked with an explicit stack, so this is safe to call on trees of any height.
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1)];

        while let Some((expr, depth)) = stack.pop() {
            max = max.max(depth);
            match expr {
                Expr::Literal(_) => (),
                Expr::Paren(paren) => stack.push((&paren.expr, depth + 1)),
                Expr::Unary(unary) => stack.push((&unary.operand, depth + 1)),
                Expr::Binary(binary) => {
                    stack.push((&binary.lhs, depth + 1));
                    stack.push((&binary.rhs, depth + 1));
                },
            }
        }

        max
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.peek_kind() == Some(TokenKind::CloseParen) {
            input.next_token()?;
            let span = input.prev_token().map_or(input.eof_span(), |token| token.span.clone());
            return Err(Error::new(vec![span], kind::UnclosedParenthesis { opening: false }));
        }

        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

/// Represents a primary expression: an operand that binds tighter than any operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.peek_kind() == Some(TokenKind::OpenParen) {
            input.try_parse().map(Self::Paren)
        } else {
            input.try_parse().map(Self::Literal)
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    #[test]
    fn height_of_literal() {
        assert_eq!(parse("x").height(), 1);
    }

    #[test]
    fn height_counts_longest_path() {
        // `-`, `*`, the parentheses, `+`, then `a`
        assert_eq!(parse("(a + b) * c - d").height(), 5);
        assert_eq!(parse("a - b").height(), 2);
    }

    #[test]
    fn innermost_skips_parentheses() {
        let expr = parse("((x))");
        assert_eq!(expr.innermost().to_string(), "x");
        assert_eq!(expr.to_string(), "((x))");
    }

    #[test]
    fn display_float() {
        assert_eq!(parse("2. + .5").to_string(), "2.0 + 0.5");
    }
}
