use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::{kind, Error},
    token::op::BinOp,
    Associativity,
    Parser,
    Precedence,
    MAX_HEIGHT,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. However, before we build the
    /// corresponding AST node, we should check if the operator after `2` has higher precedence
    /// than `+` (if it exists).
    ///
    /// If it does, we should parse the expression starting with `2` first, so that we get `2 * 3`
    /// as the right-hand-side to the `1 +` node. This works by calling into [`Self::parse_expr`]
    /// again, but with `rhs` (`2` in this case) as the `lhs` argument.
    ///
    /// If it does not (such as in the expression `3 * 2 + 1`), we return `rhs` as-is, and
    /// [`Self::parse_expr`] builds the AST node `3 * 2` first, then picks up the `+ 1` part of the
    /// expression on its next iteration.
    ///
    /// Right-associative operators of equal precedence (`2 ** 3 ** 2`) recurse as well, and each
    /// such recursion costs one level of nesting.
    fn complete_rhs(input: &mut Parser, op: &BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            let Ok(next_op) = input.peek::<BinOp>() else {
                break;
            };

            if next_op.precedence() > precedence {
                rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
            } else if next_op.precedence() == precedence
                && next_op.associativity() == Associativity::Right
            {
                rhs = input.nested(|input| Self::parse_expr(input, rhs, precedence))?;
            } else {
                // this operator has lower precedence, or equal precedence and
                // left-associativity, as in `1 * 2 + 3` or `1 * 2 * 3`
                //
                // let `lhs` become `1 * 2`; the caller parses this operator next
                break;
            }
        }

        Ok(rhs)
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there are binary operators with at least the given precedence, and their right-hand-sides.
    ///
    /// Chains of left-associative operators are built in a loop, so `1 + 2 + ... + n` does not
    /// recurse. The height of the resulting tree is tracked instead, and parsing fails once it
    /// exceeds [`MAX_HEIGHT`].
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        let mut height = lhs.height();

        while let Ok(op) = input.peek::<BinOp>() {
            if op.precedence() < precedence {
                break;
            }

            input.next_token()?;
            let rhs = Unary::parse_or_lower(input)?;
            let rhs = Self::complete_rhs(input, &op, rhs)?;
            let span = lhs.span().start..rhs.span().end;

            height = 1 + height.max(rhs.height());
            if height > MAX_HEIGHT {
                return Err(Error::new(vec![span], kind::TooDeeplyNested { limit: MAX_HEIGHT }));
            }

            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl std::fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.kind, self.rhs)
    }
}
