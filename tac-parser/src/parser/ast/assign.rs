use crate::parser::{
    ast::{expr::Expr, literal::LitSym},
    error::Error,
    token::Assign as AssignToken,
    Parse,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An assignment of an expression to a single variable, such as `x = 3*x + 5`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assign {
    /// The variable being assigned to.
    pub target: LitSym,

    /// The expression whose value is assigned.
    pub value: Expr,

    /// The region of the source code that this assignment was parsed from.
    pub span: Range<usize>,
}

impl Assign {
    /// Returns the span of the assignment.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Assign {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let target = input.try_parse::<LitSym>()?;
        input.try_parse::<AssignToken>()?;
        let value = input.try_parse::<Expr>()?;
        let span = target.span.start..value.span().end;

        Ok(Self { target, value, span })
    }
}

impl std::fmt::Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}
