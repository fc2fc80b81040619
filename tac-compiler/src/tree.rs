use std::fmt;
use tac_parser::parser::ast::{expr::Expr, literal::Literal, stmt::Stmt};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A node of the display tree: an operator symbol, a constant, or a variable name, with its
/// operands as children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TreeNode {
    /// The text displayed for this node.
    pub value: String,

    /// The operands of this node, in order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a node with no children.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self { value: value.into(), children: Vec::new() }
    }

    /// The tree displayed for statements that are not compiled.
    pub fn unknown() -> Self {
        Self::leaf("?")
    }

    /// Builds the display tree of the first statement's right-hand side.
    pub fn from_program(stmts: &[Stmt]) -> Self {
        match stmts.first() {
            Some(Stmt::Assign(assign)) => Self::from(&assign.value),
            _ => Self::unknown(),
        }
    }

    /// Writes the tree one node per line, indenting each level by two spaces.
    fn fmt_indented(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.value, indent = depth * 2)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl From<&Expr> for TreeNode {
    fn from(expr: &Expr) -> Self {
        match expr.innermost() {
            Expr::Literal(Literal::Integer(int)) => Self::leaf(int.value.to_string()),
            Expr::Literal(Literal::Float(float)) => Self::leaf(format!("{:?}", float.value)),
            Expr::Literal(Literal::Symbol(sym)) => Self::leaf(sym.name.clone()),
            Expr::Unary(unary) => Self {
                value: unary.op.kind.symbol().to_owned(),
                children: vec![Self::from(&*unary.operand)],
            },
            Expr::Binary(binary) => Self {
                value: binary.op.kind.symbol().to_owned(),
                children: vec![Self::from(&*binary.lhs), Self::from(&*binary.rhs)],
            },
            Expr::Paren(_) => Self::unknown(),
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tac_parser::parser::Parser;
    use super::*;

    fn tree(source: &str) -> TreeNode {
        TreeNode::from_program(&Parser::new(source).try_parse_full_many().unwrap())
    }

    fn node(value: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode { value: value.to_string(), children }
    }

    #[test]
    fn mirrors_the_expression() {
        assert_eq!(tree("x = 3*x + 5"), node("+", vec![
            node("*", vec![TreeNode::leaf("3"), TreeNode::leaf("x")]),
            TreeNode::leaf("5"),
        ]));
    }

    #[test]
    fn parentheses_are_looked_through() {
        assert_eq!(tree("y = -((a))"), node("-", vec![TreeNode::leaf("a")]));
    }

    #[test]
    fn floats_keep_their_fraction() {
        assert_eq!(tree("y = 2."), TreeNode::leaf("2.0"));
    }

    #[test]
    fn only_the_first_statement() {
        assert_eq!(tree("a = 1\nb = 2"), TreeNode::leaf("1"));
    }

    #[test]
    fn unsupported_first_statement() {
        assert_eq!(tree("a + 1\nb = 2"), TreeNode::unknown());
        assert_eq!(tree(""), TreeNode::unknown());
    }

    #[test]
    fn display_indents_children() {
        assert_eq!(tree("x = a * (b - 1)").to_string(), "*\n  a\n  -\n    b\n    1\n");
    }
}
