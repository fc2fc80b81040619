pub mod assign;
pub mod binary;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod stmt;
pub mod unary;

pub use assign::Assign;
pub use binary::Binary;
pub use expr::{Expr, Primary};
pub use literal::{Literal, LitFloat, LitInt, LitSym};
pub use paren::Paren;
pub use stmt::{Stmt, Unsupported, UnsupportedKind};
pub use unary::Unary;
