pub mod kind;

/// A general parsing error.
pub use tac_error::Error;
