pub mod kind;

use kind::{ComplexResult, DivisionByZero, FloatBitwise, IntegerOverflow, NegativeShift, NonFiniteResult};
use std::ops::Range;
use tac_error::{Error, ErrorKind};

/// Generates the [`EvalError`] enum, with a variant and a [`From`] implementation for each error
/// kind.
macro_rules! eval_errors {
    ($($name:ident)*) => {
        /// Represents an error that can occur while evaluating an operation on constants.
        ///
        /// These errors do not carry a span; the optimizer attaches the span of the instruction
        /// being folded with [`EvalError::into_error`].
        #[derive(Debug, Clone, PartialEq)]
        pub enum EvalError {
            $(
                #[allow(missing_docs)]
                $name($name),
            )*
        }

        $(
            impl From<$name> for EvalError {
                fn from(e: $name) -> Self {
                    EvalError::$name(e)
                }
            }
        )*

        impl EvalError {
            /// Returns the plain message of this error.
            pub fn message(&self) -> String {
                match self {
                    $(EvalError::$name(e) => e.message(),)*
                }
            }

            /// Converts the [`EvalError`] into an [`Error`] pointing at the given span.
            pub fn into_error(self, span: Range<usize>) -> Error {
                let kind: Box<dyn ErrorKind> = match self {
                    $(EvalError::$name(e) => Box::new(e),)*
                };
                Error { spans: vec![span], kind }
            }
        }
    };
}

eval_errors!(
    DivisionByZero
    IntegerOverflow
    FloatBitwise
    NegativeShift
    ComplexResult
    NonFiniteResult
);
