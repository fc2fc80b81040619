mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for structs with named fields and unit structs. The derived
/// implementation refers to `tac_error` and `ariadne` by path, so the crate using the derive must
/// depend on both.
///
/// The information of the error is customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```ignore
/// use tac_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error, and returned by `message()`.  |
/// | `labels`    | An array of label texts; label `i` points at span `i` of the error.          |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. The fields of the struct are in scope as references, and
/// `self` can be used as well.
///
/// [`ErrorKind`]: https://docs.rs/tac-error/latest/tac_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    target.into_token_stream().into()
}
