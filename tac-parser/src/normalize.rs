//! Rewrites the surface syntax people type into canonical source the parser accepts.
//!
//! ```
//! use tac_parser::normalize::normalize;
//!
//! assert_eq!(normalize("x² - 6x + 9"), "x = x**2 - 6*x + 9");
//! assert_eq!(normalize("y = (a + 1)(a - 1)"), "y = (a + 1)*(a - 1)");
//! ```
//!
//! Every rewrite is a textual substitution; nothing here validates the result. The rewrites are
//! applied in a fixed order, which matters: `x²` becomes `x**2` before the implicit
//! multiplication rule runs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use tracing::trace;

/// The variable that a bare expression is assigned to.
pub const DEFAULT_TARGET: &str = "x";

/// `<identifier>^<digits>`, a caret used as an exponent.
static CARET_POWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\^([0-9]+)").unwrap()
});

/// A digit immediately followed by a letter, as in `3x`.
static DIGIT_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9])([A-Za-z])").unwrap()
});

/// Replaces all matches of `re` in `source`, logging the rewrite if anything changed.
fn rewrite(name: &str, source: String, re: &Regex, replacement: &str) -> String {
    match re.replace_all(&source, replacement) {
        Cow::Borrowed(_) => source,
        Cow::Owned(rewritten) => {
            trace!(rule = name, from = %source, to = %rewritten, "normalizer rewrite");
            rewritten
        },
    }
}

/// Replaces all occurrences of `from` in `source`, logging the rewrite if anything changed.
fn replace(name: &str, source: String, from: &str, to: &str) -> String {
    if source.contains(from) {
        let rewritten = source.replace(from, to);
        trace!(rule = name, from = %source, to = %rewritten, "normalizer rewrite");
        rewritten
    } else {
        source
    }
}

/// Normalizes the given source, assigning bare expressions to [`DEFAULT_TARGET`].
pub fn normalize(source: &str) -> String {
    normalize_with_target(source, DEFAULT_TARGET)
}

/// Normalizes the given source, assigning bare expressions to `target`.
///
/// The rewrites are, in order:
///
/// 1. `²` becomes `**2`.
/// 2. `name^digits` becomes `name**digits`.
/// 3. A digit followed by a letter gets an explicit `*` between them.
/// 4. `)(` becomes `)*(`.
/// 5. If the result contains no `=`, it is prefixed with `target = `.
pub fn normalize_with_target(source: &str, target: &str) -> String {
    let mut out = replace("superscript", source.to_owned(), "²", "**2");
    out = rewrite("caret", out, &CARET_POWER, "${1}**${2}");
    out = rewrite("implicit-mul", out, &DIGIT_LETTER, "${1}*${2}");
    out = replace("adjacent-parens", out, ")(", ")*(");

    if !out.contains('=') {
        out = format!("{} = {}", target, out.trim());
        trace!(target, result = %out, "assigned bare expression");
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use super::*;

    #[test]
    fn implicit_multiplication() {
        assert_eq!(normalize("3x + 5"), "x = 3*x + 5");
    }

    #[test]
    fn superscript_two() {
        assert_eq!(normalize("x² - 6x + 9"), "x = x**2 - 6*x + 9");
    }

    #[test]
    fn caret_exponent() {
        assert_eq!(normalize("y = a^3 + b^12"), "y = a**3 + b**12");
    }

    #[test]
    fn caret_between_numbers_is_xor() {
        assert_eq!(normalize("y = 5 ^ 3"), "y = 5 ^ 3");
        assert_eq!(normalize("y = 5^3"), "y = 5^3");
    }

    #[test]
    fn adjacent_parentheses() {
        assert_eq!(normalize("(x + 1)(x - 2)"), "x = (x + 1)*(x - 2)");
    }

    #[test]
    fn digit_then_letter_inside_identifier() {
        // the rewrite is purely textual
        assert_eq!(normalize("y = x2a"), "y = x2*a");
    }

    #[test]
    fn explicit_assignment_is_kept() {
        assert_eq!(normalize("z = 2*x"), "z = 2*x");
    }

    #[test]
    fn bare_expression_is_trimmed() {
        assert_eq!(normalize("  2 + 3 * 4\n"), "x = 2 + 3 * 4");
    }

    #[test]
    fn custom_target() {
        assert_eq!(normalize_with_target("4y", "result"), "result = 4*y");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "x = ");
    }

    proptest! {
        #[test]
        fn canonical_source_is_unchanged(
            target in "[a-z]",
            terms in prop::collection::vec(("[a-z]", 0u32..100), 1..6),
        ) {
            let rhs = terms
                .iter()
                .map(|(name, coeff)| format!("{} * {}", coeff, name))
                .collect::<Vec<_>>()
                .join(" + ");
            let source = format!("{} = {}", target, rhs);
            prop_assert_eq!(normalize(&source), source);
        }
    }
}
