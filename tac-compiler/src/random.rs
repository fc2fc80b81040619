//! Random algebraic expressions, used to exercise the compiler.
//!
//! Expressions are written the way a user would type them, with implicit multiplication and
//! superscripts, so they go through every normalization rule.

use rand::{seq::SliceRandom, Rng};

/// The variables that generated expressions are built from.
const VARIABLES: [&str; 5] = ["x", "y", "z", "a", "b"];

/// Returns a random coefficient between 1 and 9.
fn coefficient(rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=9)
}

/// Returns a random variable from [`VARIABLES`].
fn variable(rng: &mut impl Rng) -> &'static str {
    VARIABLES.choose(rng).copied().unwrap_or("x")
}

/// Returns two different random variables.
fn two_variables(rng: &mut impl Rng) -> (&'static str, &'static str) {
    let mut chosen = VARIABLES.choose_multiple(rng, 2).copied();
    match (chosen.next(), chosen.next()) {
        (Some(first), Some(second)) => (first, second),
        _ => ("x", "y"),
    }
}

/// Generates a random expression using the thread-local random number generator.
pub fn generate_random_expression() -> String {
    generate_random_expression_with(&mut rand::thread_rng())
}

/// Generates a random expression using the given random number generator.
///
/// The expression is one of: a linear expression (`3x + 5`), a quadratic (`x² + 4x + 2`), a
/// linear expression in two variables (`2x + 7y - 1`), a product of two binomials
/// (`(2x + 1)(3x - 4)`), or a sum of two fractions (`(x + 1)/2 + (3x - 2)/5`).
pub fn generate_random_expression_with(rng: &mut impl Rng) -> String {
    let expr = match rng.gen_range(0..5) {
        0 => {
            let v = variable(rng);
            format!("{}{} + {}", coefficient(rng), v, coefficient(rng))
        },
        1 => {
            let v = variable(rng);
            let (b, c) = (coefficient(rng), coefficient(rng));
            if rng.gen_bool(0.5) {
                format!("{v}² + {b}{v} + {c}")
            } else {
                format!("{}{v}^2 - {b}{v} + {c}", coefficient(rng))
            }
        },
        2 => {
            let (v, w) = two_variables(rng);
            format!("{}{v} + {}{w} - {}", coefficient(rng), coefficient(rng), coefficient(rng))
        },
        3 => {
            let v = variable(rng);
            let (a, b, c, d) = (coefficient(rng), coefficient(rng), coefficient(rng), coefficient(rng));
            format!("({a}{v} + {b})({c}{v} - {d})")
        },
        _ => {
            let v = variable(rng);
            let (a, b, c) = (coefficient(rng), coefficient(rng), coefficient(rng));
            let (d, e, f) = (coefficient(rng), coefficient(rng), coefficient(rng));
            format!("({a}{v} + {b})/{c} + ({d}{v} - {e})/{f}")
        },
    };

    tracing::debug!(%expr, "generated random expression");
    expr
}

#[cfg(test)]
mod tests {
    use crate::compile::{compile, CompileResult};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};
    use super::*;

    #[test]
    fn seeded_generation_is_deterministic() {
        let first = generate_random_expression_with(&mut StdRng::seed_from_u64(42));
        let second = generate_random_expression_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn uses_known_variables() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let expr = generate_random_expression_with(&mut rng);
            assert!(expr.chars().filter(char::is_ascii_alphabetic).all(|c| VARIABLES.contains(&c.to_string().as_str())));
        }
    }

    #[test]
    fn thread_rng_generation_compiles() {
        let expr = generate_random_expression();
        assert!(compile(&expr).is_success(), "{expr}");
    }

    proptest! {
        #[test]
        fn generated_expressions_compile(seed in any::<u64>()) {
            let expr = generate_random_expression_with(&mut StdRng::seed_from_u64(seed));
            let result = compile(&expr);
            let CompileResult::Success { final_result, .. } = &result else {
                panic!("{expr} failed to compile: {result:?}");
            };
            prop_assert_eq!(*final_result, None);
        }
    }
}
