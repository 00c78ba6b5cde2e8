//! Converts a regular expression into a conservative boolean expression over
//! literal substrings, or into its single longest guaranteed substring.
//!
//! The derived expression matches a superset of the regex: every string the
//! regex matches satisfies the expression, but not the other way around. That
//! makes it a cheap pre-filter for pruning candidates before running the real
//! regex engine, or a basis for substring index lookups.

use std::fmt;

mod longest;
mod parts;
mod sequences;
mod tree;

pub use tree::{AndNode, Node, OrNode};

use parts::normalize;
use sequences::flat_sequences;

#[derive(Clone, Debug)]
pub enum Error {
    /// The pattern is not valid under the `regex-syntax` grammar.
    InvalidRegex(regex_syntax::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRegex(err) => write!(f, "invalid regex: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidRegex(err) => Some(err),
        }
    }
}

impl From<regex_syntax::Error> for Error {
    fn from(err: regex_syntax::Error) -> Self {
        Error::InvalidRegex(err)
    }
}

/// Derives the AND/OR substring expression for `pattern`.
///
/// Returns `Ok(None)` when the pattern cannot be constrained to any
/// substring (e.g. `.*`), which a caller must read as "everything may
/// match". Errors only when the pattern itself fails to parse.
///
/// ```
/// let node = regex_sieve::to_expression("1.(3|c)").unwrap().unwrap();
/// assert_eq!(node.expr(), r#""1" AND ("3" OR "c")"#);
/// ```
pub fn to_expression(pattern: &str) -> Result<Option<Node>, Error> {
    let hir = regex_syntax::parse(pattern)?;
    Ok(tree::treeify(&flat_sequences(normalize(&hir))))
}

/// Returns the longest literal guaranteed to occur in any match of
/// `pattern`, possibly empty. Errors only when the pattern fails to parse.
///
/// ```
/// assert_eq!(regex_sieve::longest_literal("H[ae]llo").unwrap(), "llo");
/// ```
pub fn longest_literal(pattern: &str) -> Result<String, Error> {
    let hir = regex_syntax::parse(pattern)?;
    Ok(longest::longest(flat_sequences(normalize(&hir))))
}

#[cfg(test)]
mod test {
    use super::{longest_literal, to_expression};

    fn expr(pattern: &str) -> Option<String> {
        to_expression(pattern).unwrap().map(|n| n.expr())
    }

    #[test]
    fn expression_scenarios() {
        let cases = [
            ("Hello", r#""Hello""#),
            ("H[ae]llo", r#""Hallo" OR "Hello""#),
            ("Hello?", r#""Hell""#),
            ("Hello{3,4}", r#""Hellooo""#),
            ("1[2b](3|c)", r#""123" OR "12c" OR "1b3" OR "1bc""#),
            ("1.(3|c)", r#""1" AND ("3" OR "c")"#),
            ("1.?(3|c)", r#""1" AND ("3" OR "c")"#),
        ];
        for (pattern, want) in cases {
            assert_eq!(expr(pattern).as_deref(), Some(want), "pattern {pattern}");
        }
    }

    #[test]
    fn unconstrained_patterns() {
        assert_eq!(expr("."), None);
        assert_eq!(expr("a*"), None);
        assert_eq!(expr(""), None);
    }

    #[test]
    fn longest_scenarios() {
        let cases = [
            ("Hello", "Hello"),
            ("H[ae]llo", "llo"),
            ("Hello?", "Hell"),
            ("Hello{3,4}", "Hellooo"),
            ("1[2b](3|c)", "1"),
            ("1.(3|c)", "1"),
            ("1.?(3|c)", "1"),
            ("hi (alligator|elevator)", "ator"),
            ("(a|b)", ""),
            (".", ""),
        ];
        for (pattern, want) in cases {
            assert_eq!(longest_literal(pattern).unwrap(), want, "pattern {pattern}");
        }
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(to_expression("(unclosed").is_err());
        assert!(longest_literal("a{2,1}").is_err());
    }

    #[test]
    fn deterministic_output() {
        let pattern = "(foo|foobar|barbaz)+qu+ux[ab]";
        let first = expr(pattern);
        for _ in 0..3 {
            assert_eq!(expr(pattern), first);
        }
    }
}
