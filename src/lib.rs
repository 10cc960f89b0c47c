//! Single-variable math expression parser/evaluator.
//!
//! Expressions are written in infix notation over the variable `x`, with
//! parentheses for grouping, the binary operators `+ - * / ^` and the unary
//! functions `sin cos tan sqrt`. Tokens are separated by whitespace;
//! parentheses need no separation.
//!
//! Parsing happens once. The expression is grouped by its parentheses and then
//! converted to postfix order with a fixed precedence table:
//!
//! | rank | operators               |
//! |------|-------------------------|
//! | 1    | `+` `-`                 |
//! | 2    | `*` `/`                 |
//! | 3    | `sin` `cos` `tan` `sqrt`|
//! | 4    | `^`                     |
//!
//! All operators are left-associative. The resulting postfix sequence is then
//! evaluated over a value stack for as many values of `x` as needed, for
//! example to plot the curve.
//!
//! # Example
//!
//! ```rust
//! use curve_expr::*;
//!
//! let parsed = Expression::<f64>::parse("(2 * sqrt(x ^ 2) + 3 * sin(x))").unwrap();
//! assert_eq!(parsed.evaluate(0.0), Ok(0.0));
//!
//! let range = SampleRange::new(-1.0, 1.0, 0.5).unwrap();
//! let samples = parsed.sample(&range).unwrap();
//! assert_eq!(samples.xs, [-1.0, -0.5, 0.0, 0.5]);
//!
//! let err = Expression::<f64>::parse("1 / (x - x)").unwrap().evaluate(2.0);
//! assert_eq!(err, Err(EvalError::DivisionByZero));
//! ```

mod error;
mod evaluate;
mod expression;
mod lexer;
mod operator;
mod parse;
mod postfix;
mod sample;

/// Uses the [`pest`] parsing expression grammar language.
///
/// ```text
#[doc = include_str!("grammar.pest")]
/// ```
pub mod grammar_doc {}

pub use error::*;
pub use evaluate::Registers;
pub use expression::*;
pub use lexer::{tokenize, validate_token, Rule, Symbol, VARIABLE};
pub use operator::{Arity, Operator};
pub use parse::{parse_tokens, Node, MAX_DEPTH};
pub use postfix::Postfix;
pub use sample::*;

pub trait FloatExt:
    num_traits::Float + std::str::FromStr + std::fmt::Display + std::fmt::Debug + Send + Sync
{
}
impl FloatExt for f32 {}
impl FloatExt for f64 {}
