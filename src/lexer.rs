use std::fmt;

use crate::error::ParseError;
use crate::operator::Operator;
use crate::FloatExt;

use log::trace;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"] // relative to project `src`
struct TokenParser;

pub const OPEN: &str = "(";
pub const CLOSE: &str = ")";

/// The only free variable an expression may reference.
pub const VARIABLE: &str = "x";

/// A validated, non-bracket token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Symbol<Real> {
    Number(Real),
    Variable,
    Operator(Operator),
}

impl<Real: fmt::Display> fmt::Display for Symbol<Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Variable => f.write_str(VARIABLE),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}

/// Splits `input` into raw tokens.
///
/// Parentheses are always tokens of their own, so `sin(x)` yields `sin`, `(`,
/// `x`, `)`. Every other token is a maximal whitespace-delimited run. Nothing
/// is validated here.
pub fn tokenize(input: &str) -> Result<Vec<&str>, ParseError> {
    let tokens: Vec<&str> = TokenParser::parse(Rule::tokens, input)
        .map_err(Box::new)?
        .flatten()
        .filter(|p| matches!(p.as_rule(), Rule::open | Rule::close | Rule::word))
        .map(|p| p.as_str())
        .collect();
    trace!("tokenized {input:?} into {tokens:?}");
    Ok(tokens)
}

/// Classifies a single non-bracket token.
pub fn validate_token<Real: FloatExt>(token: &str) -> Result<Symbol<Real>, ParseError> {
    let unknown = || ParseError::UnknownToken {
        token: token.to_string(),
    };

    if TokenParser::parse(Rule::number_literal, token).is_ok() {
        return token.parse().map(Symbol::Number).map_err(|_| unknown());
    }
    if token == VARIABLE {
        return Ok(Symbol::Variable);
    }
    Operator::from_symbol(token)
        .map(Symbol::Operator)
        .ok_or_else(unknown)
}
