use std::fmt;

use crate::error::{EvalError, ParseError};
use crate::evaluate::Registers;
use crate::lexer::tokenize;
use crate::parse::parse_tokens;
use crate::postfix::Postfix;
use crate::sample::{SampleRange, Samples};
use crate::FloatExt;

use log::debug;

/// A parsed expression in `x`, compiled to postfix form.
///
/// Cheap to evaluate repeatedly; `Send + Sync`, so a single instance can be
/// shared across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression<Real> {
    source: String,
    postfix: Postfix<Real>,
}

impl<Real: FloatExt> Expression<Real> {
    /// Parse the expression from `input`.
    ///
    /// Tokens must be separated by whitespace, except for parentheses.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(input)?;
        let root = parse_tokens(&tokens)?;
        let postfix = Postfix::from_group(&root);
        debug!("compiled {input:?} to postfix `{postfix}`");
        Ok(Self {
            source: input.to_string(),
            postfix,
        })
    }

    pub fn evaluate(&self, x: Real) -> Result<Real, EvalError> {
        self.postfix.evaluate(x)
    }

    pub fn evaluate_in(&self, x: Real, registers: &mut Registers<Real>) -> Result<Real, EvalError> {
        self.postfix.evaluate_in(x, registers)
    }

    pub fn sample(&self, range: &SampleRange<Real>) -> Result<Samples<Real>, EvalError> {
        self.postfix.sample(range)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn postfix(&self) -> &Postfix<Real> {
        &self.postfix
    }

    pub fn into_postfix(self) -> Postfix<Real> {
        self.postfix
    }
}

impl<Real: FloatExt> fmt::Display for Expression<Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses `input` into a reusable "evaluate at x" function.
pub fn compile<Real: FloatExt>(
    input: &str,
) -> Result<impl Fn(Real) -> Result<Real, EvalError> + Clone + Send + Sync, ParseError> {
    let postfix = Expression::parse(input)?.into_postfix();
    Ok(move |x: Real| postfix.evaluate(x))
}
