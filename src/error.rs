use crate::lexer::Rule;
use crate::operator::Operator;

use thiserror::Error;

/// Coarse classification shared by every error the crate raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A token that is not a number, operator, function or `x`.
    Lexical,
    /// Unbalanced or empty groups, or missing input.
    Syntax,
    /// An operator found too few operands on the evaluation stack.
    Arity,
    /// The operation is undefined for its operand (`1 / 0`, `sqrt(-1)`).
    Domain,
    /// Evaluation left zero or several values on the stack.
    ResultCardinality,
    /// Invalid sampling configuration.
    Range,
}

/// Failure to turn an input string into a postfix sequence.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected token `{token}`")]
    UnknownToken { token: String },
    #[error("unexpected `)`")]
    UnexpectedClose,
    #[error("missing `)`")]
    MissingClose,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("empty group `()`")]
    EmptyGroup,
    #[error("groups nested deeper than {max} levels")]
    TooDeep { max: usize },
    #[error(transparent)]
    Grammar(#[from] Box<pest::error::Error<Rule>>),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownToken { .. } | Self::Grammar(_) => ErrorKind::Lexical,
            Self::UnexpectedClose | Self::MissingClose | Self::UnexpectedEnd
            | Self::EmptyGroup
            | Self::TooDeep { .. } => {
                ErrorKind::Syntax
            }
        }
    }
}

/// Failure while running a postfix sequence.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("not enough operands for operator `{operator}`: need {required}, found {found}")]
    NotEnoughOperands {
        operator: Operator,
        required: usize,
        found: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("square root of negative number {operand}")]
    NegativeSqrt { operand: f64 },
    #[error("invalid expression: {remaining} values left on the stack")]
    InvalidExpression { remaining: usize },
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotEnoughOperands { .. } => ErrorKind::Arity,
            Self::DivisionByZero | Self::NegativeSqrt { .. } => ErrorKind::Domain,
            Self::InvalidExpression { .. } => ErrorKind::ResultCardinality,
        }
    }

    /// Domain errors depend on the value of `x`; every other error is a
    /// property of the expression itself.
    pub fn is_domain(&self) -> bool {
        self.kind() == ErrorKind::Domain
    }
}

/// Rejected [`SampleRange`](crate::SampleRange) configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("sample bounds must be finite")]
    NonFiniteBound,
    #[error("sample step must be positive and finite")]
    InvalidStep,
    #[error("sample range end lies before its start")]
    Reversed,
    #[error("{count} samples requested, at most {max} allowed")]
    TooManySamples { count: u64, max: u64 },
}

/// Any error produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Eval(e) => e.kind(),
            Self::Range(_) => ErrorKind::Range,
        }
    }
}
