use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Binary operators and unary functions understood by the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    // Binary.
    Add,
    Sub,
    Mul,
    Div,
    Pow,

    // Unary functions, radians for the trigonometric ones.
    Sin,
    Cos,
    Tan,
    Sqrt,
}

/// Number of operands an [`Operator`] takes from the evaluation stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub fn operands(self) -> usize {
        match self {
            Self::Unary => 1,
            Self::Binary => 2,
        }
    }
}

struct OperatorInfo {
    symbol: &'static str,
    precedence: u8,
    arity: Arity,
}

const fn info(symbol: &'static str, precedence: u8, arity: Arity) -> OperatorInfo {
    OperatorInfo {
        symbol,
        precedence,
        arity,
    }
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Pow,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sqrt,
    ];

    // Functions bind tighter than `*` and `/` but looser than `^`, so
    // `sin x ^ 2` is `sin (x ^ 2)` while `sin x * 2` is `(sin x) * 2`.
    fn info(self) -> OperatorInfo {
        use Arity::*;

        match self {
            Self::Add => info("+", 1, Binary),
            Self::Sub => info("-", 1, Binary),
            Self::Mul => info("*", 2, Binary),
            Self::Div => info("/", 2, Binary),
            Self::Sin => info("sin", 3, Unary),
            Self::Cos => info("cos", 3, Unary),
            Self::Tan => info("tan", 3, Unary),
            Self::Sqrt => info("sqrt", 3, Unary),
            Self::Pow => info("^", 4, Binary),
        }
    }

    /// Looks up the operator spelled exactly `symbol`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOL_TABLE.get(symbol).copied()
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    /// Rank used by the postfix converter. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        self.info().precedence
    }

    pub fn arity(self) -> Arity {
        self.info().arity
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

static SYMBOL_TABLE: Lazy<HashMap<&'static str, Operator>> =
    Lazy::new(|| Operator::ALL.iter().map(|op| (op.symbol(), *op)).collect());
