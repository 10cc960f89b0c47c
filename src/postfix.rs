use std::fmt;

use crate::lexer::Symbol;
use crate::operator::Operator;
use crate::parse::Node;

/// An expression in reverse-Polish order, ready for stack evaluation.
///
/// Immutable once built, so one sequence can be evaluated for many values of
/// `x`, from many threads at once.
#[derive(Clone, Debug, PartialEq)]
pub struct Postfix<Real> {
    pub(crate) symbols: Vec<Symbol<Real>>,
}

impl<Real: Copy> Postfix<Real> {
    /// Converts the children of a group with the shunting-yard algorithm.
    ///
    /// Nested groups are converted first and emitted whole, so nothing outside
    /// a group competes for precedence with what is inside it. Equal ranks are
    /// popped before pushing, making every operator left-associative.
    pub fn from_group(children: &[Node<Real>]) -> Self {
        let mut symbols = Vec::new();
        convert_group(children, &mut symbols);
        Self { symbols }
    }
}

impl<Real> Postfix<Real> {
    pub fn symbols(&self) -> &[Symbol<Real>] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn convert_group<Real: Copy>(children: &[Node<Real>], output: &mut Vec<Symbol<Real>>) {
    let mut operators: Vec<Operator> = Vec::new();
    for child in children {
        match child {
            Node::Group(inner) => convert_group(inner, output),
            Node::Leaf(Symbol::Operator(op)) => {
                while let Some(&top) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Symbol::Operator(top));
                    operators.pop();
                }
                operators.push(*op);
            }
            Node::Leaf(operand) => output.push(*operand),
        }
    }
    output.extend(operators.into_iter().rev().map(Symbol::Operator));
}

impl<Real: fmt::Display> fmt::Display for Postfix<Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parse::parse_tokens;

    fn postfix(input: &str) -> String {
        let tokens = tokenize(input).unwrap();
        let root = parse_tokens::<f64>(&tokens).unwrap();
        Postfix::from_group(&root).to_string()
    }

    #[test]
    fn multiplication_before_addition() {
        assert_eq!(postfix("2 + 3 * 4"), "2 3 4 * +");
        assert_eq!(postfix("2 * 3 + 4"), "2 3 * 4 +");
    }

    #[test]
    fn equal_ranks_are_left_associative() {
        assert_eq!(postfix("8 - 4 - 2"), "8 4 - 2 -");
        assert_eq!(postfix("8 / 4 * 3"), "8 4 / 3 *");
        assert_eq!(postfix("4 ^ 3 ^ 2"), "4 3 ^ 2 ^");
    }

    #[test]
    fn groups_are_resolved_first() {
        assert_eq!(postfix("( 2 * ( 3 + 4 ) )"), "2 3 4 + *");
        assert_eq!(postfix("( 1 + 2 ) * ( 3 - x )"), "1 2 + 3 x - *");
    }

    #[test]
    fn functions_sit_between_product_and_power() {
        assert_eq!(postfix("sqrt ( x ^ 2 )"), "x 2 ^ sqrt");
        assert_eq!(postfix("sin x ^ 2"), "x 2 ^ sin");
        assert_eq!(postfix("sin x * 2"), "x sin 2 *");
        assert_eq!(postfix("2 * cos x"), "2 x cos *");
    }

    #[test]
    fn mixed_expression() {
        assert_eq!(
            postfix("(2 * sqrt(x ^ 2) + 3 * sin(x))"),
            "2 x 2 ^ sqrt * 3 x sin * +"
        );
    }
}
