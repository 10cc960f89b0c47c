use crate::error::EvalError;
use crate::lexer::Symbol;
use crate::operator::Operator;
use crate::postfix::Postfix;
use crate::FloatExt;

/// Scratch space for calculations. Can be reused across evaluations to avoid
/// reallocating the value stack in tight sampling loops.
#[derive(Clone, Debug, Default)]
pub struct Registers<Real> {
    stack: Vec<Real>,
}

impl<Real> Registers<Real> {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Sized for sequences of up to `len` symbols, which never push more than
    /// `len` values.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            stack: Vec::with_capacity(len),
        }
    }
}

impl<Real: FloatExt> Postfix<Real> {
    /// Evaluates the sequence with the variable bound to `x`.
    pub fn evaluate(&self, x: Real) -> Result<Real, EvalError> {
        self.evaluate_in(x, &mut Registers::with_capacity(self.len()))
    }

    /// Like [`Postfix::evaluate`], reusing the stack held by `registers`.
    pub fn evaluate_in(&self, x: Real, registers: &mut Registers<Real>) -> Result<Real, EvalError> {
        let stack = &mut registers.stack;
        stack.clear();
        for symbol in &self.symbols {
            match *symbol {
                Symbol::Number(value) => stack.push(value),
                Symbol::Variable => stack.push(x),
                Symbol::Operator(op) => {
                    let value = apply(op, stack)?;
                    stack.push(value);
                }
            }
        }
        match stack.as_slice() {
            [value] => Ok(*value),
            rest => Err(EvalError::InvalidExpression {
                remaining: rest.len(),
            }),
        }
    }
}

fn apply<Real: FloatExt>(op: Operator, stack: &mut Vec<Real>) -> Result<Real, EvalError> {
    match op {
        Operator::Add => binary_op(|lhs, rhs| Ok(lhs + rhs), op, stack),
        Operator::Sub => binary_op(|lhs, rhs| Ok(lhs - rhs), op, stack),
        Operator::Mul => binary_op(|lhs, rhs| Ok(lhs * rhs), op, stack),
        Operator::Div => binary_op(
            |lhs, rhs| {
                if rhs.is_zero() {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(lhs / rhs)
                }
            },
            op,
            stack,
        ),
        // Zero to a negative power is a division by zero. A negative base with a
        // fractional exponent is NaN, as `powf` defines.
        Operator::Pow => binary_op(
            |lhs, rhs| {
                if lhs.is_zero() && rhs < Real::zero() {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(lhs.powf(rhs))
                }
            },
            op,
            stack,
        ),
        Operator::Sin => unary_op(|only| Ok(only.sin()), op, stack),
        Operator::Cos => unary_op(|only| Ok(only.cos()), op, stack),
        Operator::Tan => unary_op(|only| Ok(only.tan()), op, stack),
        Operator::Sqrt => unary_op(
            |only| {
                if only < Real::zero() {
                    Err(EvalError::NegativeSqrt {
                        operand: only.to_f64().unwrap_or(f64::NAN),
                    })
                } else {
                    Ok(only.sqrt())
                }
            },
            op,
            stack,
        ),
    }
}

fn binary_op<Real: FloatExt>(
    eval: fn(Real, Real) -> Result<Real, EvalError>,
    op: Operator,
    stack: &mut Vec<Real>,
) -> Result<Real, EvalError> {
    let [lhs, rhs] = pop_operands::<Real, 2>(op, stack)?;
    eval(lhs, rhs)
}

fn unary_op<Real: FloatExt>(
    eval: fn(Real) -> Result<Real, EvalError>,
    op: Operator,
    stack: &mut Vec<Real>,
) -> Result<Real, EvalError> {
    let [only] = pop_operands::<Real, 1>(op, stack)?;
    eval(only)
}

/// Removes the top `N` values, returned in push order so the left operand
/// comes first.
fn pop_operands<Real: FloatExt, const N: usize>(
    op: Operator,
    stack: &mut Vec<Real>,
) -> Result<[Real; N], EvalError> {
    let required = op.arity().operands();
    debug_assert_eq!(required, N, "`{op}` dispatched with the wrong arity");
    if stack.len() < required {
        return Err(EvalError::NotEnoughOperands {
            operator: op,
            required,
            found: stack.len(),
        });
    }
    let start = stack.len() - N;
    let mut operands = [Real::zero(); N];
    operands.copy_from_slice(&stack[start..]);
    stack.truncate(start);
    Ok(operands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parse::parse_tokens;
    use crate::ErrorKind;

    fn compile(input: &str) -> Postfix<f64> {
        let tokens = tokenize(input).unwrap();
        Postfix::from_group(&parse_tokens(&tokens).unwrap())
    }

    fn eval(input: &str, x: f64) -> Result<f64, EvalError> {
        compile(input).evaluate(x)
    }

    #[test]
    fn op_precedence() {
        assert_eq!(eval("2 + 3 * 4", 0.0), Ok(14.0));
        assert_eq!(eval("1 * 2 + 3 * 4", 0.0), Ok(14.0));
        assert_eq!(eval("8 / 4 * 3", 0.0), Ok(6.0));
        assert_eq!(eval("10 - 4 - 3", 0.0), Ok(3.0));
        assert_eq!(eval("4 ^ 3 ^ 2", 0.0), Ok(4096.0));
    }

    #[test]
    fn operand_order_is_preserved() {
        assert_eq!(eval("x - 1", 5.0), Ok(4.0));
        assert_eq!(eval("1 / x", 4.0), Ok(0.25));
        assert_eq!(eval("x ^ 3", 2.0), Ok(8.0));
    }

    #[test]
    fn functions() {
        assert_eq!(eval("sqrt ( x ^ 2 )", -3.0), Ok(3.0));
        assert_eq!(eval("sin x", 0.0), Ok(0.0));
        assert_eq!(eval("cos x", 0.0), Ok(1.0));
        assert_eq!(eval("tan 0", 0.0), Ok(0.0));
        let y = eval("sin x * 2", std::f64::consts::FRAC_PI_2).unwrap();
        assert!((y - 2.0).abs() < 1e-12, "{y}");
    }

    #[test]
    fn nested_groups() {
        for x in [-2.0, 0.0, 7.5] {
            assert_eq!(eval("( 2 * ( 3 + 4 ) )", x), Ok(14.0));
        }
    }

    #[test]
    fn division_by_zero() {
        for x in [-1.0, 0.0, 3.0] {
            let err = eval("( 1 / ( x - x ) )", x).unwrap_err();
            assert_eq!(err, EvalError::DivisionByZero);
            assert_eq!(err.kind(), ErrorKind::Domain);
        }
        assert_eq!(eval("1 / x", -0.0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn negative_sqrt() {
        let err = eval("sqrt ( 0 - 1 )", 0.0).unwrap_err();
        assert_eq!(err, EvalError::NegativeSqrt { operand: -1.0 });
        assert!(err.is_domain());
        assert_eq!(eval("sqrt x", -0.0), Ok(0.0));
    }

    #[test]
    fn negative_base_fractional_power_is_nan() {
        assert!(eval("x ^ 0.5", -4.0).unwrap().is_nan());
    }

    #[test]
    fn zero_to_negative_power() {
        assert_eq!(eval("0 ^ ( 0 - 1 )", 0.0), Err(EvalError::DivisionByZero));
        assert_eq!(eval("x ^ ( 0 - 0.5 )", -0.0), Err(EvalError::DivisionByZero));
        assert_eq!(eval("0 ^ 0", 0.0), Ok(1.0));
        assert_eq!(eval("0 ^ 2", 0.0), Ok(0.0));
        assert_eq!(eval("x ^ ( 0 - 1 )", 2.0), Ok(0.5));
    }

    #[test]
    fn dispatch_agrees_with_operator_table() {
        for op in Operator::ALL {
            let required = op.arity().operands();
            let err = apply(op, &mut vec![1.0; required - 1]).unwrap_err();
            assert_eq!(
                err,
                EvalError::NotEnoughOperands {
                    operator: op,
                    required,
                    found: required - 1
                }
            );
            assert!(apply(op, &mut vec![1.0; required]).is_ok(), "{op}");
        }
    }

    #[test]
    fn not_enough_operands() {
        let err = eval("( 1 + )", 0.0).unwrap_err();
        assert_eq!(
            err,
            EvalError::NotEnoughOperands {
                operator: Operator::Add,
                required: 2,
                found: 1
            }
        );
        assert_eq!(err.kind(), ErrorKind::Arity);

        let err = eval("sqrt", 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);

        // `^` outranks `sin`, so it is emitted before its right operand.
        let err = eval("2 ^ sin x", 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
    }

    #[test]
    fn leftover_values() {
        let err = eval("1 2", 0.0).unwrap_err();
        assert_eq!(err, EvalError::InvalidExpression { remaining: 2 });
        assert_eq!(err.kind(), ErrorKind::ResultCardinality);

        let empty = Postfix::<f64> { symbols: vec![] };
        assert_eq!(
            empty.evaluate(0.0),
            Err(EvalError::InvalidExpression { remaining: 0 })
        );
    }

    #[test]
    fn registers_are_reusable() {
        let postfix = compile("(2 * sqrt(x ^ 2) + 3 * sin(x))");
        let mut registers = Registers::new();
        for x in [-1.0, 0.0, 4.0] {
            let reused = postfix.evaluate_in(x, &mut registers).unwrap();
            assert_eq!(reused.to_bits(), postfix.evaluate(x).unwrap().to_bits());
        }
        // A failed evaluation leaves garbage behind, which the next one clears.
        assert!(compile("1 2").evaluate_in(0.0, &mut registers).is_err());
        assert_eq!(postfix.evaluate_in(0.0, &mut registers), Ok(0.0));
    }
}
