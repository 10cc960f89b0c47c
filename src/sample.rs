use crate::error::{EvalError, RangeError};
#[cfg(not(feature = "rayon"))]
use crate::evaluate::Registers;
use crate::postfix::Postfix;
use crate::FloatExt;

use bitvec::vec::BitVec;
use log::debug;

#[cfg(feature = "rayon")]
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

/// Upper bound on the number of points a single [`SampleRange`] may produce.
pub const MAX_SAMPLES: u64 = 10_000_000;

/// Evenly spaced `x` values on which to evaluate an expression.
///
/// Points are `i * step` for every integer `i` from `trunc(start / step)` up
/// to, but excluding, `trunc(end / step)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRange<Real> {
    start: Real,
    end: Real,
    step: Real,
    first: i64,
    last: i64,
}

impl<Real: FloatExt> SampleRange<Real> {
    pub fn new(start: Real, end: Real, step: Real) -> Result<Self, RangeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RangeError::NonFiniteBound);
        }
        if !step.is_finite() || step <= Real::zero() {
            return Err(RangeError::InvalidStep);
        }
        if end < start {
            return Err(RangeError::Reversed);
        }
        let too_many = |count| RangeError::TooManySamples {
            count,
            max: MAX_SAMPLES,
        };
        let first = (start / step).trunc().to_i64().ok_or(too_many(u64::MAX))?;
        let last = (end / step).trunc().to_i64().ok_or(too_many(u64::MAX))?;
        let count = last.abs_diff(first);
        if count > MAX_SAMPLES {
            return Err(too_many(count));
        }
        Ok(Self {
            start,
            end,
            step,
            first,
            last,
        })
    }

    pub fn start(&self) -> Real {
        self.start
    }

    pub fn end(&self) -> Real {
        self.end
    }

    pub fn step(&self) -> Real {
        self.step
    }

    pub fn len(&self) -> usize {
        (self.last - self.first) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.last == self.first
    }

    /// The sample points, in increasing order.
    pub fn xs(&self) -> Vec<Real> {
        (self.first..self.last)
            .map(|i| Real::from(i).unwrap_or_else(Real::nan) * self.step)
            .collect()
    }
}

impl<Real: FloatExt> Default for SampleRange<Real> {
    /// `[-10, 10)` in steps of `0.1`.
    fn default() -> Self {
        let cast = |value: f64| Real::from(value).unwrap_or_else(Real::nan);
        Self {
            start: cast(-10.0),
            end: cast(10.0),
            step: cast(0.1),
            first: -100,
            last: 100,
        }
    }
}

/// The result of evaluating an expression over a [`SampleRange`].
///
/// Points where the expression is undefined (division by zero, square root of
/// a negative number) have their `defined` bit cleared and a NaN `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct Samples<Real> {
    pub xs: Vec<Real>,
    pub ys: Vec<Real>,
    pub defined: BitVec,
}

impl<Real: FloatExt> Samples<Real> {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// `(x, y)` pairs of the defined samples, in order.
    pub fn points(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.defined
            .iter_ones()
            .map(move |i| (self.xs[i], self.ys[i]))
    }

    pub fn num_defined(&self) -> usize {
        self.defined.count_ones()
    }
}

impl<Real: FloatExt> Postfix<Real> {
    /// Evaluates the sequence at every point of `range`.
    ///
    /// Domain errors only mark the affected sample as undefined. Any other
    /// error does not depend on `x` and is returned as is.
    pub fn sample(&self, range: &SampleRange<Real>) -> Result<Samples<Real>, EvalError> {
        let xs = range.xs();

        #[cfg(feature = "rayon")]
        let results: Vec<_> = xs.par_iter().map(|x| self.evaluate(*x)).collect();
        #[cfg(not(feature = "rayon"))]
        let results: Vec<_> = {
            let mut registers = Registers::with_capacity(self.len());
            xs.iter()
                .map(|x| self.evaluate_in(*x, &mut registers))
                .collect()
        };

        let mut ys = Vec::with_capacity(xs.len());
        let mut defined = BitVec::with_capacity(xs.len());
        for result in results {
            match result {
                Ok(y) => {
                    ys.push(y);
                    defined.push(true);
                }
                Err(e) if e.is_domain() => {
                    ys.push(Real::nan());
                    defined.push(false);
                }
                Err(e) => return Err(e),
            }
        }
        let samples = Samples { xs, ys, defined };
        debug!(
            "sampled {} points, {} defined",
            samples.len(),
            samples.num_defined()
        );
        Ok(samples)
    }
}
