//! Compensated floating-point summation
//!
//! Neumaier's variant of Kahan summation. Running totals built from many
//! proportional shares stay within a few ulps of the exact sum whatever the
//! order the shares arrive in.

use std::iter::Sum;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn new(seed: f64) -> Self {
        Self {
            sum: seed,
            compensation: 0.0,
        }
    }

    pub fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl Sum<f64> for CompensatedSum {
    fn sum<I: Iterator<Item = f64>>(iter: I) -> Self {
        let mut total = Self::default();
        for value in iter {
            total.add(value);
        }
        total
    }
}

impl<'a> Sum<&'a f64> for CompensatedSum {
    fn sum<I: Iterator<Item = &'a f64>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
