//! Arbitrary-order direct-form-I runner for externally supplied
//! coefficient tables (e.g. exported from a MATLAB `butter` design).
//!
//! The closed-form derivation in [`design`](crate::filter::design) only
//! produces order-2 sections; this runner generalizes the same recurrence
//! to order N by sizing the delay lines to the table length.

use crate::constants::{MIN_LEADING_COEFFICIENT, STABILITY_LIMIT};
use crate::error::{FilterError, Result};
use crate::filter::Filter;

/// IIR filter of runtime-determined order with separate input/output
/// delay lines.
///
/// `a[0] * y[n] = b[0]x[n] + ... + b[N]x[n-N] - a[1]y[n-1] - ... - a[N]y[n-N]`
///
/// Coefficients are normalized by `a[0]` at construction, so the stored
/// leading denominator term is exactly 1.
#[derive(Debug, Clone)]
pub struct DirectFormI {
    b: Vec<f32>,
    a: Vec<f32>,
    /// Input history, most recent first; x[0] is the current sample
    x: Vec<f32>,
    /// Output history, most recent first; y[0] is the current output
    y: Vec<f32>,
}

impl DirectFormI {
    /// Build a filter from numerator (`b`) and denominator (`a`) tables.
    ///
    /// Both tables must have the same length `order + 1`, with at least
    /// two entries (order >= 1), finite values, and a non-negligible
    /// leading denominator term.
    ///
    /// # Errors
    /// Returns `InvalidCoefficients` when the tables violate any of the
    /// above.
    pub fn from_coefficients(b: &[f32], a: &[f32]) -> Result<Self> {
        if b.len() != a.len() {
            return Err(FilterError::InvalidCoefficients(format!(
                "numerator has {} entries, denominator {}",
                b.len(),
                a.len()
            )));
        }
        if b.len() < 2 {
            return Err(FilterError::InvalidCoefficients(
                "need at least order 1 (two entries per table)".to_string(),
            ));
        }
        if b.iter().chain(a.iter()).any(|v| !v.is_finite()) {
            return Err(FilterError::InvalidCoefficients(
                "non-finite coefficient".to_string(),
            ));
        }
        let a0 = a[0];
        if a0.abs() < MIN_LEADING_COEFFICIENT {
            return Err(FilterError::InvalidCoefficients(format!(
                "leading denominator coefficient {} too close to zero",
                a0
            )));
        }

        let b: Vec<f32> = b.iter().map(|v| v / a0).collect();
        let mut a: Vec<f32> = a.iter().map(|v| v / a0).collect();
        a[0] = 1.0;

        let len = b.len();
        Ok(Self {
            b,
            a,
            x: vec![0.0; len],
            y: vec![0.0; len],
        })
    }

    /// Filter order (table length minus one)
    pub fn order(&self) -> usize {
        self.b.len() - 1
    }

    /// Process one sample and return the filtered output.
    pub fn process(&mut self, input: f32) -> f32 {
        let order = self.order();

        // Numerator and denominator sums over the pre-shift history.
        let mut sum_num = self.b[0] * input;
        let mut sum_den = 0.0f32;
        for i in 1..=order {
            sum_num += self.b[i] * self.x[i];
            sum_den += self.a[i] * self.y[i];
        }
        self.y[0] = sum_num - sum_den;

        self.x[0] = input;
        for i in (1..=order).rev() {
            self.x[i] = self.x[i - 1];
            self.y[i] = self.y[i - 1];
        }

        self.y[0]
    }

    /// Process one sample, surfacing numeric instability (see
    /// [`Biquad::try_process`](crate::filter::Biquad::try_process)).
    pub fn try_process(&mut self, input: f32) -> Result<f32> {
        let output = self.process(input);
        if !output.is_finite() || output.abs() > STABILITY_LIMIT {
            return Err(FilterError::UnstableOutput(output));
        }
        Ok(output)
    }

    /// Zero both delay lines, keeping coefficients.
    pub fn reset(&mut self) {
        self.x.fill(0.0);
        self.y.fill(0.0);
    }

    /// Normalized numerator table
    pub fn numerator(&self) -> &[f32] {
        &self.b
    }

    /// Normalized denominator table (`[0]` is exactly 1)
    pub fn denominator(&self) -> &[f32] {
        &self.a
    }
}

impl Filter for DirectFormI {
    fn process(&mut self, sample: f32) -> f32 {
        DirectFormI::process(self, sample)
    }
}
