//! Direct-form-I biquad with explicit input/output delay lines.

use crate::constants::STABILITY_LIMIT;
use crate::error::{FilterError, Result};
use crate::filter::Filter;
use crate::filter::design::{self, Coefficients, FilterClass, Passband};

/// A second-order IIR filter section with caller-owned state.
///
/// Holds the normalized coefficient triples plus most-recent-first history
/// of the last inputs (`x`) and outputs (`y`). Each call to [`process`]
/// consumes one sample, advances both delay lines once, and returns one
/// output sample (1:1 cardinality, no internal buffering).
///
/// A `Biquad` is plain mutable state: distinct instances may be driven
/// from distinct threads, but a single instance must only ever be touched
/// by one caller at a time. There is no internal locking.
///
/// [`process`]: Biquad::process
#[derive(Debug, Clone)]
pub struct Biquad {
    class: FilterClass,
    sample_rate: f32,
    passband: Passband,
    q: f32,
    coefficients: Coefficients,
    /// Input history, most recent first: x[n], x[n-1], x[n-2]
    x: [f32; 3],
    /// Output history, most recent first: y[n], y[n-1], y[n-2]
    y: [f32; 3],
}

impl Biquad {
    /// Create a filter of the given class with freshly derived
    /// coefficients and zeroed history.
    ///
    /// # Errors
    /// Rejects non-positive sample rates, cutoffs outside `(0, fs/2)`,
    /// inverted band edges, and passband shapes that do not match the
    /// class (see [`design::derive`]).
    pub fn new(class: FilterClass, sample_rate: f32, passband: Passband) -> Result<Self> {
        let design = design::derive(class, sample_rate, passband)?;
        Ok(Self {
            class,
            sample_rate,
            passband,
            q: design.q,
            coefficients: design.coefficients,
            x: [0.0; 3],
            y: [0.0; 3],
        })
    }

    /// Notch filter rejecting a narrow band around `notch_hz`
    pub fn notch(sample_rate: f32, notch_hz: f32) -> Result<Self> {
        Self::new(FilterClass::Notch, sample_rate, Passband::Single(notch_hz))
    }

    /// Lowpass filter with cutoff `cutoff_hz`
    pub fn lowpass(sample_rate: f32, cutoff_hz: f32) -> Result<Self> {
        Self::new(
            FilterClass::LowPass,
            sample_rate,
            Passband::Single(cutoff_hz),
        )
    }

    /// Highpass filter with cutoff `cutoff_hz`
    pub fn highpass(sample_rate: f32, cutoff_hz: f32) -> Result<Self> {
        Self::new(
            FilterClass::HighPass,
            sample_rate,
            Passband::Single(cutoff_hz),
        )
    }

    /// Bandpass filter passing `low_hz..high_hz`
    pub fn bandpass(sample_rate: f32, low_hz: f32, high_hz: f32) -> Result<Self> {
        Self::new(
            FilterClass::BandPass,
            sample_rate,
            Passband::Band {
                low: low_hz,
                high: high_hz,
            },
        )
    }

    /// Bandstop filter rejecting `low_hz..high_hz`
    pub fn bandstop(sample_rate: f32, low_hz: f32, high_hz: f32) -> Result<Self> {
        Self::new(
            FilterClass::BandStop,
            sample_rate,
            Passband::Band {
                low: low_hz,
                high: high_hz,
            },
        )
    }

    /// Process one sample and return the filtered output.
    ///
    /// Evaluates the direct-form-I recurrence
    /// `y[0] = b[0]x[0] + b[1]x[1] + b[2]x[2] - a[1]y[1] - a[2]y[2]`
    /// against the pre-shift history, then advances both delay lines.
    pub fn process(&mut self, input: f32) -> f32 {
        let b = &self.coefficients.b;
        let a = &self.coefficients.a;

        self.x[0] = input;
        self.y[0] = b[0] * self.x[0] + b[1] * self.x[1] + b[2] * self.x[2]
            - a[1] * self.y[1]
            - a[2] * self.y[2];

        self.x[2] = self.x[1];
        self.x[1] = self.x[0];
        self.y[2] = self.y[1];
        self.y[1] = self.y[0];

        self.y[0]
    }

    /// Process one sample, surfacing numeric instability.
    ///
    /// # Errors
    /// Returns `UnstableOutput` once the output goes non-finite or its
    /// magnitude exceeds [`STABILITY_LIMIT`]. The history has already
    /// advanced by then; callers should [`reset`](Biquad::reset) or
    /// rebuild the instance rather than continue feeding it.
    pub fn try_process(&mut self, input: f32) -> Result<f32> {
        let output = self.process(input);
        if !output.is_finite() || output.abs() > STABILITY_LIMIT {
            return Err(FilterError::UnstableOutput(output));
        }
        Ok(output)
    }

    /// Re-derive coefficients in place and zero the history.
    ///
    /// This is the only runtime reconfiguration path. On error the filter
    /// is left unchanged.
    pub fn redesign(&mut self, sample_rate: f32, passband: Passband) -> Result<()> {
        let design = design::derive(self.class, sample_rate, passband)?;
        self.sample_rate = sample_rate;
        self.passband = passband;
        self.q = design.q;
        self.coefficients = design.coefficients;
        self.reset();
        Ok(())
    }

    /// Zero both delay lines, keeping coefficients.
    pub fn reset(&mut self) {
        self.x = [0.0; 3];
        self.y = [0.0; 3];
    }

    pub fn class(&self) -> FilterClass {
        self.class
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn passband(&self) -> Passband {
        self.passband
    }

    /// Quality factor used for the current design
    pub fn q(&self) -> f32 {
        self.q
    }

    /// Normalized coefficient triples (`a[0]` is exactly 1)
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }
}

impl Filter for Biquad {
    fn process(&mut self, sample: f32) -> f32 {
        Biquad::process(self, sample)
    }
}
