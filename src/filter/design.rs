//! Closed-form biquad coefficient derivation.
//!
//! All five filter classes share the same denominator and the same
//! `w0`/`alpha` parametrization (RBJ audio EQ cookbook); only the
//! numerator formula and the quality factor differ by class:
//!
//! ```text
//! w0    = 2*pi*f / fs
//! alpha = sin(w0) / (2*Q)
//! a     = [1 + alpha, -2*cos(w0), 1 - alpha]
//! ```
//!
//! Derivation runs in f64 and the normalized result is stored as f32, so
//! coefficients agree with legacy double-precision tabulated sets at the
//! 5-decimal level while the per-sample recurrence stays single precision.

use crate::constants::{BUTTERWORTH_Q, NOTCH_Q};
use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Filter class selector
///
/// Fixed at construction; determines the numerator formula and the
/// quality factor used during derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterClass {
    /// Reject a narrow band around one frequency (Q = 30)
    Notch,
    /// Pass frequencies below the cutoff (Q = 1/sqrt(2))
    LowPass,
    /// Pass frequencies above the cutoff (Q = 1/sqrt(2))
    HighPass,
    /// Pass frequencies between the two cutoffs (Q = center/bandwidth)
    BandPass,
    /// Reject frequencies between the two cutoffs (Q = center/bandwidth)
    BandStop,
}

impl FilterClass {
    /// Whether this class takes a low/high cutoff pair rather than a
    /// single frequency parameter.
    pub fn is_band(&self) -> bool {
        matches!(self, FilterClass::BandPass | FilterClass::BandStop)
    }
}

impl fmt::Display for FilterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterClass::Notch => "notch",
            FilterClass::LowPass => "low-pass",
            FilterClass::HighPass => "high-pass",
            FilterClass::BandPass => "band-pass",
            FilterClass::BandStop => "band-stop",
        };
        write!(f, "{}", name)
    }
}

/// Frequency parameters for a filter design
///
/// Notch/LowPass/HighPass take a single frequency; BandPass/BandStop take
/// a low/high cutoff pair.
///
/// # Parsing formats
/// - `50` or `50.0` - single frequency in Hz
/// - `1:200` - low/high cutoff pair in Hz
///
/// # Example
/// ```
/// use quell::filter::Passband;
///
/// let band: Passband = "49.5:50.5".parse().unwrap();
/// assert_eq!(band, Passband::Band { low: 49.5, high: 50.5 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Passband {
    /// Notch center frequency or lowpass/highpass cutoff (Hz)
    Single(f32),
    /// Band edges for bandpass/bandstop (Hz)
    Band { low: f32, high: f32 },
}

impl fmt::Display for Passband {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Passband::Single(hz) => write!(f, "{}hz", hz),
            Passband::Band { low, high } => write!(f, "{}:{}hz", low, high),
        }
    }
}

impl FromStr for Passband {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_suffix("hz")
            .or_else(|| s.strip_suffix("Hz"))
            .unwrap_or(s);

        if let Some((low, high)) = s.split_once(':') {
            let low: f32 = low
                .trim()
                .parse()
                .map_err(|_| format!("invalid low cutoff: {}", low))?;
            let high: f32 = high
                .trim()
                .parse()
                .map_err(|_| format!("invalid high cutoff: {}", high))?;
            return Ok(Passband::Band { low, high });
        }

        let hz: f32 = s.parse().map_err(|_| format!("invalid frequency: {}", s))?;
        Ok(Passband::Single(hz))
    }
}

/// Normalized biquad coefficient triples.
///
/// `a[0]` is always exactly 1 after derivation; the recurrence is
/// `y[0] = b[0]x[0] + b[1]x[1] + b[2]x[2] - a[1]y[1] - a[2]y[2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub b: [f32; 3],
    pub a: [f32; 3],
}

/// Result of a coefficient derivation: the normalized triples plus the
/// quality factor actually used (constant or computed from the band).
#[derive(Debug, Clone, Copy)]
pub struct Design {
    pub coefficients: Coefficients,
    pub q: f32,
}

fn validate_cutoff(cutoff_hz: f32, sample_rate: f32) -> Result<()> {
    let nyquist_hz = sample_rate / 2.0;
    // Written so that a NaN cutoff also fails
    if !(cutoff_hz > 0.0 && cutoff_hz < nyquist_hz) {
        return Err(FilterError::CutoffOutOfRange {
            cutoff_hz,
            nyquist_hz,
            sample_rate,
        });
    }
    Ok(())
}

/// Derive normalized biquad coefficients for the given class.
///
/// # Errors
/// - `InvalidSampleRate` if `sample_rate <= 0` (or non-finite)
/// - `CutoffOutOfRange` if any frequency lies outside `(0, fs/2)`
/// - `InvertedBand` if `low >= high` for a band class
/// - `Config` if the passband shape does not match the class
pub fn derive(class: FilterClass, sample_rate: f32, passband: Passband) -> Result<Design> {
    if !(sample_rate > 0.0) || !sample_rate.is_finite() {
        return Err(FilterError::InvalidSampleRate(sample_rate));
    }

    // Resolve the design frequency and quality factor per class.
    let (freq, q) = match (class, passband) {
        (FilterClass::Notch, Passband::Single(hz)) => {
            validate_cutoff(hz, sample_rate)?;
            (hz as f64, NOTCH_Q)
        }
        (FilterClass::LowPass | FilterClass::HighPass, Passband::Single(hz)) => {
            validate_cutoff(hz, sample_rate)?;
            (hz as f64, BUTTERWORTH_Q)
        }
        (FilterClass::BandPass | FilterClass::BandStop, Passband::Band { low, high }) => {
            validate_cutoff(low, sample_rate)?;
            validate_cutoff(high, sample_rate)?;
            if low >= high {
                return Err(FilterError::InvertedBand {
                    low_hz: low,
                    high_hz: high,
                });
            }
            let center = (f64::from(low) * f64::from(high)).sqrt();
            let bandwidth = f64::from(high) - f64::from(low);
            (center, center / bandwidth)
        }
        (class, passband) => {
            return Err(FilterError::Config(format!(
                "{} filter expects {}, got {}",
                class,
                if class.is_band() {
                    "a low:high cutoff pair"
                } else {
                    "a single frequency"
                },
                passband,
            )));
        }
    };

    let w0 = 2.0 * PI * freq / f64::from(sample_rate);
    let alpha = w0.sin() / (2.0 * q);
    let cos_w0 = w0.cos();

    let b = match class {
        FilterClass::Notch | FilterClass::BandStop => [1.0, -2.0 * cos_w0, 1.0],
        FilterClass::LowPass => [(1.0 - cos_w0) / 2.0, 1.0 - cos_w0, (1.0 - cos_w0) / 2.0],
        FilterClass::HighPass => [(1.0 + cos_w0) / 2.0, -1.0 - cos_w0, (1.0 + cos_w0) / 2.0],
        FilterClass::BandPass => [alpha, 0.0, -alpha],
    };
    let a = [1.0 + alpha, -2.0 * cos_w0, 1.0 - alpha];

    // Normalize so the stored leading denominator term is exactly 1.
    let a0 = a[0];
    let coefficients = Coefficients {
        b: [
            (b[0] / a0) as f32,
            (b[1] / a0) as f32,
            (b[2] / a0) as f32,
        ],
        a: [1.0, (a[1] / a0) as f32, (a[2] / a0) as f32],
    };

    Ok(Design {
        coefficients,
        q: q as f32,
    })
}
