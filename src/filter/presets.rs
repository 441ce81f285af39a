//! Legacy tabulated Butterworth coefficient sets.
//!
//! These order-2 tables were exported from a MATLAB `butter` design at a
//! fixed set of sample rates and rounded to 5 decimals. They are kept for
//! backward compatibility with deployments that tuned against the
//! tabulated response; new code should prefer the closed-form derivation
//! in [`design`](crate::filter::design).
//!
//! The bandstop entry is a 49.5-50.5 Hz mains notch at every sample rate.

use crate::error::{FilterError, Result};
use crate::filter::DirectFormI;
use serde::{Deserialize, Serialize};

/// Which tabulated response to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetKind {
    /// Lowpass (cutoff depends on the sample rate, see table comments)
    LowPass,
    /// Highpass with sub-Hz cutoff (DC/baseline drift removal)
    HighPass,
    /// Bandpass spanning the highpass and lowpass cutoffs
    BandPass,
    /// 49.5-50.5 Hz mains interference stop band
    BandStop,
}

struct PresetTable {
    sample_rate: u32,
    // (b, a) per kind, already normalized to a[0] == 1
    lowpass: ([f32; 3], [f32; 3]),
    highpass: ([f32; 3], [f32; 3]),
    bandpass: ([f32; 3], [f32; 3]),
    bandstop: ([f32; 3], [f32; 3]),
}

// fs = 250: lowpass 100 Hz, highpass 0.5 Hz, bandpass 0.5-100 Hz
// fs = 500: lowpass 200 Hz, highpass 1 Hz, bandpass 1-200 Hz
// fs = 1000: lowpass 300 Hz, highpass 1 Hz, bandpass 1-300 Hz
// fs = 2000: lowpass 300 Hz, highpass 1 Hz, bandpass 1-300 Hz
const PRESETS: &[PresetTable] = &[
    PresetTable {
        sample_rate: 250,
        lowpass: (
            [0.63895, 1.27789, 0.63895],
            [1.00000, 1.14298, 0.41280],
        ),
        highpass: (
            [0.99115, -1.98231, 0.99115],
            [1.00000, -1.98223, 0.98239],
        ),
        bandpass: (
            [0.75082, 0.00000, -0.75082],
            [1.00000, -0.47945, -0.50164],
        ),
        bandstop: (
            [0.98759, -0.61041, 0.98759],
            [1.00000, -0.61041, 0.97518],
        ),
    },
    PresetTable {
        sample_rate: 500,
        lowpass: (
            [0.63895, 1.27789, 0.63895],
            [1.00000, 1.14298, 0.41280],
        ),
        highpass: (
            [0.99115, -1.98231, 0.99115],
            [1.00000, -1.98223, 0.98239],
        ),
        bandpass: (
            [0.75082, 0.00000, -0.75082],
            [1.00000, -0.47945, -0.50164],
        ),
        bandstop: (
            [0.99376, -1.60796, 0.99376],
            [1.00000, -1.60796, 0.98751],
        ),
    },
    PresetTable {
        sample_rate: 1000,
        lowpass: (
            [0.39134, 0.78267, 0.39134],
            [1.00000, 0.36953, 0.19582],
        ),
        highpass: (
            [0.99557, -1.99113, 0.99557],
            [1.00000, -1.99111, 0.99115],
        ),
        bandpass: (
            [0.57758, 0.00000, -0.57758],
            [1.00000, -0.83756, -0.15517],
        ),
        bandstop: (
            [0.99687, -1.89617, 0.99687],
            [1.00000, -1.89617, 0.99374],
        ),
    },
    PresetTable {
        sample_rate: 2000,
        lowpass: (
            [0.13111, 0.26221, 0.13111],
            [1.00000, -0.74779, 0.27221],
        ),
        highpass: (
            [0.99778, -1.99556, 0.99778],
            [1.00000, -1.99556, 0.99557],
        ),
        bandpass: (
            [0.33667, 0.00000, -0.33667],
            [1.00000, -1.32454, 0.32666],
        ),
        bandstop: (
            [0.99843, -1.97228, 0.99843],
            [1.00000, -1.97228, 0.99686],
        ),
    },
];

/// Sample rates with tabulated coefficients available
pub fn supported_sample_rates() -> impl Iterator<Item = u32> {
    PRESETS.iter().map(|t| t.sample_rate)
}

/// Load a tabulated filter for the given sample rate.
///
/// # Errors
/// Returns `Config` if no table exists for `sample_rate`.
pub fn tabulated(sample_rate: u32, kind: PresetKind) -> Result<DirectFormI> {
    let table = PRESETS
        .iter()
        .find(|t| t.sample_rate == sample_rate)
        .ok_or_else(|| {
            FilterError::Config(format!(
                "no tabulated coefficients for fs = {} Hz (available: {:?})",
                sample_rate,
                supported_sample_rates().collect::<Vec<_>>()
            ))
        })?;

    let (b, a) = match kind {
        PresetKind::LowPass => &table.lowpass,
        PresetKind::HighPass => &table.highpass,
        PresetKind::BandPass => &table.bandpass,
        PresetKind::BandStop => &table.bandstop,
    };
    DirectFormI::from_coefficients(b, a)
}
