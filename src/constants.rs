//! Numeric constants for filter stability and validation
//!
//! These constants define thresholds used by derivation-time validation
//! and by the runtime instability check in `try_process`.

/// Quality factor for the notch filter. Narrow band: rejects the notch
/// frequency while leaving neighbors nearly untouched.
pub const NOTCH_Q: f64 = 30.0;

/// Quality factor for lowpass/highpass sections. This is the Butterworth
/// 1/sqrt(2), kept at full precision so derived coefficients match the
/// legacy tabulated sets at 5 decimals.
pub const BUTTERWORTH_Q: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Output magnitude beyond which a filter is considered unstable.
/// Conditioned signals here are normalized audio/sensor samples, so any
/// output this large means the recurrence has diverged.
pub const STABILITY_LIMIT: f32 = 1.0e6;

/// Smallest leading denominator coefficient accepted for externally
/// supplied coefficient tables before normalization.
pub const MIN_LEADING_COEFFICIENT: f32 = 1.0e-12;
