use approx::assert_abs_diff_eq;
use quell::filter::{Biquad, FilterClass, Passband};
use std::f32::consts::PI;

fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
        .collect()
}

fn peak_after_settling(filter: &mut Biquad, signal: &[f32]) -> f32 {
    let skip = signal.len() / 2;
    let mut peak = 0.0f32;
    for (i, &sample) in signal.iter().enumerate() {
        let output = filter.process(sample);
        if i >= skip {
            peak = peak.max(output.abs());
        }
    }
    peak
}

fn all_valid_cases() -> Vec<(FilterClass, Passband)> {
    vec![
        (FilterClass::Notch, Passband::Single(50.0)),
        (FilterClass::Notch, Passband::Single(60.0)),
        (FilterClass::LowPass, Passband::Single(100.0)),
        (FilterClass::LowPass, Passband::Single(200.0)),
        (FilterClass::HighPass, Passband::Single(0.5)),
        (FilterClass::HighPass, Passband::Single(40.0)),
        (
            FilterClass::BandPass,
            Passband::Band {
                low: 1.0,
                high: 200.0,
            },
        ),
        (
            FilterClass::BandStop,
            Passband::Band {
                low: 49.5,
                high: 50.5,
            },
        ),
    ]
}

#[test]
fn test_leading_denominator_exactly_one() {
    for fs in [250.0, 500.0, 1000.0, 2000.0] {
        for (class, passband) in all_valid_cases() {
            let filter = Biquad::new(class, fs, passband).unwrap();
            assert_eq!(
                filter.coefficients().a[0],
                1.0,
                "{} at fs = {} not normalized",
                class,
                fs
            );
        }
    }
}

// Regression vector for the 50 Hz notch at fs = 500: w0 = 2*pi*50/500,
// alpha = sin(w0)/60, a = [1+alpha, -2cos(w0), 1-alpha] normalized.
// Impulse response follows y[0] = b[0], y[1] = b[1] - a[1]*y[0], ...
#[test]
fn test_notch_impulse_regression_vector() {
    let mut filter = Biquad::notch(500.0, 50.0).unwrap();

    let c = filter.coefficients();
    assert_abs_diff_eq!(c.b[0], 0.990_298_62, epsilon = 1e-6);
    assert_abs_diff_eq!(c.b[1], -1.602_336_82, epsilon = 1e-6);
    assert_abs_diff_eq!(c.b[2], 0.990_298_62, epsilon = 1e-6);
    assert_abs_diff_eq!(c.a[1], -1.602_336_82, epsilon = 1e-6);
    assert_abs_diff_eq!(c.a[2], 0.980_597_24, epsilon = 1e-6);

    let expected = [
        0.990_298_62,
        -0.015_544_88,
        -0.005_693_61,
        0.006_120_19,
        0.015_389_75,
        0.018_658_11,
        0.014_805_44,
        0.005_427_20,
    ];

    for (i, &value) in expected.iter().enumerate() {
        let input = if i == 0 { 1.0 } else { 0.0 };
        let output = filter.process(input);
        assert_abs_diff_eq!(output, value, epsilon = 2e-5);
    }
}

// Legacy tabulated coefficients: butter(2, 400/1000) at fs = 2000,
// rounded to 5 decimals.
#[test]
fn test_lowpass_fs2000_400hz_matches_legacy_table() {
    let filter = Biquad::lowpass(2000.0, 400.0).unwrap();
    let c = filter.coefficients();

    assert_abs_diff_eq!(c.b[0], 0.20657, epsilon = 1e-5);
    assert_abs_diff_eq!(c.b[1], 0.41314, epsilon = 1e-5);
    assert_abs_diff_eq!(c.b[2], 0.20657, epsilon = 1e-5);
    assert_abs_diff_eq!(c.a[0], 1.00000, epsilon = 0.0);
    assert_abs_diff_eq!(c.a[1], -0.36953, epsilon = 1e-5);
    assert_abs_diff_eq!(c.a[2], 0.19582, epsilon = 1e-5);
}

#[test]
fn test_highpass_fs2000_1hz_matches_legacy_table() {
    let filter = Biquad::highpass(2000.0, 1.0).unwrap();
    let c = filter.coefficients();

    assert_abs_diff_eq!(c.b[0], 0.99778, epsilon = 1e-5);
    assert_abs_diff_eq!(c.b[1], -1.99556, epsilon = 1e-5);
    assert_abs_diff_eq!(c.b[2], 0.99778, epsilon = 1e-5);
    assert_abs_diff_eq!(c.a[1], -1.99556, epsilon = 1e-5);
    assert_abs_diff_eq!(c.a[2], 0.99557, epsilon = 1e-5);
}

#[test]
fn test_notch_rejects_center_and_passes_distant_tone() {
    let sample_rate = 500.0;
    let len = 10_000;

    let mut filter = Biquad::notch(sample_rate, 50.0).unwrap();
    let rejected = peak_after_settling(&mut filter, &sine(50.0, sample_rate, len));
    assert!(rejected < 1e-3, "50 Hz residual too large: {}", rejected);

    let mut filter = Biquad::notch(sample_rate, 50.0).unwrap();
    let passed = peak_after_settling(&mut filter, &sine(10.0, sample_rate, len));
    assert!(passed > 0.95, "10 Hz attenuated to {}", passed);
}

#[test]
fn test_lowpass_unity_dc_gain_identity() {
    for (fs, cutoff) in [(500.0, 100.0), (1000.0, 300.0), (2000.0, 400.0)] {
        let filter = Biquad::lowpass(fs, cutoff).unwrap();
        let c = filter.coefficients();
        let gain = (c.b[0] + c.b[1] + c.b[2]) / (c.a[0] + c.a[1] + c.a[2]);
        assert_abs_diff_eq!(gain, 1.0, epsilon = 1e-4);
    }
}

#[test]
fn test_highpass_zero_dc_gain_identity() {
    for (fs, cutoff) in [(500.0, 1.0), (1000.0, 40.0), (2000.0, 200.0)] {
        let filter = Biquad::highpass(fs, cutoff).unwrap();
        let c = filter.coefficients();
        let numerator_sum = c.b[0] + c.b[1] + c.b[2];
        assert_abs_diff_eq!(numerator_sum, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn test_identical_instances_are_bit_identical() {
    let mut a = Biquad::bandpass(1000.0, 5.0, 150.0).unwrap();
    let mut b = Biquad::bandpass(1000.0, 5.0, 150.0).unwrap();

    // Deterministic but aperiodic-looking input
    let input: Vec<f32> = (0..5000)
        .map(|i| (0.013 * i as f32).sin() * (0.7 * i as f32).cos())
        .collect();

    for (i, &sample) in input.iter().enumerate() {
        let ya = a.process(sample);
        let yb = b.process(sample);
        assert_eq!(
            ya.to_bits(),
            yb.to_bits(),
            "outputs diverged at sample {}",
            i
        );
    }
}
