use quell::filter::{Biquad, Filter};
use std::f32::consts::PI;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("=== Biquad Frequency Response Test ===\n");

    let sample_rate = 2000.0;

    println!("Notch filter (50 Hz, fs = {} Hz):", sample_rate);
    let mut notch = Biquad::notch(sample_rate, 50.0)?;
    sweep(
        &mut notch,
        sample_rate,
        &[10.0, 30.0, 45.0, 50.0, 55.0, 70.0, 100.0, 200.0],
        |freq, attenuation| {
            if (45.0..=55.0).contains(&freq) {
                attenuation < -3.0
            } else {
                attenuation > -3.0
            }
        },
    );

    println!("\nLowpass filter (400 Hz, fs = {} Hz):", sample_rate);
    let mut lowpass = Biquad::lowpass(sample_rate, 400.0)?;
    sweep(
        &mut lowpass,
        sample_rate,
        &[50.0, 100.0, 200.0, 400.0, 600.0, 800.0, 950.0],
        |freq, attenuation| {
            if freq < 400.0 {
                attenuation > -3.0
            } else if freq > 600.0 {
                attenuation < -6.0
            } else {
                true
            }
        },
    );

    println!("\nHighpass filter (200 Hz, fs = {} Hz):", sample_rate);
    let mut highpass = Biquad::highpass(sample_rate, 200.0)?;
    sweep(
        &mut highpass,
        sample_rate,
        &[20.0, 50.0, 100.0, 200.0, 400.0, 800.0],
        |freq, attenuation| {
            if freq < 100.0 {
                attenuation < -10.0
            } else if freq > 200.0 {
                attenuation > -3.0
            } else {
                true
            }
        },
    );

    println!("\nBandpass filter (100-300 Hz, fs = {} Hz):", sample_rate);
    let mut bandpass = Biquad::bandpass(sample_rate, 100.0, 300.0)?;
    sweep(
        &mut bandpass,
        sample_rate,
        &[20.0, 50.0, 100.0, 173.0, 300.0, 600.0, 900.0],
        |freq, attenuation| {
            // 173 Hz ~ sqrt(100*300), the geometric center
            if (160.0..=190.0).contains(&freq) {
                attenuation > -3.0
            } else if !(100.0..=300.0).contains(&freq) {
                attenuation < -3.0
            } else {
                true
            }
        },
    );

    println!("\nResponse test complete.");
    Ok(())
}

fn sweep<F: Filter>(
    filter: &mut F,
    sample_rate: f32,
    frequencies: &[f32],
    pass: impl Fn(f32, f32) -> bool,
) {
    println!(
        "{:<10} {:<18} {:<10}",
        "Freq (Hz)", "Attenuation (dB)", "Status"
    );
    println!("{}", "-".repeat(40));

    for &freq in frequencies {
        let attenuation = measure(filter, freq, sample_rate);
        let status = if pass(freq, attenuation) { "PASS" } else { "FAIL" };
        println!("{:<10.1} {:<18.2} {:<10}", freq, attenuation, status);
    }
}

/// Measure steady-state attenuation of a sinusoid at `freq`, in dB.
/// The first half of the probe is discarded as settling time.
fn measure<F: Filter>(filter: &mut F, freq: f32, sample_rate: f32) -> f32 {
    let num_samples = (sample_rate * 4.0) as usize;
    let input: Vec<f32> = (0..num_samples)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
        .collect();

    let mut output = input.clone();
    filter.process_buffer(&mut output);

    let skip = num_samples / 2;
    let input_rms: f32 =
        (input.iter().skip(skip).map(|x| x * x).sum::<f32>() / (input.len() - skip) as f32).sqrt();
    let output_rms: f32 = (output.iter().skip(skip).map(|x| x * x).sum::<f32>()
        / (output.len() - skip) as f32)
        .sqrt();

    20.0 * (output_rms / input_rms).log10()
}
