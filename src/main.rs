use anyhow::{Context, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use quell::config::ConditioningConfig;
use quell::filter::{Biquad, Filter, FilterClass, Passband, PresetKind, tabulated};
use quell::wav::{read_wav, save_wav};

/// Condition a sampled signal with a biquad IIR filter.
///
/// Either design one filter on the command line (--class/--cutoff), load
/// a legacy tabulated one (--preset), or apply a TOML channel plan
/// (--config), which writes one output file per configured channel.
#[derive(Parser, Debug)]
#[command(name = "quell", version)]
struct Args {
    /// Input WAV file (multi-channel input is mixed down to mono)
    input: PathBuf,

    /// Output WAV file (used as a stem in --config mode)
    output: PathBuf,

    /// Filter class to design
    #[arg(long, value_enum, conflicts_with_all = ["preset", "config"])]
    class: Option<FilterClass>,

    /// Notch/cutoff frequency in Hz, or low:high pair for band classes
    #[arg(long, requires = "class")]
    cutoff: Option<Passband>,

    /// Legacy tabulated filter (requires a tabulated sample rate)
    #[arg(long, value_enum, conflicts_with = "config")]
    preset: Option<PresetKind>,

    /// TOML channel plan (one output file per channel)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop with an error if the filter output diverges
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (samples, sample_rate) = read_wav(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    log::info!(
        "{}: {} samples at {} Hz",
        args.input.display(),
        samples.len(),
        sample_rate
    );

    if let Some(config_path) = &args.config {
        return run_channel_plan(&args, config_path, &samples, sample_rate);
    }

    let mut filter: Box<dyn Filter> = match (args.class, args.preset) {
        (Some(class), None) => {
            let cutoff = args
                .cutoff
                .context("--class requires --cutoff (e.g. --cutoff 50 or --cutoff 1:200)")?;
            Box::new(Biquad::new(class, sample_rate as f32, cutoff)?)
        }
        (None, Some(kind)) => Box::new(tabulated(sample_rate, kind)?),
        _ => bail!("choose exactly one of --class, --preset, --config"),
    };

    let output = apply(filter.as_mut(), &samples, args.check)?;
    report(&samples, &output);
    save_wav(&args.output, &output, sample_rate)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

fn run_channel_plan(
    args: &Args,
    config_path: &Path,
    samples: &[f32],
    sample_rate: u32,
) -> anyhow::Result<()> {
    let config = ConditioningConfig::load(config_path)?;
    if (config.sample_rate - sample_rate as f32).abs() > 0.5 {
        log::warn!(
            "plan sample rate {} Hz differs from WAV sample rate {} Hz; using the plan",
            config.sample_rate,
            sample_rate
        );
    }
    let mut bank = config.build_bank()?;

    let stem = args
        .output
        .file_stem()
        .context("output path has no file stem")?
        .to_string_lossy()
        .into_owned();

    for channel in &config.channels {
        let mut output = Vec::with_capacity(samples.len());
        for &sample in samples {
            let value = if args.check {
                bank.try_process(channel.id, sample)?
            } else {
                bank.process(channel.id, sample)?
            };
            output.push(value);
        }

        let path = args
            .output
            .with_file_name(format!("{}_{}.wav", stem, channel.id));
        report(samples, &output);
        save_wav(&path, &output, sample_rate)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {} ({})", path.display(), channel.class);
    }
    Ok(())
}

fn apply(filter: &mut dyn Filter, samples: &[f32], check: bool) -> anyhow::Result<Vec<f32>> {
    let mut output = samples.to_vec();
    if check {
        // The trait has no fallible path; wrap each output sample.
        for sample in output.iter_mut() {
            let value = filter.process(*sample);
            if !value.is_finite() {
                bail!("filter output diverged ({})", value);
            }
            *sample = value;
        }
    } else {
        filter.process_buffer(&mut output);
    }
    Ok(output)
}

fn report(input: &[f32], output: &[f32]) {
    let rms = |s: &[f32]| (s.iter().map(|v| v * v).sum::<f32>() / s.len().max(1) as f32).sqrt();
    log::info!("RMS in = {:.4}, RMS out = {:.4}", rms(input), rms(output));
}
