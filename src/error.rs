use crate::filter::bank::ChannelId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid sample rate: {0} Hz (must be positive)")]
    InvalidSampleRate(f32),

    #[error("Cutoff {cutoff_hz} Hz outside (0, {nyquist_hz}) at fs = {sample_rate} Hz")]
    CutoffOutOfRange {
        cutoff_hz: f32,
        nyquist_hz: f32,
        sample_rate: f32,
    },

    #[error("Inverted band: low cutoff {low_hz} Hz >= high cutoff {high_hz} Hz")]
    InvertedBand { low_hz: f32, high_hz: f32 },

    #[error("Invalid coefficients: {0}")]
    InvalidCoefficients(String),

    #[error("Unstable filter output: {0}")]
    UnstableOutput(f32),

    #[error("No filter configured for channel {0}")]
    UnknownChannel(ChannelId),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
