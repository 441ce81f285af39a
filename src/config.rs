//! Channel-plan configuration.
//!
//! A conditioning setup is a global sample rate plus one filter per
//! signal channel, loadable from TOML:
//!
//! ```toml
//! sample_rate = 500.0
//!
//! [[channel]]
//! id = 0
//! class = "notch"
//! freq = 50.0
//!
//! [[channel]]
//! id = 1
//! class = "band-pass"
//! low = 1.0
//! high = 200.0
//! ```

use crate::error::{FilterError, Result};
use crate::filter::bank::{ChannelId, FilterBank};
use crate::filter::design::{FilterClass, Passband};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One channel's filter assignment
///
/// Single-frequency classes (notch/low-pass/high-pass) take `freq`;
/// band classes take `low` and `high`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel identifier
    pub id: ChannelId,
    /// Filter class
    pub class: FilterClass,
    /// Notch frequency or cutoff in Hz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<f32>,
    /// Lower band edge in Hz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f32>,
    /// Upper band edge in Hz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f32>,
}

impl ChannelConfig {
    /// Resolve the frequency fields into a `Passband` for this class.
    pub fn passband(&self) -> Result<Passband> {
        match (self.class.is_band(), self.freq, self.low, self.high) {
            (false, Some(freq), None, None) => Ok(Passband::Single(freq)),
            (true, None, Some(low), Some(high)) => Ok(Passband::Band { low, high }),
            (false, _, _, _) => Err(FilterError::Config(format!(
                "channel {}: {} filter takes exactly `freq`",
                self.id, self.class
            ))),
            (true, _, _, _) => Err(FilterError::Config(format!(
                "channel {}: {} filter takes exactly `low` and `high`",
                self.id, self.class
            ))),
        }
    }
}

/// Full conditioning configuration: sample rate plus channel plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditioningConfig {
    /// Sample rate in Hz shared by every channel
    pub sample_rate: f32,
    /// Per-channel filter assignments
    #[serde(default, rename = "channel")]
    pub channels: Vec<ChannelConfig>,
}

impl ConditioningConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| FilterError::Config(format!("invalid config: {}", e)))?;
        config.check_duplicates()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FilterError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    fn check_duplicates(&self) -> Result<()> {
        let mut ids: Vec<ChannelId> = self.channels.iter().map(|c| c.id).collect();
        ids.sort();
        for pair in ids.windows(2) {
            if pair[0] == pair[1] {
                return Err(FilterError::Config(format!(
                    "duplicate channel {}",
                    pair[0]
                )));
            }
        }
        Ok(())
    }

    /// Derive every configured filter into a fresh bank.
    ///
    /// # Errors
    /// Fails fast on the first invalid channel; no partial bank is
    /// returned.
    pub fn build_bank(&self) -> Result<FilterBank> {
        let mut bank = FilterBank::new();
        for channel in &self.channels {
            let passband = channel.passband()?;
            bank.configure(channel.id, channel.class, self.sample_rate, passband)?;
            log::debug!(
                "channel {}: {} {} at fs = {} Hz",
                channel.id,
                channel.class,
                passband,
                self.sample_rate
            );
        }
        Ok(bank)
    }
}
