//! Caller-owned collection of per-channel filter instances.
//!
//! Each signal channel owns exactly one [`Biquad`]; the bank is a plain
//! map with no interior locking. A bank (or a single channel's filter)
//! must only be driven from one thread at a time; independent banks may
//! live on independent threads.

use crate::error::{FilterError, Result};
use crate::filter::Biquad;
use crate::filter::design::{FilterClass, Passband};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Identifier for one signal channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u32);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix("ch").unwrap_or(s);
        digits
            .parse()
            .map(ChannelId)
            .map_err(|_| format!("invalid channel id: {}", s))
    }
}

impl From<u32> for ChannelId {
    fn from(id: u32) -> Self {
        ChannelId(id)
    }
}

/// Map from channel identifier to filter instance
#[derive(Debug, Clone, Default)]
pub struct FilterBank {
    channels: HashMap<ChannelId, Biquad>,
}

impl FilterBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a filter and install it on `id`, replacing any previous
    /// instance (and its history).
    ///
    /// # Errors
    /// Propagates derivation errors; on error the channel keeps its
    /// previous filter, if any.
    pub fn configure(
        &mut self,
        id: impl Into<ChannelId>,
        class: FilterClass,
        sample_rate: f32,
        passband: Passband,
    ) -> Result<()> {
        let filter = Biquad::new(class, sample_rate, passband)?;
        self.channels.insert(id.into(), filter);
        Ok(())
    }

    /// Install an already-built filter, returning the previous one
    pub fn insert(&mut self, id: impl Into<ChannelId>, filter: Biquad) -> Option<Biquad> {
        self.channels.insert(id.into(), filter)
    }

    /// Remove a channel's filter
    pub fn remove(&mut self, id: impl Into<ChannelId>) -> Option<Biquad> {
        self.channels.remove(&id.into())
    }

    pub fn get(&self, id: impl Into<ChannelId>) -> Option<&Biquad> {
        self.channels.get(&id.into())
    }

    pub fn get_mut(&mut self, id: impl Into<ChannelId>) -> Option<&mut Biquad> {
        self.channels.get_mut(&id.into())
    }

    /// Process one sample on the given channel.
    ///
    /// # Errors
    /// Returns `UnknownChannel` if no filter is configured for `id`.
    pub fn process(&mut self, id: impl Into<ChannelId>, sample: f32) -> Result<f32> {
        let id = id.into();
        let filter = self
            .channels
            .get_mut(&id)
            .ok_or(FilterError::UnknownChannel(id))?;
        Ok(filter.process(sample))
    }

    /// Process one sample on the given channel, surfacing instability
    pub fn try_process(&mut self, id: impl Into<ChannelId>, sample: f32) -> Result<f32> {
        let id = id.into();
        let filter = self
            .channels
            .get_mut(&id)
            .ok_or(FilterError::UnknownChannel(id))?;
        filter.try_process(sample)
    }

    /// Zero the history of every configured channel
    pub fn reset_all(&mut self) {
        for filter in self.channels.values_mut() {
            filter.reset();
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChannelId, &Biquad)> {
        self.channels.iter()
    }

    /// Configured channel ids in ascending order
    pub fn channel_ids(&self) -> Vec<ChannelId> {
        let mut ids: Vec<ChannelId> = self.channels.keys().copied().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_channel_is_an_error() {
        let mut bank = FilterBank::new();
        let result = bank.process(3, 1.0);
        assert!(matches!(
            result,
            Err(FilterError::UnknownChannel(ChannelId(3)))
        ));
    }

    #[test]
    fn test_configure_and_process() {
        let mut bank = FilterBank::new();
        bank.configure(0, FilterClass::Notch, 500.0, Passband::Single(50.0))
            .unwrap();
        bank.configure(1, FilterClass::LowPass, 500.0, Passband::Single(100.0))
            .unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.channel_ids(), vec![ChannelId(0), ChannelId(1)]);

        let out = bank.process(0, 1.0).unwrap();
        assert_eq!(out, bank.get(0).unwrap().coefficients().b[0]);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut bank = FilterBank::new();
        for id in 0..3u32 {
            bank.configure(id, FilterClass::LowPass, 1000.0, Passband::Single(100.0))
                .unwrap();
        }

        // Drive only channel 1; the others must keep zeroed history.
        for _ in 0..100 {
            bank.process(1, 1.0).unwrap();
        }
        assert_eq!(bank.process(0, 0.0).unwrap(), 0.0);
        assert_eq!(bank.process(2, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_reconfigure_replaces_instance_and_history() {
        let mut bank = FilterBank::new();
        bank.configure(0, FilterClass::LowPass, 1000.0, Passband::Single(100.0))
            .unwrap();
        for _ in 0..50 {
            bank.process(0, 1.0).unwrap();
        }

        bank.configure(0, FilterClass::HighPass, 1000.0, Passband::Single(100.0))
            .unwrap();
        let filter = bank.get(0).unwrap();
        assert_eq!(filter.class(), FilterClass::HighPass);
        // Fresh history: impulse response starts at b[0]
        let b0 = filter.coefficients().b[0];
        assert_eq!(bank.process(0, 1.0).unwrap(), b0);
    }

    #[test]
    fn test_failed_configure_keeps_previous_filter() {
        let mut bank = FilterBank::new();
        bank.configure(0, FilterClass::Notch, 500.0, Passband::Single(50.0))
            .unwrap();
        let result = bank.configure(0, FilterClass::Notch, 500.0, Passband::Single(300.0));
        assert!(result.is_err());
        assert_eq!(bank.get(0).unwrap().class(), FilterClass::Notch);
        assert_eq!(bank.get(0).unwrap().passband(), Passband::Single(50.0));
    }

    #[test]
    fn test_channel_id_parsing() {
        assert_eq!("7".parse::<ChannelId>().unwrap(), ChannelId(7));
        assert_eq!("ch12".parse::<ChannelId>().unwrap(), ChannelId(12));
        assert!("x".parse::<ChannelId>().is_err());
        assert_eq!(ChannelId(3).to_string(), "ch3");
    }

    #[test]
    fn test_reset_all() {
        let mut bank = FilterBank::new();
        bank.configure(0, FilterClass::LowPass, 1000.0, Passband::Single(100.0))
            .unwrap();
        for _ in 0..10 {
            bank.process(0, 1.0).unwrap();
        }
        bank.reset_all();
        assert_eq!(bank.process(0, 0.0).unwrap(), 0.0);
    }
}
