pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod wav;

pub use config::ConditioningConfig;
pub use error::{FilterError, Result};
pub use filter::{Biquad, ChannelId, DirectFormI, Filter, FilterBank, FilterClass, Passband};
pub use wav::{read_wav, save_wav};
