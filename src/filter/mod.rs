pub mod bank;
pub mod biquad;
pub mod design;
pub mod direct_form;
pub mod presets;

pub use bank::{ChannelId, FilterBank};
pub use biquad::Biquad;
pub use design::{FilterClass, Passband};
pub use direct_form::DirectFormI;
pub use presets::{PresetKind, tabulated};

/// Common trait for sample filters
///
/// Implemented by `Biquad` and `DirectFormI`.
pub trait Filter {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f32) -> f32;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
