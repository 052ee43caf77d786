//! Front-panel inputs: two push-buttons and one potentiometer.
//!
//! Pure logic over raw pin levels and ADC readings. No hardware access;
//! the controller feeds values read through the HAL traits.

pub mod analog;
pub mod debounce;

pub use analog::{clamp_raw, to_frequency, to_level, AnalogReader};
pub use debounce::{ButtonDebouncer, Edge};

/// Front-panel button.
///
/// The same two pins serve both engines: `Function` records in buffer mode
/// and cycles the waveform in procedural mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonId {
    /// REC / wave-select button
    Function,
    /// PLAY button
    Play,
}
