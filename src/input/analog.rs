//! Potentiometer / microphone ADC mapping.
//!
//! Raw readings are 12-bit (0..=4095). Out-of-range values are clamped,
//! never reported as errors.

use crate::config::{SynthConfig, ADC_MAX};

/// Clamp a raw reading into the ADC domain.
#[inline]
pub fn clamp_raw(raw: u16) -> u16 {
    raw.min(ADC_MAX)
}

/// Linear pot-to-frequency mapping.
///
/// `freq = min + (raw / 4095) * range`
#[inline]
pub fn to_frequency(raw: u16, min_hz: f32, range_hz: f32) -> f32 {
    min_hz + (clamp_raw(raw) as f32 / ADC_MAX as f32) * range_hz
}

/// Quantize a 12-bit reading to an 8-bit output level (drop 4 LSBs).
#[inline]
pub fn to_level(raw: u16) -> u8 {
    (clamp_raw(raw) >> 4) as u8
}

/// Analog control reader.
///
/// Holds the mapping parameters and the last value read, so a tick uses
/// one consistent reading for every decision.
#[derive(Clone, Copy, Debug)]
pub struct AnalogReader {
    min_hz: f32,
    range_hz: f32,
    last_raw: u16,
}

impl AnalogReader {
    /// Create a reader using the frequency range from `config`.
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            min_hz: config.freq_min_hz,
            range_hz: config.freq_range_hz,
            last_raw: 0,
        }
    }

    /// Store a new raw reading (clamped) and return it.
    #[inline]
    pub fn update(&mut self, raw: u16) -> u16 {
        self.last_raw = clamp_raw(raw);
        self.last_raw
    }

    /// Frequency for the last stored reading.
    #[inline]
    pub fn frequency(&self) -> f32 {
        to_frequency(self.last_raw, self.min_hz, self.range_hz)
    }
}
