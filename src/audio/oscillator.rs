//! Phase accumulator for the procedural engine.
//!
//! Phase is a float in [0, 1). Each sample adds `freq / sample_rate` and
//! wraps by subtracting 1. The phase persists across frequency changes
//! and play/pause, so the waveform never jumps.

use super::waveform::{generate, WaveformKind};
use crate::config::SynthConfig;

/// Oscillator state.
#[derive(Clone, Copy, Debug)]
pub struct Oscillator {
    /// Current phase, always in [0, 1)
    phase: f32,
    /// Phase increment per sample, in [0, 0.5]
    phase_step: f32,
    config: SynthConfig,
}

impl Oscillator {
    /// Create new oscillator at phase 0.
    ///
    /// # Arguments
    /// * `freq_hz` - Initial frequency in Hz (clamped to Nyquist)
    /// * `config` - Provides the sample rate
    pub fn new(freq_hz: f32, config: &SynthConfig) -> Self {
        Self {
            phase: 0.0,
            phase_step: config.phase_step(freq_hz),
            config: *config,
        }
    }

    /// Update frequency (e.g., when the pot moves). Phase is kept.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_step = self.config.phase_step(freq_hz);
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Current phase increment.
    #[inline]
    pub fn phase_step(&self) -> f32 {
        self.phase_step
    }

    /// Advance by one sample and return the new phase.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.phase = wrap_phase(self.phase + self.phase_step);
        self.phase
    }

    /// Generate the sample at the current phase, then advance.
    #[inline]
    pub fn next_sample(&mut self, kind: WaveformKind) -> u8 {
        let sample = generate(kind, self.phase);
        self.advance();
        sample
    }

    /// Reset phase to 0 (generator restart).
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Re-normalize a phase into [0, 1).
///
/// Expects `phase < 2` (one step past the wrap point at most); anything
/// still out of range afterwards collapses to 0.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = if phase >= 1.0 { phase - 1.0 } else { phase };
    if (0.0..1.0).contains(&wrapped) {
        wrapped
    } else {
        0.0
    }
}
