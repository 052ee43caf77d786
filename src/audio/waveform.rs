//! Waveform shapes for the procedural engine.
//!
//! `generate` is a pure function of (shape, phase). Every shape is first
//! normalized to [0, 1], then truncated to the 8-bit output domain.

use core::f32::consts::PI;
use core::fmt;

use crate::config::OUTPUT_MAX;

/// Waveform selection, cycled by the wave button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WaveformKind {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl WaveformKind {
    /// All shapes in selection order.
    pub const ALL: [WaveformKind; 4] = [
        WaveformKind::Sine,
        WaveformKind::Square,
        WaveformKind::Triangle,
        WaveformKind::Sawtooth,
    ];

    /// Next shape in the cycle (wraps after Sawtooth).
    #[inline]
    pub fn next(self) -> Self {
        match self {
            WaveformKind::Sine => WaveformKind::Square,
            WaveformKind::Square => WaveformKind::Triangle,
            WaveformKind::Triangle => WaveformKind::Sawtooth,
            WaveformKind::Sawtooth => WaveformKind::Sine,
        }
    }

    /// Display name for status output.
    pub fn as_str(self) -> &'static str {
        match self {
            WaveformKind::Sine => "Sine",
            WaveformKind::Square => "Square",
            WaveformKind::Triangle => "Triangle",
            WaveformKind::Sawtooth => "Sawtooth",
        }
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Waveform value in [0, 1] for `phase` in [0, 1).
#[inline]
pub fn normalized(kind: WaveformKind, phase: f32) -> f32 {
    match kind {
        WaveformKind::Sine => (libm::sinf(2.0 * PI * phase) + 1.0) / 2.0,
        WaveformKind::Square => {
            if phase < 0.5 {
                1.0
            } else {
                0.0
            }
        }
        WaveformKind::Triangle => {
            if phase < 0.5 {
                2.0 * phase
            } else {
                2.0 - 2.0 * phase
            }
        }
        WaveformKind::Sawtooth => phase,
    }
}

/// Truncate a [0, 1] value to the output domain. Out-of-range input saturates.
#[inline]
pub fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * OUTPUT_MAX as f32) as u8
}

/// Quantized amplitude for `phase` in [0, 1).
#[inline]
pub fn generate(kind: WaveformKind, phase: f32) -> u8 {
    quantize(normalized(kind, phase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_after_four() {
        let mut kind = WaveformKind::Sine;
        for _ in 0..4 {
            kind = kind.next();
        }
        assert_eq!(kind, WaveformKind::Sine);
    }

    #[test]
    fn test_all_matches_cycle_order() {
        for pair in WaveformKind::ALL.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }
    }

    #[test]
    fn test_quantize_truncates() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 127);
        assert_eq!(quantize(1.5), 255);
        assert_eq!(quantize(-0.5), 0);
        assert_eq!(quantize(f32::NAN), 0);
    }

    #[test]
    fn test_triangle_peak() {
        assert_eq!(generate(WaveformKind::Triangle, 0.0), 0);
        assert_eq!(generate(WaveformKind::Triangle, 0.5), 255);
        assert_eq!(generate(WaveformKind::Triangle, 0.25), 127);
    }

    #[test]
    fn test_sine_quarter_points() {
        assert_eq!(generate(WaveformKind::Sine, 0.25), 255);
        assert!(generate(WaveformKind::Sine, 0.75) <= 1);
    }
}
