//! Audio path: sample storage and procedural generation.
//!
//! Architecture:
//! - Waveform generator: pure (shape, phase) → 8-bit level
//! - Oscillator: float phase accumulator in [0, 1)
//! - Sample buffer: 16 000 × u8, record once / play once
//! - Output is an 8-bit PWM duty cycle (0..=255)

pub mod buffer;
pub mod oscillator;
pub mod waveform;

pub use buffer::{ReadResult, SampleBuffer, WriteResult};
pub use oscillator::{wrap_phase, Oscillator};
pub use waveform::{generate, normalized, quantize, WaveformKind};
