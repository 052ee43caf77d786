//! # RustPwmSynth
//!
//! Microcontroller audio synth with 8-bit PWM output.
//!
//! ## Architecture
//!
//! One polled controller drives one interchangeable sample engine:
//! - [`engine::RecorderEngine`]: 2 s microphone capture, then playback
//! - [`engine::GeneratorEngine`]: sine/square/triangle/sawtooth oscillator,
//!   frequency from a potentiometer (220..1100 Hz)
//!
//! Every tick the controller debounces the two buttons, applies state
//! transitions and lets the engine produce at most one sample per
//! sampling period (125 µs at 8 kHz). Nothing in the tick path blocks.
//! Hardware is reached only through the traits in [`hal`], so the whole
//! core runs on the host under test.

#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod clock;
pub mod config;
pub mod controller;
pub mod engine;
pub mod hal;
pub mod input;
pub mod log_globals;
pub mod logging;
pub mod uart_logger;

pub use audio::{SampleBuffer, WaveformKind};
pub use clock::SampleClock;
pub use config::SynthConfig;
pub use controller::SynthController;
pub use engine::{GeneratorEngine, RecorderEngine, SampleEngine};
pub use log_globals::STATUS_LOG;
pub use logging::LogStream;
