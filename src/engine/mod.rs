//! Sample engines: interchangeable sources for the audio path.
//!
//! The controller owns one engine and forwards debounced presses and ticks
//! to it. Each engine owns its state machine, its sample clock(s) and
//! decides what reaches the PWM sink:
//!
//! - [`RecorderEngine`]: record 2 s from the microphone, play it back
//! - [`GeneratorEngine`]: pot-controlled oscillator with four waveforms

pub mod generator;
pub mod recorder;

pub use generator::{GeneratorEngine, GeneratorState};
pub use recorder::{RecorderEngine, RecorderState};

use core::fmt;

use crate::hal::{AnalogInput, AudioSink, LedState};
use crate::input::ButtonId;
use crate::logging::LogStream;

/// A sample-producing strategy driven by the controller.
pub trait SampleEngine {
    /// Observable state machine state.
    type State: Copy + PartialEq + fmt::Debug;

    /// Short name for status output.
    fn name(&self) -> &'static str;

    /// Current state.
    fn state(&self) -> Self::State;

    /// Handle a debounced button press.
    fn on_press(&mut self, button: ButtonId, now_us: u64, log: &LogStream);

    /// Run one poll tick.
    ///
    /// Produces at most one sample per sampling period. Returns the level
    /// written to the sink this tick, or `None` if the sink was not touched.
    fn tick<B: AnalogInput + AudioSink>(
        &mut self,
        now_us: u64,
        board: &mut B,
        log: &LogStream,
    ) -> Option<u8>;

    /// Indicator LEDs for the current state.
    fn leds(&self) -> LedState;
}

impl<E: SampleEngine + ?Sized> SampleEngine for &mut E {
    type State = E::State;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn state(&self) -> Self::State {
        (**self).state()
    }

    fn on_press(&mut self, button: ButtonId, now_us: u64, log: &LogStream) {
        (**self).on_press(button, now_us, log)
    }

    fn tick<B: AnalogInput + AudioSink>(
        &mut self,
        now_us: u64,
        board: &mut B,
        log: &LogStream,
    ) -> Option<u8> {
        (**self).tick(now_us, board, log)
    }

    fn leds(&self) -> LedState {
        (**self).leds()
    }
}
