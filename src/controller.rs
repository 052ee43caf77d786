//! Synth controller: the per-tick update.
//!
//! Pure logic over the HAL traits, no hardware dependencies. Each call to
//! [`SynthController::tick`]:
//!
//! 1. Reads both buttons and runs them through their debouncers
//! 2. Forwards recognized presses to the engine (Function first, then Play)
//! 3. Lets the engine produce at most one sample, gated by its clock
//! 4. Updates the indicator LEDs if the engine state changed them
//!
//! Nothing in here waits: the debounce window is a timestamp check, so
//! the sample clock keeps running while a button settles.

use crate::config::SynthConfig;
use crate::engine::SampleEngine;
use crate::hal::{Board, LedState};
use crate::input::{ButtonDebouncer, ButtonId};
use crate::logging::LogStream;
use crate::rt_info;

/// Synth controller.
///
/// # Example
///
/// ```
/// use rust_pwm_synth::config::SynthConfig;
/// use rust_pwm_synth::controller::SynthController;
/// use rust_pwm_synth::engine::{GeneratorEngine, GeneratorState, SampleEngine};
/// use rust_pwm_synth::audio::WaveformKind;
/// use rust_pwm_synth::logging::LogStream;
///
/// let log: LogStream = LogStream::new();
/// let config = SynthConfig::default();
/// let synth = SynthController::new(GeneratorEngine::new(config), &log, config.debounce_ms);
///
/// assert_eq!(synth.engine().state(), GeneratorState::Idle(WaveformKind::Sine));
/// ```
pub struct SynthController<'a, E: SampleEngine> {
    engine: E,
    function_btn: ButtonDebouncer,
    play_btn: ButtonDebouncer,
    log: &'a LogStream,
    /// LEDs as last driven; `None` until the first tick
    leds: Option<LedState>,
    ticks: u64,
}

impl<'a, E: SampleEngine> SynthController<'a, E> {
    /// Create a controller around `engine`.
    ///
    /// # Arguments
    /// * `engine` - Sample source strategy
    /// * `log` - Status stream, drained by the outer loop
    /// * `debounce_ms` - Button re-arm window
    pub fn new(engine: E, log: &'a LogStream, debounce_ms: u32) -> Self {
        Self {
            engine,
            function_btn: ButtonDebouncer::new(debounce_ms),
            play_btn: ButtonDebouncer::new(debounce_ms),
            log,
            leds: None,
            ticks: 0,
        }
    }

    /// Create a controller using the debounce window from `config`.
    pub fn with_config(engine: E, log: &'a LogStream, config: &SynthConfig) -> Self {
        Self::new(engine, log, config.debounce_ms)
    }

    /// The engine.
    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Current engine state.
    #[inline]
    pub fn state(&self) -> E::State {
        self.engine.state()
    }

    /// Number of ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one poll tick.
    ///
    /// # Arguments
    /// * `now_us` - Current time in microseconds (monotonic)
    /// * `board` - Buttons, ADC, PWM sink and LEDs
    ///
    /// # Returns
    /// The level written to the audio sink this tick, if any.
    pub fn tick<B: Board>(&mut self, now_us: u64, board: &mut B) -> Option<u8> {
        if self.ticks == 0 {
            rt_info!(self.log, now_us, "Synth ready ({})", self.engine.name());
        }
        self.ticks += 1;

        let function_level = board.read_pin(ButtonId::Function);
        if self.function_btn.poll(now_us, function_level).is_some() {
            self.engine.on_press(ButtonId::Function, now_us, self.log);
        }

        let play_level = board.read_pin(ButtonId::Play);
        if self.play_btn.poll(now_us, play_level).is_some() {
            self.engine.on_press(ButtonId::Play, now_us, self.log);
        }

        let out = self.engine.tick(now_us, board, self.log);

        let leds = self.engine.leds();
        if self.leds != Some(leds) {
            board.set_leds(leds);
            self.leds = Some(leds);
        }

        out
    }
}
