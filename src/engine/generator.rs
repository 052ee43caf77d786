//! Procedural engine: pot-controlled oscillator.
//!
//! Two orthogonal controls:
//! - Wave button cycles Sine → Square → Triangle → Sawtooth at any time
//! - Play button toggles generation on/off
//!
//! While paused the sink is held at the midpoint (silence) every tick,
//! without waiting for the sample clock. The oscillator phase survives
//! pause/resume.

use super::SampleEngine;
use crate::audio::{Oscillator, WaveformKind};
use crate::clock::SampleClock;
use crate::config::{SynthConfig, SILENCE_LEVEL};
use crate::hal::{AnalogChannel, AnalogInput, AudioSink, LedState};
use crate::input::{AnalogReader, ButtonId};
use crate::logging::LogStream;
use crate::rt_info;

/// Generator state: selected waveform, and whether it is sounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorState {
    /// Not playing; holds the selected waveform
    Idle(WaveformKind),
    /// Producing samples of the selected waveform
    Generating(WaveformKind),
}

impl GeneratorState {
    /// Selected waveform.
    #[inline]
    pub fn wave(self) -> WaveformKind {
        match self {
            GeneratorState::Idle(wave) | GeneratorState::Generating(wave) => wave,
        }
    }
}

/// Procedural waveform engine.
pub struct GeneratorEngine {
    config: SynthConfig,
    wave: WaveformKind,
    playing: bool,
    osc: Oscillator,
    clock: SampleClock,
    reader: AnalogReader,
    /// Ticks since start, for the status cadence
    ticks: u32,
}

impl GeneratorEngine {
    /// Create a paused generator (Sine, phase 0, lowest frequency).
    pub fn new(config: SynthConfig) -> Self {
        Self {
            config,
            wave: WaveformKind::default(),
            playing: false,
            osc: Oscillator::new(config.freq_min_hz, &config),
            clock: SampleClock::new(config.period_us()),
            reader: AnalogReader::new(&config),
            ticks: 0,
        }
    }

    /// Selected waveform.
    #[inline]
    pub fn wave(&self) -> WaveformKind {
        self.wave
    }

    /// True while generating.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Oscillator phase.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.osc.phase()
    }

    /// Frequency from the last pot reading.
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.reader.frequency()
    }

    /// Cycle to the next waveform; returns the new selection.
    pub fn select_next_wave(&mut self) -> WaveformKind {
        self.wave = self.wave.next();
        self.wave
    }

    /// Toggle generation; returns the new `playing` flag.
    pub fn toggle_playing(&mut self) -> bool {
        self.playing = !self.playing;
        if self.playing {
            // Fresh schedule, phase untouched
            self.clock.reset();
        }
        self.playing
    }

    /// Restart the oscillator at phase 0 and pause.
    pub fn reset(&mut self) {
        self.osc.reset();
        self.clock.reset();
        self.playing = false;
        self.ticks = 0;
    }

    fn report(&self, now_us: u64, log: &LogStream) {
        let mode = if self.playing { "playing" } else { "paused" };
        rt_info!(
            log,
            now_us,
            "Freq: {:.1} Hz | Wave: {} | {}",
            self.reader.frequency(),
            self.wave,
            mode
        );
    }
}

impl SampleEngine for GeneratorEngine {
    type State = GeneratorState;

    fn name(&self) -> &'static str {
        "generator"
    }

    fn state(&self) -> GeneratorState {
        if self.playing {
            GeneratorState::Generating(self.wave)
        } else {
            GeneratorState::Idle(self.wave)
        }
    }

    fn on_press(&mut self, button: ButtonId, now_us: u64, log: &LogStream) {
        match button {
            ButtonId::Function => {
                let wave = self.select_next_wave();
                rt_info!(log, now_us, "Waveform: {}", wave);
            }
            ButtonId::Play => {
                if self.toggle_playing() {
                    rt_info!(log, now_us, "Generator playing");
                } else {
                    rt_info!(log, now_us, "Generator paused");
                }
            }
        }
    }

    fn tick<B: AnalogInput + AudioSink>(
        &mut self,
        now_us: u64,
        board: &mut B,
        log: &LogStream,
    ) -> Option<u8> {
        // One pot read per tick, used for every decision below
        let raw = board.read_channel(AnalogChannel::Pot);
        self.reader.update(raw);
        self.osc.set_frequency(self.reader.frequency());

        self.ticks = self.ticks.wrapping_add(1);
        let every = self.config.gen_report_every;
        if every != 0 && self.ticks % every == 0 {
            self.report(now_us, log);
        }

        if !self.playing {
            board.write_level(SILENCE_LEVEL);
            return Some(SILENCE_LEVEL);
        }

        if !self.clock.poll(now_us) {
            return None;
        }

        let sample = self.osc.next_sample(self.wave);
        board.write_level(sample);
        Some(sample)
    }

    fn leds(&self) -> LedState {
        if self.playing {
            LedState::GREEN
        } else {
            LedState::OFF
        }
    }
}
