//! Buffer-mode engine: record from the microphone, then play back.
//!
//! ```text
//!         REC press              buffer full
//!   Idle ───────────▶ Recording ────────────▶ Idle
//!   Idle ───────────▶ Playing   ────────────▶ Idle
//!         PLAY press             buffer exhausted
//! ```
//!
//! Presses are ignored outside `Idle`: a running recording or playback
//! always runs to completion.

use super::SampleEngine;
use crate::audio::{ReadResult, SampleBuffer, WriteResult};
use crate::clock::SampleClock;
use crate::config::SynthConfig;
use crate::hal::{AnalogChannel, AnalogInput, AudioSink, LedState};
use crate::input::{to_level, ButtonId};
use crate::logging::LogStream;
use crate::rt_info;

/// Recorder state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Playing,
}

/// Record/playback engine over an `N`-sample buffer.
pub struct RecorderEngine<const N: usize> {
    config: SynthConfig,
    state: RecorderState,
    buffer: SampleBuffer<N>,
    /// Capture schedule
    rec_clock: SampleClock,
    /// Playback schedule
    play_clock: SampleClock,
}

impl<const N: usize> RecorderEngine<N> {
    /// Create an idle engine with a zeroed buffer.
    pub const fn new(config: SynthConfig) -> Self {
        let rate = if config.sample_rate == 0 { 1 } else { config.sample_rate };
        let period_us = 1_000_000 / rate as u64;

        Self {
            config,
            state: RecorderState::Idle,
            buffer: SampleBuffer::new(),
            rec_clock: SampleClock::new(period_us),
            play_clock: SampleClock::new(period_us),
        }
    }

    /// Buffer capacity in samples.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Rewind the write cursor and enter `Recording`.
    pub fn begin_recording(&mut self) {
        self.buffer.rewind_write();
        self.rec_clock.reset();
        self.state = RecorderState::Recording;
    }

    /// Quantize a raw ADC reading and store it.
    ///
    /// On `Full` the engine is already back in `Idle`.
    pub fn capture_one(&mut self, raw_sample: u16) -> WriteResult {
        let result = self.buffer.push(to_level(raw_sample));
        if result == WriteResult::Full {
            self.state = RecorderState::Idle;
        }
        result
    }

    /// Rewind the read cursor and enter `Playing`.
    pub fn begin_playback(&mut self) {
        self.buffer.rewind_read();
        self.play_clock.reset();
        self.state = RecorderState::Playing;
    }

    /// Fetch the next recorded sample.
    ///
    /// On `Exhausted` the engine is already back in `Idle`.
    pub fn play_one(&mut self) -> (u8, ReadResult) {
        let (sample, result) = self.buffer.pop();
        if result == ReadResult::Exhausted {
            self.state = RecorderState::Idle;
        }
        (sample, result)
    }

    /// Samples captured by the current/last recording.
    #[inline]
    pub fn recorded(&self) -> usize {
        self.buffer.written()
    }

    /// Samples played by the current/last playback.
    #[inline]
    pub fn played(&self) -> usize {
        self.buffer.played()
    }

    /// Recorded data (stale tail included).
    #[inline]
    pub fn samples(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    fn report_due(&self, count: usize) -> bool {
        let every = self.config.rec_report_every as usize;
        every != 0 && count % every == 0
    }

    fn tick_recording<B: AnalogInput>(&mut self, now_us: u64, board: &mut B, log: &LogStream) {
        if !self.rec_clock.poll(now_us) {
            return;
        }

        let raw = board.read_channel(AnalogChannel::Microphone);
        let result = self.capture_one(raw);

        let count = self.recorded();
        if self.report_due(count) {
            rt_info!(log, now_us, "[REC] {}/{} samples", count, N);
        }
        if result == WriteResult::Full {
            rt_info!(log, now_us, "Recording finished");
        }
    }

    fn tick_playing<B: AudioSink>(&mut self, now_us: u64, board: &mut B, log: &LogStream) -> Option<u8> {
        if !self.play_clock.poll(now_us) {
            return None;
        }

        let (sample, result) = self.play_one();
        board.write_level(sample);

        let count = self.played();
        if self.report_due(count) {
            rt_info!(log, now_us, "[PLAY] {}/{} samples", count, N);
        }
        if result == ReadResult::Exhausted {
            rt_info!(log, now_us, "Playback finished");
        }

        Some(sample)
    }
}

impl<const N: usize> SampleEngine for RecorderEngine<N> {
    type State = RecorderState;

    fn name(&self) -> &'static str {
        "recorder"
    }

    fn state(&self) -> RecorderState {
        self.state
    }

    fn on_press(&mut self, button: ButtonId, now_us: u64, log: &LogStream) {
        if self.state != RecorderState::Idle {
            return;
        }

        match button {
            ButtonId::Function => {
                self.begin_recording();
                rt_info!(log, now_us, "Recording started");
            }
            ButtonId::Play => {
                self.begin_playback();
                rt_info!(log, now_us, "Playback started");
            }
        }
    }

    fn tick<B: AnalogInput + AudioSink>(
        &mut self,
        now_us: u64,
        board: &mut B,
        log: &LogStream,
    ) -> Option<u8> {
        match self.state {
            RecorderState::Idle => None,
            RecorderState::Recording => {
                self.tick_recording(now_us, board, log);
                None
            }
            RecorderState::Playing => self.tick_playing(now_us, board, log),
        }
    }

    fn leds(&self) -> LedState {
        match self.state {
            RecorderState::Idle => LedState::OFF,
            RecorderState::Recording => LedState::RED,
            RecorderState::Playing => LedState::GREEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RecorderEngine<8> {
        RecorderEngine::new(SynthConfig::default())
    }

    #[test]
    fn test_capture_fills_then_idles() {
        let mut rec = engine();
        rec.begin_recording();
        assert_eq!(rec.state(), RecorderState::Recording);

        for i in 0..7u16 {
            assert_eq!(rec.capture_one(i << 4), WriteResult::Continuing);
            assert_eq!(rec.state(), RecorderState::Recording);
        }
        assert_eq!(rec.capture_one(7 << 4), WriteResult::Full);
        assert_eq!(rec.state(), RecorderState::Idle);
        assert_eq!(rec.samples(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_capture_quantizes_to_8_bit() {
        let mut rec = engine();
        rec.begin_recording();
        rec.capture_one(4095);
        rec.capture_one(2048);
        rec.capture_one(u16::MAX);
        assert_eq!(&rec.samples()[..3], &[255, 128, 255]);
    }

    #[test]
    fn test_press_ignored_while_busy() {
        let log: LogStream = LogStream::new();
        let mut rec = engine();

        rec.on_press(ButtonId::Function, 0, &log);
        assert_eq!(rec.state(), RecorderState::Recording);

        rec.on_press(ButtonId::Play, 1, &log);
        assert_eq!(rec.state(), RecorderState::Recording);

        rec.on_press(ButtonId::Function, 2, &log);
        assert_eq!(rec.state(), RecorderState::Recording);
        assert_eq!(log.pending(), 1);
    }

    #[test]
    fn test_leds_follow_state() {
        let mut rec = engine();
        assert_eq!(rec.leds(), LedState::OFF);
        rec.begin_recording();
        assert_eq!(rec.leds(), LedState::RED);
        rec.begin_playback();
        assert_eq!(rec.leds(), LedState::GREEN);
    }
}
