//! Shared test board.

#![allow(dead_code)]

use rust_pwm_synth::hal::{AnalogChannel, AnalogInput, AudioSink, DigitalInput, LedState, StatusLeds};
use rust_pwm_synth::input::ButtonId;
use rust_pwm_synth::logging::LogStream;

/// In-memory board: pins and ADC values set by the test, sink writes
/// and LED changes recorded.
#[derive(Default)]
pub struct MockBoard {
    pub function_down: bool,
    pub play_down: bool,
    pub mic: u16,
    pub pot: u16,
    pub mic_reads: u32,
    pub pot_reads: u32,
    pub written: Vec<u8>,
    pub leds: Vec<LedState>,
}

impl DigitalInput for MockBoard {
    fn read_pin(&mut self, button: ButtonId) -> bool {
        match button {
            ButtonId::Function => !self.function_down,
            ButtonId::Play => !self.play_down,
        }
    }
}

impl AnalogInput for MockBoard {
    fn read_channel(&mut self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::Microphone => {
                self.mic_reads += 1;
                self.mic
            }
            AnalogChannel::Pot => {
                self.pot_reads += 1;
                self.pot
            }
        }
    }
}

impl AudioSink for MockBoard {
    fn write_level(&mut self, value: u8) {
        self.written.push(value);
    }
}

impl StatusLeds for MockBoard {
    fn set_leds(&mut self, leds: LedState) {
        self.leds.push(leds);
    }
}

/// Drain every message from `log`.
pub fn messages<const N: usize>(log: &LogStream<N>) -> Vec<String> {
    let mut out = Vec::new();
    while let Some(entry) = log.drain() {
        out.push(entry.message().to_string());
    }
    out
}
