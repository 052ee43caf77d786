//! Hardware Abstraction Layer for RustPwmSynth.
//!
//! Core-facing traits for the board. Business logic stays in the core
//! modules and only sees these traits; the ESP-IDF adapters in `esp`
//! are thin wrappers around the peripherals.

pub mod audio;
pub mod gpio;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use audio::PwmConfig;
pub use gpio::PinConfig;

use crate::input::ButtonId;

/// Analog input channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalogChannel {
    /// Electret microphone (buffer mode)
    Microphone,
    /// Frequency potentiometer (procedural mode)
    Pot,
}

/// Indicator LED state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedState {
    pub red: bool,
    pub green: bool,
}

impl LedState {
    pub const OFF: LedState = LedState { red: false, green: false };
    pub const RED: LedState = LedState { red: true, green: false };
    pub const GREEN: LedState = LedState { red: false, green: true };
}

/// Button pins. Active-low with pull-up: `true` = released.
pub trait DigitalInput {
    fn read_pin(&mut self, button: ButtonId) -> bool;
}

/// 12-bit ADC. Readings are nominally 0..=4095; the core clamps anything above.
pub trait AnalogInput {
    fn read_channel(&mut self, channel: AnalogChannel) -> u16;
}

/// PWM audio output. Accepts an 8-bit level; the sink owns the duty-cycle hardware.
pub trait AudioSink {
    fn write_level(&mut self, value: u8);
}

/// Indicator LEDs.
pub trait StatusLeds {
    fn set_leds(&mut self, leds: LedState);
}

/// Monotonic microsecond clock.
pub trait Clock {
    fn now_us(&self) -> u64;

    /// Microseconds from `a` to `b` (zero if `b` is earlier).
    fn elapsed_us(&self, a: u64, b: u64) -> u64 {
        crate::clock::elapsed_us(a, b)
    }
}

/// Everything the controller touches in one tick.
pub trait Board: DigitalInput + AnalogInput + AudioSink + StatusLeds {}

impl<T: DigitalInput + AnalogInput + AudioSink + StatusLeds> Board for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_us(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_clock_elapsed_saturates() {
        let clock = FixedClock(1_000);
        assert_eq!(clock.elapsed_us(250, clock.now_us()), 750);
        assert_eq!(clock.elapsed_us(clock.now_us(), 250), 0);
    }

    #[test]
    fn test_led_presets() {
        assert_eq!(LedState::default(), LedState::OFF);
        assert!(LedState::RED.red && !LedState::RED.green);
        assert!(LedState::GREEN.green && !LedState::GREEN.red);
    }
}
