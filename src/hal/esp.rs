//! ESP-IDF board adapter.
//!
//! Thin wrappers: every trait method is one driver call. Driver errors in
//! the tick path are counted and otherwise ignored; a failed ADC read
//! reports the previous value.

use esp_idf_svc::hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_svc::hal::adc::ADC1;
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, Gpio4, Gpio5, Input, Output, PinDriver, Pull};
use esp_idf_svc::hal::ledc::LedcDriver;
use esp_idf_svc::sys::EspError;

use super::{AnalogChannel, AnalogInput, AudioSink, Clock, DigitalInput, LedState, PwmConfig, StatusLeds};
use crate::input::ButtonId;

type AdcRef<'d> = &'d AdcDriver<'d, ADC1>;

/// Buttons, ADC channels, PWM output and LEDs of the synth board.
pub struct EspBoard<'d> {
    function_btn: PinDriver<'d, AnyIOPin, Input>,
    play_btn: PinDriver<'d, AnyIOPin, Input>,
    mic: AdcChannelDriver<'d, Gpio4, AdcRef<'d>>,
    pot: AdcChannelDriver<'d, Gpio5, AdcRef<'d>>,
    pwm: LedcDriver<'d>,
    pwm_config: PwmConfig,
    led_red: PinDriver<'d, AnyOutputPin, Output>,
    led_green: PinDriver<'d, AnyOutputPin, Output>,
    last_mic: u16,
    last_pot: u16,
    errors: u32,
}

impl<'d> EspBoard<'d> {
    /// Wrap already-created drivers. Button pins get their pull-ups here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mut function_btn: PinDriver<'d, AnyIOPin, Input>,
        mut play_btn: PinDriver<'d, AnyIOPin, Input>,
        mic: AdcChannelDriver<'d, Gpio4, AdcRef<'d>>,
        pot: AdcChannelDriver<'d, Gpio5, AdcRef<'d>>,
        pwm: LedcDriver<'d>,
        pwm_config: PwmConfig,
        led_red: PinDriver<'d, AnyOutputPin, Output>,
        led_green: PinDriver<'d, AnyOutputPin, Output>,
    ) -> Result<Self, EspError> {
        function_btn.set_pull(Pull::Up)?;
        play_btn.set_pull(Pull::Up)?;

        Ok(Self {
            function_btn,
            play_btn,
            mic,
            pot,
            pwm,
            pwm_config,
            led_red,
            led_green,
            last_mic: 0,
            last_pot: 0,
            errors: 0,
        })
    }

    /// Driver calls that failed since boot.
    pub fn errors(&self) -> u32 {
        self.errors
    }

    fn note<T>(&mut self, result: Result<T, EspError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(_) => {
                self.errors = self.errors.wrapping_add(1);
                None
            }
        }
    }
}

impl DigitalInput for EspBoard<'_> {
    fn read_pin(&mut self, button: ButtonId) -> bool {
        match button {
            ButtonId::Function => self.function_btn.is_high(),
            ButtonId::Play => self.play_btn.is_high(),
        }
    }
}

impl AnalogInput for EspBoard<'_> {
    fn read_channel(&mut self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::Microphone => {
                let result = self.mic.read();
                if let Some(raw) = self.note(result) {
                    self.last_mic = raw;
                }
                self.last_mic
            }
            AnalogChannel::Pot => {
                let result = self.pot.read();
                if let Some(raw) = self.note(result) {
                    self.last_pot = raw;
                }
                self.last_pot
            }
        }
    }
}

impl AudioSink for EspBoard<'_> {
    fn write_level(&mut self, value: u8) {
        let duty = self.pwm_config.duty_for(value);
        let result = self.pwm.set_duty(duty);
        self.note(result);
    }
}

impl StatusLeds for EspBoard<'_> {
    fn set_leds(&mut self, leds: LedState) {
        let red = self.led_red.set_level(leds.red.into());
        self.note(red);
        let green = self.led_green.set_level(leds.green.into());
        self.note(green);
    }
}

/// `esp_timer` microsecond clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct EspClock;

impl Clock for EspClock {
    fn now_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time has no preconditions once IDF is up.
        let t = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        t.max(0) as u64
    }
}
