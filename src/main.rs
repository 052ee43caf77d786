//! RustPwmSynth - Main entry point
//!
//! On the board: bring up buttons, ADC, PWM and LEDs, then poll the
//! controller forever, draining status lines to UART between ticks.
//!
//! On the host: run a scripted session against a simulated board and
//! print the status lines. `synth generator` runs the waveform engine,
//! anything else the recorder.

#[cfg(target_os = "espidf")]
mod firmware {
    #[cfg(not(feature = "generator"))]
    use core::cell::UnsafeCell;
    #[cfg(not(feature = "generator"))]
    use core::sync::atomic::{AtomicBool, Ordering};

    use esp_idf_svc::hal::adc::attenuation::DB_11;
    use esp_idf_svc::hal::adc::oneshot::config::AdcChannelConfig;
    use esp_idf_svc::hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver};
    use esp_idf_svc::hal::ledc::config::TimerConfig;
    use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::prelude::*;
    use esp_idf_svc::hal::uart::UartTxDriver;
    use esp_idf_svc::sys::EspError;
    #[cfg(not(feature = "generator"))]
    use esp_idf_svc::sys::ESP_ERR_INVALID_STATE;

    use rust_pwm_synth::clock::elapsed_us;
    use rust_pwm_synth::hal::esp::{EspBoard, EspClock};
    use rust_pwm_synth::hal::{Clock, LedState, PinConfig, PwmConfig};
    use rust_pwm_synth::uart_logger::{drain_to_uart, init_uart_logger, report_dropped, UartLoggerConfig};
    use rust_pwm_synth::{rt_warn, SampleEngine, SynthConfig, SynthController, STATUS_LOG};

    /// Yield to FreeRTOS at least this often while audio is running.
    const YIELD_EVERY_US: u64 = 1_000_000;

    /// Dropped-message report interval.
    const DROP_REPORT_US: u64 = 10_000_000;

    // Static storage handed out once as `&'static mut`.
    // The 16 KB recording buffer does not fit on the main task stack.
    #[cfg(not(feature = "generator"))]
    struct SyncCell<T> {
        value: UnsafeCell<T>,
        taken: AtomicBool,
    }

    // SAFETY: the value is only reachable through `take()`, which hands
    // out at most one reference for the lifetime of the program.
    #[cfg(not(feature = "generator"))]
    unsafe impl<T: Send> Sync for SyncCell<T> {}

    #[cfg(not(feature = "generator"))]
    impl<T> SyncCell<T> {
        const fn new(value: T) -> Self {
            Self {
                value: UnsafeCell::new(value),
                taken: AtomicBool::new(false),
            }
        }

        fn take(&'static self) -> Option<&'static mut T> {
            if self.taken.swap(true, Ordering::AcqRel) {
                return None;
            }
            // SAFETY: first and only call gets the reference.
            Some(unsafe { &mut *self.value.get() })
        }
    }

    #[cfg(not(feature = "generator"))]
    static RECORDER: SyncCell<
        rust_pwm_synth::RecorderEngine<{ rust_pwm_synth::config::BUFFER_CAPACITY }>,
    > = SyncCell::new(rust_pwm_synth::RecorderEngine::new(SynthConfig::DEFAULT));

    fn resolution(bits: u8) -> Resolution {
        match bits {
            10 => Resolution::Bits10,
            12 => Resolution::Bits12,
            _ => Resolution::Bits8,
        }
    }

    pub fn run() -> Result<(), EspError> {
        let peripherals = Peripherals::take()?;
        let pins = PinConfig::default();
        let pwm_config = PwmConfig::default();
        let config = SynthConfig::DEFAULT;

        let mut uart = init_uart_logger(
            peripherals.uart1,
            peripherals.pins.gpio21,
            &UartLoggerConfig::default(),
        )?;
        let _ = uart.write(concat!(env!("VERSION_STRING"), "\n").as_bytes());

        // SAFETY: these GPIO numbers are not taken from `peripherals.pins`
        // anywhere else, so each pin has exactly one driver.
        let (function_pin, play_pin, red_pin, green_pin, audio_pin) = unsafe {
            (
                AnyIOPin::new(pins.function_btn),
                AnyIOPin::new(pins.play_btn),
                AnyOutputPin::new(pins.led_red),
                AnyOutputPin::new(pins.led_green),
                AnyOutputPin::new(pins.audio_out),
            )
        };

        let timer = LedcTimerDriver::new(
            peripherals.ledc.timer0,
            &TimerConfig::new()
                .frequency(pwm_config.carrier_hz.Hz())
                .resolution(resolution(pwm_config.resolution_bits)),
        )?;
        let pwm = LedcDriver::new(peripherals.ledc.channel0, &timer, audio_pin)?;

        let adc = AdcDriver::new(peripherals.adc1)?;
        let adc_config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        let mic = AdcChannelDriver::new(&adc, peripherals.pins.gpio4, &adc_config)?;
        let pot = AdcChannelDriver::new(&adc, peripherals.pins.gpio5, &adc_config)?;

        let mut board = EspBoard::new(
            PinDriver::input(function_pin)?,
            PinDriver::input(play_pin)?,
            mic,
            pot,
            pwm,
            pwm_config,
            PinDriver::output(red_pin)?,
            PinDriver::output(green_pin)?,
        )?;

        #[cfg(feature = "generator")]
        let engine = rust_pwm_synth::GeneratorEngine::new(config);
        #[cfg(not(feature = "generator"))]
        let engine = RECORDER
            .take()
            .ok_or_else(EspError::from_infallible::<{ ESP_ERR_INVALID_STATE as i32 }>)?;

        serve(engine, &config, &mut board, &mut uart)
    }

    fn serve<E: SampleEngine>(
        engine: E,
        config: &SynthConfig,
        board: &mut EspBoard<'_>,
        uart: &mut UartTxDriver<'_>,
    ) -> Result<(), EspError> {
        let clock = EspClock;
        let mut synth = SynthController::with_config(engine, &STATUS_LOG, config);

        let mut last_yield = clock.now_us();
        let mut last_drop_report = last_yield;
        let mut reported_errors = 0;

        loop {
            let now = clock.now_us();
            synth.tick(now, board);

            if STATUS_LOG.has_entries() {
                drain_to_uart(uart, &STATUS_LOG);
            }

            if elapsed_us(last_drop_report, now) >= DROP_REPORT_US {
                report_dropped(&STATUS_LOG, |line| {
                    let _ = uart.write(line);
                });
                if board.errors() != reported_errors {
                    reported_errors = board.errors();
                    rt_warn!(STATUS_LOG, now, "Driver errors: {}", reported_errors);
                }
                last_drop_report = now;
            }

            // Sleeping costs a FreeRTOS tick of audio, so only do it when
            // nothing is sounding or the idle task is starving.
            let busy = synth.engine().leds() != LedState::OFF;
            if !busy || elapsed_us(last_yield, now) >= YIELD_EVERY_US {
                FreeRtos::delay_ms(1);
                last_yield = clock.now_us();
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::io::{self, Write};

    use rust_pwm_synth::config::{ADC_MAX, BUFFER_CAPACITY};
    use rust_pwm_synth::hal::{AnalogChannel, AnalogInput, AudioSink, DigitalInput, LedState, StatusLeds};
    use rust_pwm_synth::input::ButtonId;
    use rust_pwm_synth::uart_logger::{drain_log, report_dropped};
    use rust_pwm_synth::{GeneratorEngine, RecorderEngine, SampleEngine, SynthConfig, SynthController, STATUS_LOG};

    /// Simulated poll interval.
    const TICK_US: u64 = 50;

    /// Contact bounce after a press, in microseconds.
    const BOUNCE_US: u64 = 2_000;

    /// A scripted button press.
    #[derive(Clone, Copy, Debug)]
    struct Press {
        button: ButtonId,
        at_us: u64,
        hold_us: u64,
    }

    impl Press {
        const fn new(button: ButtonId, at_ms: u64) -> Self {
            Self {
                button,
                at_us: at_ms * 1000,
                hold_us: 50_000,
            }
        }

        /// Pin level at `now_us` (true = released). Chatters for the first
        /// `BOUNCE_US` of the press.
        fn level(&self, now_us: u64) -> Option<bool> {
            if now_us < self.at_us || now_us >= self.at_us + self.hold_us {
                return None;
            }
            let into = now_us - self.at_us;
            if into < BOUNCE_US {
                Some((into / 300) % 2 == 1)
            } else {
                Some(false)
            }
        }
    }

    /// Board fed from a script: bouncing buttons, a 440 Hz tone on the
    /// microphone and a pot swept across its range.
    struct SimBoard {
        now_us: u64,
        end_us: u64,
        presses: Vec<Press>,
        written: u64,
        min_level: u8,
        max_level: u8,
        leds: LedState,
    }

    impl SimBoard {
        fn new(presses: Vec<Press>, end_us: u64) -> Self {
            Self {
                now_us: 0,
                end_us,
                presses,
                written: 0,
                min_level: u8::MAX,
                max_level: 0,
                leds: LedState::OFF,
            }
        }
    }

    impl DigitalInput for SimBoard {
        fn read_pin(&mut self, button: ButtonId) -> bool {
            self.presses
                .iter()
                .filter(|p| p.button == button)
                .find_map(|p| p.level(self.now_us))
                .unwrap_or(true)
        }
    }

    impl AnalogInput for SimBoard {
        fn read_channel(&mut self, channel: AnalogChannel) -> u16 {
            match channel {
                AnalogChannel::Microphone => {
                    let t = self.now_us as f32 / 1_000_000.0;
                    let v = 2048.0 + 1500.0 * (core::f32::consts::TAU * 440.0 * t).sin();
                    v as u16
                }
                AnalogChannel::Pot => {
                    let span = self.end_us.max(1);
                    (self.now_us.min(span) * ADC_MAX as u64 / span) as u16
                }
            }
        }
    }

    impl AudioSink for SimBoard {
        fn write_level(&mut self, value: u8) {
            self.written += 1;
            self.min_level = self.min_level.min(value);
            self.max_level = self.max_level.max(value);
        }
    }

    impl StatusLeds for SimBoard {
        fn set_leds(&mut self, leds: LedState) {
            self.leds = leds;
        }
    }

    fn simulate<E: SampleEngine>(engine: E, board: &mut SimBoard) {
        let config = SynthConfig::default();
        let mut synth = SynthController::with_config(engine, &STATUS_LOG, &config);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut emit = |line: &[u8]| {
            let _ = out.write_all(line);
        };

        let mut now = 0;
        while now < board.end_us {
            board.now_us = now;
            synth.tick(now, board);
            drain_log(&STATUS_LOG, &mut emit);
            now += TICK_US;
        }
        report_dropped(&STATUS_LOG, &mut emit);

        println!(
            "-- {} ticks, {} samples written, levels {}..={}, final state {:?}, leds {:?}",
            synth.ticks(),
            board.written,
            board.min_level,
            board.max_level,
            synth.state(),
            board.leds,
        );
    }

    /// Record 2 s of tone, then play it back.
    pub fn run_recorder() {
        let mut board = SimBoard::new(
            vec![
                Press::new(ButtonId::Function, 100),
                // Ignored: recording in progress
                Press::new(ButtonId::Play, 1_000),
                Press::new(ButtonId::Play, 2_500),
            ],
            5_000_000,
        );
        let mut engine = Box::new(RecorderEngine::<BUFFER_CAPACITY>::new(SynthConfig::DEFAULT));
        simulate(&mut *engine, &mut board);
    }

    /// Start the oscillator, cycle through the waveforms, pause.
    pub fn run_generator() {
        let mut board = SimBoard::new(
            vec![
                Press::new(ButtonId::Play, 50),
                Press::new(ButtonId::Function, 1_000),
                Press::new(ButtonId::Function, 2_000),
                Press::new(ButtonId::Function, 3_000),
                Press::new(ButtonId::Play, 4_000),
            ],
            4_500_000,
        );
        simulate(GeneratorEngine::new(SynthConfig::default()), &mut board);
    }
}

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    esp_idf_svc::sys::link_patches();
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    println!("{}", env!("VERSION_STRING"));
    match std::env::args().nth(1).as_deref() {
        Some("generator") => sim::run_generator(),
        _ => sim::run_recorder(),
    }
}
