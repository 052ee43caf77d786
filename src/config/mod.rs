//! Module: config
//!
//! Purpose: Build-time configuration for RustPwmSynth.
//!
//! Architecture:
//! - Constants: fixed at compile time, sized for the target (16 kB buffer)
//! - `SynthConfig`: value type carrying the same numbers at runtime so
//!   engines and tests can be built with non-default rates
//!
//! Safety: Safe. Copy types only.

/// Audio sample rate in Hz.
pub const SAMPLE_RATE_HZ: u32 = 8000;

/// Recording length in buffer mode.
pub const RECORD_SECONDS: u32 = 2;

/// Recording buffer capacity in samples (8000 Hz x 2 s).
pub const BUFFER_CAPACITY: usize = (SAMPLE_RATE_HZ * RECORD_SECONDS) as usize;

/// Largest raw reading of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// Largest output level (8-bit PWM duty).
pub const OUTPUT_MAX: u8 = 255;

/// Output level driven while the generator is paused.
pub const SILENCE_LEVEL: u8 = 128;

/// Lowest generator frequency (pot fully counter-clockwise).
pub const FREQ_MIN_HZ: f32 = 220.0;

/// Span added on top of `FREQ_MIN_HZ` at full pot travel (220..1100 Hz).
pub const FREQ_RANGE_HZ: f32 = 880.0;

/// Minimum time between two recognized presses of the same button.
pub const DEBOUNCE_MS: u32 = 200;

/// Buffer mode: progress report cadence, in samples.
pub const REC_REPORT_EVERY: u32 = 1000;

/// Procedural mode: status report cadence, in ticks.
pub const GEN_REPORT_EVERY: u32 = 500;

/// Synthesizer configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,

    /// Generator frequency at raw ADC 0.
    pub freq_min_hz: f32,

    /// Generator frequency span over the full ADC range.
    pub freq_range_hz: f32,

    /// Debounce re-arm delay in milliseconds.
    pub debounce_ms: u32,

    /// Samples between buffer-mode progress reports.
    pub rec_report_every: u32,

    /// Ticks between generator status reports.
    pub gen_report_every: u32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SynthConfig {
    /// Build-time defaults, usable in const context (static engines).
    pub const DEFAULT: SynthConfig = SynthConfig {
        sample_rate: SAMPLE_RATE_HZ,
        freq_min_hz: FREQ_MIN_HZ,
        freq_range_hz: FREQ_RANGE_HZ,
        debounce_ms: DEBOUNCE_MS,
        rec_report_every: REC_REPORT_EVERY,
        gen_report_every: GEN_REPORT_EVERY,
    };

    /// Create config for given sample rate with default settings.
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    /// Sampling period in microseconds (125 at 8 kHz).
    #[inline]
    pub fn period_us(&self) -> u64 {
        1_000_000 / self.sample_rate.max(1) as u64
    }

    /// Debounce re-arm delay in microseconds.
    #[inline]
    pub fn debounce_us(&self) -> u64 {
        self.debounce_ms as u64 * 1000
    }

    /// Samples needed to hold `seconds` of audio.
    #[inline]
    pub fn buffer_capacity(&self, seconds: u32) -> usize {
        (self.sample_rate as usize).saturating_mul(seconds as usize)
    }

    /// Highest frequency the generator accepts (Nyquist).
    #[inline]
    pub fn max_frequency_hz(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }

    /// Phase increment per sample for `freq_hz`.
    ///
    /// The frequency is clamped to `[0, sample_rate / 2]`, so the step is
    /// at most 0.5 and a single subtraction re-normalizes the phase.
    #[inline]
    pub fn phase_step(&self, freq_hz: f32) -> f32 {
        let freq = freq_hz.clamp(0.0, self.max_frequency_hz());
        freq / self.sample_rate.max(1) as f32
    }
}
