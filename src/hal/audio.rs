//! PWM audio output configuration.

/// PWM carrier for the audio DAC.
///
/// 8-bit resolution so a sample maps 1:1 to the duty register. The carrier
/// sits well above the audio band; an RC low-pass on the pin recovers the
/// signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PwmConfig {
    pub carrier_hz: u32,
    pub resolution_bits: u8,
}

impl PwmConfig {
    /// Largest duty value for the configured resolution.
    #[inline]
    pub fn max_duty(&self) -> u32 {
        (1u32 << self.resolution_bits) - 1
    }

    /// Duty register value for an 8-bit sample.
    #[inline]
    pub fn duty_for(&self, level: u8) -> u32 {
        level as u32 * self.max_duty() / 255
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            carrier_hz: 62_500,
            resolution_bits: 8,
        }
    }
}
