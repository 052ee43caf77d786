//! Pin assignment for the synth front panel.

/// GPIO numbers used by the firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinConfig {
    /// REC / wave-select button (pull-up, active low)
    pub function_btn: i32,
    /// PLAY button (pull-up, active low)
    pub play_btn: i32,
    pub led_red: i32,
    pub led_green: i32,
    /// PWM audio output
    pub audio_out: i32,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            function_btn: 14,
            play_btn: 15,
            led_red: 16,
            led_green: 17,
            audio_out: 18,
        }
    }
}
