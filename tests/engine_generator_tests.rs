//! Procedural waveform engine tests

mod common;

use common::{messages, MockBoard};
use rust_pwm_synth::audio::WaveformKind;
use rust_pwm_synth::config::{SynthConfig, ADC_MAX, SILENCE_LEVEL};
use rust_pwm_synth::engine::{GeneratorEngine, GeneratorState, SampleEngine};
use rust_pwm_synth::hal::LedState;
use rust_pwm_synth::input::ButtonId;
use rust_pwm_synth::logging::LogStream;

#[test]
fn test_paused_writes_silence_every_tick() {
    let log: LogStream = LogStream::new();
    let mut gen = GeneratorEngine::new(SynthConfig::default());
    let mut board = MockBoard::default();

    for t in 0..50u64 {
        assert_eq!(gen.tick(t * 10, &mut board, &log), Some(SILENCE_LEVEL));
    }
    assert_eq!(board.written, vec![SILENCE_LEVEL; 50]);
    assert_eq!(board.pot_reads, 50);
    assert_eq!(gen.phase(), 0.0);
}

#[test]
fn test_playing_emits_one_sample_per_period() {
    let log: LogStream = LogStream::new();
    let mut gen = GeneratorEngine::new(SynthConfig::default());
    let mut board = MockBoard::default();

    gen.on_press(ButtonId::Play, 0, &log);
    let produced = (0..1000u64)
        .filter_map(|i| gen.tick(i * 10, &mut board, &log))
        .count();

    // 10 ms at 8 kHz
    assert_eq!(produced, 80);
    assert_eq!(board.written.len(), 80);
}

#[test]
fn test_pot_sets_frequency_every_tick() {
    let log: LogStream = LogStream::new();
    let mut gen = GeneratorEngine::new(SynthConfig::default());
    let mut board = MockBoard::default();

    gen.tick(0, &mut board, &log);
    assert_eq!(gen.frequency(), 220.0);

    board.pot = ADC_MAX;
    gen.tick(10, &mut board, &log);
    assert_eq!(gen.frequency(), 1100.0);

    // Out-of-range readings clamp to the top of the scale
    board.pot = u16::MAX;
    gen.tick(20, &mut board, &log);
    assert_eq!(gen.frequency(), 1100.0);
}

#[test]
fn test_sawtooth_tracks_pot() {
    let log: LogStream = LogStream::new();
    let mut gen = GeneratorEngine::new(SynthConfig::default());
    let mut board = MockBoard {
        pot: ADC_MAX,
        ..Default::default()
    };

    gen.on_press(ButtonId::Function, 0, &log); // Square
    gen.on_press(ButtonId::Function, 0, &log); // Triangle
    gen.on_press(ButtonId::Function, 0, &log); // Sawtooth
    gen.on_press(ButtonId::Play, 0, &log);
    assert_eq!(gen.state(), GeneratorState::Generating(WaveformKind::Sawtooth));

    let samples: Vec<u8> = (0..4u64)
        .filter_map(|i| gen.tick(i * 125, &mut board, &log))
        .collect();

    // 1100 Hz at 8 kHz: 0.1375 per sample
    assert_eq!(samples, vec![0, 35, 70, 105]);
}

#[test]
fn test_phase_survives_pause() {
    let log: LogStream = LogStream::new();
    let mut gen = GeneratorEngine::new(SynthConfig::default());
    let mut board = MockBoard::default();

    gen.on_press(ButtonId::Play, 0, &log);
    for i in 0..5u64 {
        gen.tick(i * 125, &mut board, &log);
    }
    let phase = gen.phase();
    assert!(phase > 0.0);

    gen.on_press(ButtonId::Play, 1000, &log);
    for i in 0..20u64 {
        assert_eq!(gen.tick(1000 + i * 125, &mut board, &log), Some(SILENCE_LEVEL));
    }
    assert_eq!(gen.phase(), phase);

    gen.on_press(ButtonId::Play, 5000, &log);
    gen.tick(5000, &mut board, &log);
    assert!(gen.phase() != phase);
}

#[test]
fn test_status_line_every_500_ticks() {
    let log: LogStream = LogStream::new();
    let mut gen = GeneratorEngine::new(SynthConfig::default());
    let mut board = MockBoard::default();

    for i in 0..1000u64 {
        if i == 600 {
            board.pot = ADC_MAX;
        }
        gen.tick(i * 10, &mut board, &log);
    }

    assert_eq!(
        messages(&log),
        vec![
            "Freq: 220.0 Hz | Wave: Sine | paused",
            "Freq: 1100.0 Hz | Wave: Sine | paused",
        ]
    );
}

#[test]
fn test_button_messages() {
    let log: LogStream = LogStream::new();
    let mut gen = GeneratorEngine::new(SynthConfig::default());

    gen.on_press(ButtonId::Function, 0, &log);
    gen.on_press(ButtonId::Play, 1, &log);
    gen.on_press(ButtonId::Play, 2, &log);

    assert_eq!(
        messages(&log),
        vec!["Waveform: Square", "Generator playing", "Generator paused"]
    );
}

#[test]
fn test_leds_show_playing() {
    let log: LogStream = LogStream::new();
    let mut gen = GeneratorEngine::new(SynthConfig::default());
    assert_eq!(gen.leds(), LedState::OFF);
    gen.on_press(ButtonId::Play, 0, &log);
    assert_eq!(gen.leds(), LedState::GREEN);
}
