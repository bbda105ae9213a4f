use std::time::Duration;

use ansi_stage::demo::Demo;
use ansi_stage::engine::{Engine, EngineConfig, ManualClock};
use ansi_stage::input::ScriptedInput;
use ansi_stage::term::{MemorySink, OutputSink};
use ansi_stage::types::Size;

fn engine(
    input: ScriptedInput,
    clock: &ManualClock,
    config: EngineConfig,
) -> Engine<ScriptedInput, MemorySink, ManualClock> {
    Engine::with_clock(input, MemorySink::new(Size::new(60, 20)), config, clock.clone())
}

#[test]
fn idle_scene_renders_once() {
    let clock = ManualClock::new();
    let mut demo = Demo::new();
    let mut eng = engine(ScriptedInput::new(), &clock, EngineConfig::default());
    eng.initialize(&mut demo).unwrap();

    assert!(eng.step(&mut demo).rendered);
    for _ in 0..20 {
        clock.advance(Duration::from_millis(100));
        let report = eng.step(&mut demo);
        assert_eq!(report.ticks, 1);
        assert!(!report.rendered);
    }
    assert_eq!(eng.output().flush_count(), 1);
}

#[test]
fn repeated_key_without_effect_skips_render() {
    let clock = ManualClock::new();
    let mut input = ScriptedInput::new();
    input.push_bytes(b"xx");
    let mut demo = Demo::new();
    let mut eng = engine(input, &clock, EngineConfig::default());
    eng.initialize(&mut demo).unwrap();

    assert!(eng.step(&mut demo).rendered);
    assert_eq!(demo.status(), "key 'x'");

    let report = eng.step(&mut demo);
    assert!(report.input);
    assert!(!report.rendered);
}

#[test]
fn buffered_frame_is_invisible_until_flush() {
    let clock = ManualClock::new();
    let mut demo = Demo::new();
    let mut eng = engine(ScriptedInput::new(), &clock, EngineConfig::default());
    eng.initialize(&mut demo).unwrap();
    eng.step(&mut demo);

    // The whole frame arrived in a single flush.
    assert_eq!(eng.output().flush_count(), 1);
    assert!(eng.output().pending().is_empty());
    assert_eq!(eng.output().frame().text_at(6, 5, 11), "Hello World");
}

#[test]
fn long_stall_is_capped() {
    let clock = ManualClock::new();
    let mut demo = Demo::new();
    let mut eng = engine(ScriptedInput::new(), &clock, EngineConfig::default());
    eng.initialize(&mut demo).unwrap();
    eng.step(&mut demo);

    clock.advance(Duration::from_secs(3));
    assert_eq!(eng.step(&mut demo).ticks, 5);
    clock.advance(Duration::from_millis(99));
    assert_eq!(eng.step(&mut demo).ticks, 0);
}

#[test]
fn unbuffered_output_still_flushes_per_frame() {
    let clock = ManualClock::new();
    let config = EngineConfig {
        buffered: false,
        ..EngineConfig::default()
    };
    let mut demo = Demo::new();
    let mut eng = engine(ScriptedInput::new(), &clock, config);
    eng.initialize(&mut demo).unwrap();
    eng.step(&mut demo);

    assert!(!eng.output().is_buffered());
    assert_eq!(eng.output().frame().text_at(6, 5, 11), "Hello World");
}
