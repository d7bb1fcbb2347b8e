use chip8_vm::{
    create_state, deliver_key_press, is_waiting_for_key, load_program, run_headless, run_tick,
    Chip8Config, Chip8Error, FrameBuffer, Keypad, NullTone, ToneEmitter,
};

/// Records start/stop calls so tests can observe the sound-timer gate.
#[derive(Default)]
struct RecordingTone {
    started: Vec<u16>,
    stops: usize,
}

impl ToneEmitter for RecordingTone {
    fn start(&mut self, frequency_hz: u16) {
        self.started.push(frequency_hz);
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}

#[test]
fn tick_runs_exactly_the_instruction_quota() {
    let mut state = create_state();
    let mut display = FrameBuffer::new();
    let keypad = Keypad::new();
    let mut tone = NullTone;
    // Ten copies of "add 1 to V0".
    let program: Vec<u8> = [0x70u8, 0x01].repeat(10);
    load_program(&mut state, &program).unwrap();

    run_tick(
        &mut state,
        Chip8Config::default(),
        &mut display,
        &keypad,
        &mut tone,
    )
    .unwrap();

    assert_eq!(state.registers[0], 10);
    assert_eq!(state.pc, 0x214);
}

#[test]
fn tick_decrements_timers_once_and_gates_the_tone() {
    let mut state = create_state();
    let mut display = FrameBuffer::new();
    let keypad = Keypad::new();
    let mut tone = RecordingTone::default();
    state.delay_timer = 3;
    state.sound_timer = 2;

    run_tick(
        &mut state,
        Chip8Config::default(),
        &mut display,
        &keypad,
        &mut tone,
    )
    .unwrap();

    assert_eq!(state.delay_timer, 2);
    assert_eq!(state.sound_timer, 1);
    assert_eq!(tone.started, vec![440]);
    assert_eq!(tone.stops, 0);

    run_tick(
        &mut state,
        Chip8Config::default(),
        &mut display,
        &keypad,
        &mut tone,
    )
    .unwrap();

    assert_eq!(state.sound_timer, 0);
    assert_eq!(tone.started, vec![440]);
    assert_eq!(tone.stops, 1);
}

#[test]
fn paused_machine_burns_its_quota_and_freezes_timers() {
    let mut state = create_state();
    let mut display = FrameBuffer::new();
    let keypad = Keypad::new();
    let mut tone = NullTone;
    load_program(&mut state, &[0xF2, 0x0A]).unwrap();
    state.delay_timer = 5;

    run_tick(
        &mut state,
        Chip8Config::default(),
        &mut display,
        &keypad,
        &mut tone,
    )
    .unwrap();

    assert!(is_waiting_for_key(&state));
    assert_eq!(state.pc, 0x202);
    assert_eq!(state.delay_timer, 5);

    deliver_key_press(&mut state, 0xC);
    run_tick(
        &mut state,
        Chip8Config::default(),
        &mut display,
        &keypad,
        &mut tone,
    )
    .unwrap();

    assert_eq!(state.registers[2], 0xC);
    assert_eq!(state.delay_timer, 4);
}

#[test]
fn headless_run_executes_a_rom_file() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), [0x60, 0x2A, 0x12, 0x02]).unwrap();

    let run = run_headless(tmp.path(), 5, Chip8Config::default()).unwrap();

    assert_eq!(run.state.registers[0], 0x2A);
}

#[test]
fn headless_run_plots_sprites_into_the_framebuffer() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    // Draw the glyph for 0 at the origin, then spin.
    std::fs::write(tmp.path(), [0xD0, 0x05, 0x12, 0x02]).unwrap();

    let run = run_headless(tmp.path(), 2, Chip8Config::default()).unwrap();

    assert!(run.display.is_lit(0, 0));
    assert!(run.display.pixels().iter().any(|pixel| *pixel == 1));
}

#[test]
fn headless_run_surfaces_fatal_errors() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), [0x00, 0xEE]).unwrap();

    let result = run_headless(tmp.path(), 1, Chip8Config::default());

    assert!(matches!(
        result,
        Err(Chip8Error::StackUnderflow { pc: 0x200, .. })
    ));
}

#[test]
fn headless_run_rejects_a_zero_tick_count() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), [0x00, 0xE0]).unwrap();

    let result = run_headless(tmp.path(), 0, Chip8Config::default());

    assert!(matches!(result, Err(Chip8Error::InvalidArgument(_))));
}
