use std::path::Path;

use log::warn;

use crate::chip8::config::{Chip8Config, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::chip8::error::Chip8Error;
use crate::chip8::ports::{FrameBuffer, KeySource, Keypad, NullTone, ToneEmitter};
use crate::chip8::scheduler::run_tick;
use crate::chip8::state::{create_state, deliver_key_press, load_rom, EmulatorState};

/// Final machine and pixel state of a headless run, for inspection.
pub struct HeadlessRun {
    pub state: EmulatorState,
    pub display: FrameBuffer,
}

/// Run a rom for a fixed number of ticks with no window, no keys held, and
/// no audio device.
pub fn run_headless(
    rom_path: &Path,
    max_ticks: usize,
    cfg: Chip8Config,
) -> Result<HeadlessRun, Chip8Error> {
    if max_ticks == 0 {
        return Err(Chip8Error::InvalidArgument("max_ticks must be > 0"));
    }
    if cfg.instructions_per_tick == 0 {
        return Err(Chip8Error::InvalidArgument(
            "instructions_per_tick must be > 0",
        ));
    }

    let mut state = create_state();
    load_rom(&mut state, rom_path)?;

    let mut display = FrameBuffer::new();
    let keypad = Keypad::new();
    let mut tone = NullTone;

    for _ in 0..max_ticks {
        run_tick(&mut state, cfg, &mut display, &keypad, &mut tone)?;
    }

    Ok(HeadlessRun { state, display })
}

/// Tone emitter backed by the system beep. Start/stop failures are logged
/// and otherwise ignored; a machine without a beeper still runs.
#[derive(Debug, Default)]
pub struct Beeper {
    sounding: bool,
}

impl ToneEmitter for Beeper {
    fn start(&mut self, frequency_hz: u16) {
        if self.sounding {
            return;
        }
        match beep::beep(frequency_hz) {
            Ok(()) => self.sounding = true,
            Err(error) => warn!("failed to start tone: {error}"),
        }
    }

    fn stop(&mut self) {
        if !self.sounding {
            return;
        }
        if let Err(error) = beep::beep(0) {
            warn!("failed to stop tone: {error}");
        }
        self.sounding = false;
    }
}

/// Run a rom in a raylib window at the given pixel scale, driving one
/// scheduler tick per rendered frame.
pub fn run_app(
    rom_path: &Path,
    scale: usize,
    target_fps: usize,
    cfg: Chip8Config,
) -> Result<EmulatorState, Chip8Error> {
    use raylib::prelude::{Color, KeyboardKey, RaylibDraw};

    if scale == 0 {
        return Err(Chip8Error::InvalidArgument("scale must be > 0"));
    }
    if target_fps == 0 {
        return Err(Chip8Error::InvalidArgument("target_fps must be > 0"));
    }
    if cfg.instructions_per_tick == 0 {
        return Err(Chip8Error::InvalidArgument(
            "instructions_per_tick must be > 0",
        ));
    }

    let mut state = create_state();
    load_rom(&mut state, rom_path)?;

    let mut display = FrameBuffer::new();
    let mut keypad = Keypad::new();
    let mut tone = Beeper::default();

    let width = (SCREEN_WIDTH * scale) as i32;
    let height = (SCREEN_HEIGHT * scale) as i32;
    let (mut rl, thread) = raylib::init().size(width, height).title("chip8-vm").build();
    rl.set_target_fps(target_fps as u32);

    let key_map = [
        (KeyboardKey::KEY_ONE, 0x1u8),
        (KeyboardKey::KEY_TWO, 0x2),
        (KeyboardKey::KEY_THREE, 0x3),
        (KeyboardKey::KEY_FOUR, 0xC),
        (KeyboardKey::KEY_Q, 0x4),
        (KeyboardKey::KEY_W, 0x5),
        (KeyboardKey::KEY_E, 0x6),
        (KeyboardKey::KEY_R, 0xD),
        (KeyboardKey::KEY_A, 0x7),
        (KeyboardKey::KEY_S, 0x8),
        (KeyboardKey::KEY_D, 0x9),
        (KeyboardKey::KEY_F, 0xE),
        (KeyboardKey::KEY_Z, 0xA),
        (KeyboardKey::KEY_X, 0x0),
        (KeyboardKey::KEY_C, 0xB),
        (KeyboardKey::KEY_V, 0xF),
    ];

    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            break;
        }

        for (key, code) in key_map {
            let down = rl.is_key_down(key);
            // Rising edges feed the Fx0A wait; held state feeds Ex9E/ExA1.
            if down && !keypad.is_pressed(code) {
                deliver_key_press(&mut state, code);
            }
            keypad.set_key(code, down);
        }

        run_tick(&mut state, cfg, &mut display, &keypad, &mut tone)?;

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        for (index, pixel) in display.pixels().iter().enumerate() {
            if *pixel == 0 {
                continue;
            }
            let x = (index % SCREEN_WIDTH) as i32;
            let y = (index / SCREEN_WIDTH) as i32;
            d.draw_rectangle(
                x * scale as i32,
                y * scale as i32,
                scale as i32,
                scale as i32,
                Color::WHITE,
            );
        }
    }

    tone.stop();

    Ok(state)
}
