pub mod chip8;

pub use chip8::app::{run_app, run_headless, Beeper, HeadlessRun};
pub use chip8::config::{
    Chip8Config, CONVENTIONAL_STACK_DEPTH, FONT_BYTES, KEY_COUNT, MEMORY_SIZE, PROGRAM_START,
    REGISTER_COUNT, SCREEN_HEIGHT, SCREEN_WIDTH, TONE_FREQUENCY_HZ,
};
pub use chip8::cpu::{execute_opcode, step};
pub use chip8::error::Chip8Error;
pub use chip8::ports::{FrameBuffer, KeySource, Keypad, NullTone, PixelSurface, ToneEmitter};
pub use chip8::scheduler::{run_tick, tick_timers};
pub use chip8::state::{
    create_state, deliver_key_press, is_waiting_for_key, load_font, load_program, load_rom,
    reset_state, EmulatorState,
};
