pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: usize = 0x200;
pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;
pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

pub const GLYPH_SIZE: usize = 5;
pub const TONE_FREQUENCY_HZ: u16 = 440;

/// Conventional call-stack depth of the original interpreter. Not enforced
/// unless a `stack_limit` is configured.
pub const CONVENTIONAL_STACK_DEPTH: usize = 16;

/// One 5-byte sprite per hex digit, written at address 0x000 on reset.
pub const FONT_BYTES: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Execution settings threaded by value into `step` and `run_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chip8Config {
    /// How many instructions the scheduler executes per 60 Hz tick.
    pub instructions_per_tick: usize,
    /// Optional cap on call-stack depth. The original interpreter allows
    /// arbitrary depth, so this defaults to `None`.
    pub stack_limit: Option<usize>,
}

impl Default for Chip8Config {
    fn default() -> Self {
        Self {
            instructions_per_tick: 10,
            stack_limit: None,
        }
    }
}
