use crate::chip8::config::{KEY_COUNT, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Monochrome 64x32 pixel grid the draw instruction plots into.
pub trait PixelSurface {
    /// XOR-toggle the cell at `(x mod width, y mod height)`. Returns true
    /// when the cell became unset, which the executor reports as a sprite
    /// collision in VF.
    fn set_pixel(&mut self, x: usize, y: usize) -> bool;

    fn clear(&mut self);

    /// Flush pixel state to the visible surface. Called once per scheduler
    /// tick.
    fn present(&mut self);
}

/// Current key state, polled by the Ex9E/ExA1 skip instructions.
pub trait KeySource {
    /// Whether the key with logical code 0x0-0xF is held. Codes outside the
    /// pad report not-pressed.
    fn is_pressed(&self, code: u8) -> bool;
}

/// Single fixed-frequency tone, gated by the sound timer.
pub trait ToneEmitter {
    fn start(&mut self, frequency_hz: u16);
    fn stop(&mut self);
}

/// In-memory pixel grid. The windowed host redraws from it every frame;
/// `present` has nothing to flush.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: [u8; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            pixels: [0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.pixels[(x % SCREEN_WIDTH) + (y % SCREEN_HEIGHT) * SCREEN_WIDTH] == 1
    }
}

impl PixelSurface for FrameBuffer {
    fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        let location = (x % SCREEN_WIDTH) + (y % SCREEN_HEIGHT) * SCREEN_WIDTH;
        self.pixels[location] ^= 1;
        self.pixels[location] == 0
    }

    fn clear(&mut self) {
        self.pixels = [0; SCREEN_WIDTH * SCREEN_HEIGHT];
    }

    fn present(&mut self) {}
}

/// Key-state flags for the 16-key hex pad, updated by the host from its own
/// input events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, code: u8, down: bool) {
        if (code as usize) < KEY_COUNT {
            self.pressed[code as usize] = down;
        }
    }
}

impl KeySource for Keypad {
    fn is_pressed(&self, code: u8) -> bool {
        (code as usize) < KEY_COUNT && self.pressed[code as usize]
    }
}

/// Tone emitter that discards start/stop requests. Used by the headless
/// runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTone;

impl ToneEmitter for NullTone {
    fn start(&mut self, _frequency_hz: u16) {}

    fn stop(&mut self) {}
}
