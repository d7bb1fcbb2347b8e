use std::fs;
use std::path::Path;

use log::info;

use crate::chip8::config::{FONT_BYTES, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT};
use crate::chip8::error::Chip8Error;

/// The whole machine: memory, register file, timers, and the wait-for-key
/// pause. Owned by the host and mutated only through `step`/`run_tick` and
/// `deliver_key_press`.
#[derive(Debug, Clone)]
pub struct EmulatorState {
    pub memory: [u8; MEMORY_SIZE],
    pub registers: [u8; REGISTER_COUNT],
    /// Address register I. Only the low 12 bits are meaningful; Fx1E may
    /// carry it past 0xFFF and memory accesses mask it back down.
    pub index: u16,
    /// 12-bit program counter, always pointing at the next fetch.
    pub pc: u16,
    pub stack: Vec<u16>,
    pub delay_timer: u8,
    pub sound_timer: u8,
    /// Target register of a pending Fx0A wait. While `Some`, `step` executes
    /// nothing.
    pub pending_key_wait: Option<usize>,
    /// Last executed opcode, for diagnostics.
    pub op: u16,
}

impl Default for EmulatorState {
    fn default() -> Self {
        let mut state = Self {
            memory: [0; MEMORY_SIZE],
            registers: [0; REGISTER_COUNT],
            index: 0,
            pc: PROGRAM_START as u16,
            stack: Vec::new(),
            delay_timer: 0,
            sound_timer: 0,
            pending_key_wait: None,
            op: 0,
        };
        load_font(&mut state);
        state
    }
}

pub fn create_state() -> EmulatorState {
    EmulatorState::default()
}

/// Reassign every piece of machine state to its power-on value, then rewrite
/// the font block.
pub fn reset_state(state: &mut EmulatorState) {
    state.memory = [0; MEMORY_SIZE];
    state.registers = [0; REGISTER_COUNT];
    state.index = 0;
    state.pc = PROGRAM_START as u16;
    state.stack.clear();
    state.delay_timer = 0;
    state.sound_timer = 0;
    state.pending_key_wait = None;
    state.op = 0;

    load_font(state);
}

/// Write the 16 hex-digit glyphs into the interpreter area at 0x000.
pub fn load_font(state: &mut EmulatorState) {
    state.memory[..FONT_BYTES.len()].copy_from_slice(&FONT_BYTES);
}

/// Copy a program image into memory starting at 0x200.
pub fn load_program(state: &mut EmulatorState, program: &[u8]) -> Result<(), Chip8Error> {
    let max = MEMORY_SIZE - PROGRAM_START;
    if program.len() > max {
        return Err(Chip8Error::ProgramTooLarge {
            size: program.len(),
            max,
        });
    }

    let end = PROGRAM_START + program.len();
    state.memory[PROGRAM_START..end].copy_from_slice(program);
    info!(
        "loaded {} program bytes into 0x{:03x}-0x{:03x}",
        program.len(),
        PROGRAM_START,
        end - 1
    );

    Ok(())
}

/// Read a program image from disk and load it at 0x200.
pub fn load_rom(state: &mut EmulatorState, path: &Path) -> Result<(), Chip8Error> {
    let rom_bytes = fs::read(path)?;
    load_program(state, &rom_bytes)
}

pub fn is_waiting_for_key(state: &EmulatorState) -> bool {
    state.pending_key_wait.is_some()
}

/// Key-press hand-off for the Fx0A wait. Stores the pressed key's logical
/// code into the pending target register and resumes execution. Press events
/// with no wait pending are ignored; releases never come through here.
pub fn deliver_key_press(state: &mut EmulatorState, code: u8) {
    if let Some(target) = state.pending_key_wait.take() {
        state.registers[target] = code;
    }
}
