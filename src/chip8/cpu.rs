use rand::random;

use crate::chip8::config::{Chip8Config, GLYPH_SIZE, MEMORY_SIZE};
use crate::chip8::error::Chip8Error;
use crate::chip8::ports::{KeySource, PixelSurface};
use crate::chip8::state::EmulatorState;

const ADDRESS_MASK: usize = MEMORY_SIZE - 1;
const SPRITE_WIDTH: usize = 8;

fn x_register_index(opcode: u16) -> usize {
    ((opcode & 0x0F00) >> 8) as usize
}

fn y_register_index(opcode: u16) -> usize {
    ((opcode & 0x00F0) >> 4) as usize
}

fn address_nnn(opcode: u16) -> u16 {
    opcode & 0x0FFF
}

fn byte_nn(opcode: u16) -> u8 {
    (opcode & 0x00FF) as u8
}

fn nibble_n(opcode: u16) -> u8 {
    (opcode & 0x000F) as u8
}

// Instruction addresses wrap in the 12-bit space; there is no out-of-range
// access to report.
fn read_byte(state: &EmulatorState, address: usize) -> u8 {
    state.memory[address & ADDRESS_MASK]
}

fn write_byte(state: &mut EmulatorState, address: usize, value: u8) {
    state.memory[address & ADDRESS_MASK] = value;
}

fn advance_pc(state: &mut EmulatorState) {
    state.pc = (state.pc + 2) & ADDRESS_MASK as u16;
}

/// Address the current opcode was fetched from, for error reports.
fn instruction_pc(state: &EmulatorState) -> u16 {
    state.pc.wrapping_sub(2) & ADDRESS_MASK as u16
}

/// One fetch-decode-execute step. Does nothing while a key wait is pending.
pub fn step(
    state: &mut EmulatorState,
    cfg: Chip8Config,
    display: &mut dyn PixelSurface,
    keys: &dyn KeySource,
) -> Result<(), Chip8Error> {
    if state.pending_key_wait.is_some() {
        return Ok(());
    }

    let pc = state.pc as usize & ADDRESS_MASK;
    let opcode = ((state.memory[pc] as u16) << 8) | state.memory[(pc + 1) & ADDRESS_MASK] as u16;
    advance_pc(state);

    execute_opcode(state, opcode, cfg, display, keys)
}

/// Decode and execute a single opcode. Public so tests can drive individual
/// instructions without staging them in memory.
pub fn execute_opcode(
    state: &mut EmulatorState,
    opcode: u16,
    cfg: Chip8Config,
    display: &mut dyn PixelSurface,
    keys: &dyn KeySource,
) -> Result<(), Chip8Error> {
    state.op = opcode;

    match opcode & 0xF000 {
        0x0000 => handle_family_0(state, opcode, display),
        0x1000 => {
            state.pc = address_nnn(opcode);
            Ok(())
        }
        0x2000 => {
            if let Some(limit) = cfg.stack_limit {
                if state.stack.len() >= limit {
                    return Err(Chip8Error::CallDepthExceeded {
                        pc: instruction_pc(state),
                        opcode,
                        limit,
                    });
                }
            }
            state.stack.push(state.pc);
            state.pc = address_nnn(opcode);
            Ok(())
        }
        0x3000 => {
            if state.registers[x_register_index(opcode)] == byte_nn(opcode) {
                advance_pc(state);
            }
            Ok(())
        }
        0x4000 => {
            if state.registers[x_register_index(opcode)] != byte_nn(opcode) {
                advance_pc(state);
            }
            Ok(())
        }
        // The original interpreter never looks at the low nibble of the
        // 5xy0 and 9xy0 families; keep that lenient decoding.
        0x5000 => {
            if state.registers[x_register_index(opcode)]
                == state.registers[y_register_index(opcode)]
            {
                advance_pc(state);
            }
            Ok(())
        }
        0x6000 => {
            state.registers[x_register_index(opcode)] = byte_nn(opcode);
            Ok(())
        }
        0x7000 => {
            let x_reg = x_register_index(opcode);
            state.registers[x_reg] = state.registers[x_reg].wrapping_add(byte_nn(opcode));
            Ok(())
        }
        0x8000 => handle_family_8(state, opcode),
        0x9000 => {
            if state.registers[x_register_index(opcode)]
                != state.registers[y_register_index(opcode)]
            {
                advance_pc(state);
            }
            Ok(())
        }
        0xA000 => {
            state.index = address_nnn(opcode);
            Ok(())
        }
        0xB000 => {
            state.pc =
                (address_nnn(opcode) + state.registers[0] as u16) & ADDRESS_MASK as u16;
            Ok(())
        }
        0xC000 => {
            state.registers[x_register_index(opcode)] = random::<u8>() & byte_nn(opcode);
            Ok(())
        }
        0xD000 => {
            handle_opcode_dxyn_draw(state, opcode, display);
            Ok(())
        }
        0xE000 => handle_family_e(state, opcode, keys),
        0xF000 => handle_family_f(state, opcode),
        // All sixteen top-nibble families are handled above; kept for match
        // exhaustiveness over u16.
        _ => Err(Chip8Error::UnrecognizedInstruction {
            pc: instruction_pc(state),
            opcode,
        }),
    }
}

fn handle_family_0(
    state: &mut EmulatorState,
    opcode: u16,
    display: &mut dyn PixelSurface,
) -> Result<(), Chip8Error> {
    match opcode {
        0x00E0 => {
            display.clear();
            Ok(())
        }
        0x00EE => {
            let ret = state.stack.pop().ok_or(Chip8Error::StackUnderflow {
                pc: instruction_pc(state),
                opcode,
            })?;
            state.pc = ret;
            Ok(())
        }
        // Machine-code routines of the host hardware; no-ops in this dialect.
        _ => Ok(()),
    }
}

fn handle_family_8(state: &mut EmulatorState, opcode: u16) -> Result<(), Chip8Error> {
    let x_reg = x_register_index(opcode);
    let y_reg = y_register_index(opcode);
    let vx = state.registers[x_reg];
    let vy = state.registers[y_reg];

    match nibble_n(opcode) {
        0x0 => {
            state.registers[x_reg] = vy;
            Ok(())
        }
        0x1 => {
            state.registers[x_reg] = vx | vy;
            Ok(())
        }
        0x2 => {
            state.registers[x_reg] = vx & vy;
            Ok(())
        }
        0x3 => {
            state.registers[x_reg] = vx ^ vy;
            Ok(())
        }
        0x4 => {
            let (result, carry) = vx.overflowing_add(vy);
            state.registers[0xF] = u8::from(carry);
            state.registers[x_reg] = result;
            Ok(())
        }
        // Borrow flags compare strictly; Vx == Vy leaves VF at 0.
        0x5 => {
            state.registers[0xF] = u8::from(vx > vy);
            state.registers[x_reg] = vx.wrapping_sub(vy);
            Ok(())
        }
        0x6 => {
            state.registers[0xF] = vx & 0x1;
            state.registers[x_reg] = vx >> 1;
            Ok(())
        }
        0x7 => {
            state.registers[0xF] = u8::from(vy > vx);
            state.registers[x_reg] = vy.wrapping_sub(vx);
            Ok(())
        }
        // VF takes the raw masked high bit (0 or 0x80), not a normalized
        // 0/1; programs exist that depend on the unnormalized value.
        0xE => {
            state.registers[0xF] = vx & 0x80;
            state.registers[x_reg] = vx << 1;
            Ok(())
        }
        _ => Err(Chip8Error::UnrecognizedInstruction {
            pc: instruction_pc(state),
            opcode,
        }),
    }
}

fn handle_opcode_dxyn_draw(state: &mut EmulatorState, opcode: u16, display: &mut dyn PixelSurface) {
    let x_origin = state.registers[x_register_index(opcode)] as usize;
    let y_origin = state.registers[y_register_index(opcode)] as usize;
    let height = nibble_n(opcode) as usize;

    state.registers[0xF] = 0;

    for row in 0..height {
        let sprite_row = read_byte(state, state.index as usize + row);

        for col in 0..SPRITE_WIDTH {
            if (sprite_row >> (SPRITE_WIDTH - 1 - col)) & 0x1 == 0 {
                continue;
            }
            if display.set_pixel(x_origin + col, y_origin + row) {
                state.registers[0xF] = 1;
            }
        }
    }
}

fn handle_family_e(
    state: &mut EmulatorState,
    opcode: u16,
    keys: &dyn KeySource,
) -> Result<(), Chip8Error> {
    let code = state.registers[x_register_index(opcode)];

    match byte_nn(opcode) {
        0x9E => {
            if keys.is_pressed(code) {
                advance_pc(state);
            }
            Ok(())
        }
        0xA1 => {
            if !keys.is_pressed(code) {
                advance_pc(state);
            }
            Ok(())
        }
        _ => Err(Chip8Error::UnrecognizedInstruction {
            pc: instruction_pc(state),
            opcode,
        }),
    }
}

fn handle_family_f(state: &mut EmulatorState, opcode: u16) -> Result<(), Chip8Error> {
    let x_reg = x_register_index(opcode);

    match byte_nn(opcode) {
        0x07 => {
            state.registers[x_reg] = state.delay_timer;
            Ok(())
        }
        0x0A => {
            state.pending_key_wait = Some(x_reg);
            Ok(())
        }
        0x15 => {
            state.delay_timer = state.registers[x_reg];
            Ok(())
        }
        0x18 => {
            state.sound_timer = state.registers[x_reg];
            Ok(())
        }
        // I keeps whatever it accumulates past 12 bits; memory accesses mask
        // it back into range.
        0x1E => {
            state.index = state.index.wrapping_add(state.registers[x_reg] as u16);
            Ok(())
        }
        0x29 => {
            state.index = state.registers[x_reg] as u16 * GLYPH_SIZE as u16;
            Ok(())
        }
        0x33 => {
            let value = state.registers[x_reg];
            let base = state.index as usize;
            write_byte(state, base, value / 100);
            write_byte(state, base + 1, (value % 100) / 10);
            write_byte(state, base + 2, value % 10);
            Ok(())
        }
        0x55 => {
            let base = state.index as usize;
            for offset in 0..=x_reg {
                write_byte(state, base + offset, state.registers[offset]);
            }
            Ok(())
        }
        0x65 => {
            let base = state.index as usize;
            for offset in 0..=x_reg {
                state.registers[offset] = read_byte(state, base + offset);
            }
            Ok(())
        }
        _ => Err(Chip8Error::UnrecognizedInstruction {
            pc: instruction_pc(state),
            opcode,
        }),
    }
}
