use crate::chip8::config::{Chip8Config, TONE_FREQUENCY_HZ};
use crate::chip8::cpu::step;
use crate::chip8::error::Chip8Error;
use crate::chip8::ports::{KeySource, PixelSurface, ToneEmitter};
use crate::chip8::state::{is_waiting_for_key, EmulatorState};

/// Decrement both countdown timers by one, floored at zero.
pub fn tick_timers(state: &mut EmulatorState) {
    state.delay_timer = state.delay_timer.saturating_sub(1);
    state.sound_timer = state.sound_timer.saturating_sub(1);
}

/// One 60 Hz frame of work: the instruction quota, one timer decrement, the
/// tone gate, and a display flush. The host calls this at a fixed real-time
/// cadence; a machine paused on a key wait still burns its quota as no-ops.
pub fn run_tick(
    state: &mut EmulatorState,
    cfg: Chip8Config,
    display: &mut dyn PixelSurface,
    keys: &dyn KeySource,
    tone: &mut dyn ToneEmitter,
) -> Result<(), Chip8Error> {
    for _ in 0..cfg.instructions_per_tick {
        step(state, cfg, display, keys)?;
    }

    if !is_waiting_for_key(state) {
        tick_timers(state);
    }

    if state.sound_timer > 0 {
        tone.start(TONE_FREQUENCY_HZ);
    } else {
        tone.stop();
    }

    display.present();

    Ok(())
}
