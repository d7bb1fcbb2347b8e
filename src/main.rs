use std::path::PathBuf;

use clap::Parser;

use chip8_vm::{run_app, run_headless, Chip8Config, Chip8Error};

#[derive(Debug, Parser)]
#[command(name = "chip8-vm")]
#[command(about = "Run a CHIP-8 program")]
struct Args {
    /// Path to the program image to load at 0x200.
    rom: PathBuf,

    /// Instructions executed per 60 Hz tick.
    #[arg(long, default_value_t = 10)]
    ipt: usize,

    /// Optional call-stack depth cap (the original interpreter's
    /// conventional depth is 16).
    #[arg(long)]
    stack_limit: Option<usize>,

    #[arg(long, default_value_t = 16)]
    scale: usize,

    #[arg(long, default_value_t = 60)]
    fps: usize,

    /// Run without a window for --max-ticks ticks.
    #[arg(long)]
    headless: bool,

    #[arg(long, default_value_t = 600)]
    max_ticks: usize,
}

fn main() -> Result<(), Chip8Error> {
    env_logger::init();

    let args = Args::parse();
    let cfg = Chip8Config {
        instructions_per_tick: args.ipt,
        stack_limit: args.stack_limit,
    };

    if args.headless {
        let run = run_headless(&args.rom, args.max_ticks, cfg)?;
        println!(
            "headless finished: pc=0x{:03x} waiting_for_key={}",
            run.state.pc,
            run.state.pending_key_wait.is_some()
        );
        return Ok(());
    }

    let _state = run_app(&args.rom, args.scale, args.fps, cfg)?;
    Ok(())
}
