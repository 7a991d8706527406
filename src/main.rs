use std::env;
use std::process;

use anyhow::{Context, Result};

use nes_cpu::{Config, System};

const DEFAULT_INSTRUCTIONS: u64 = 100_000;

fn main() -> Result<()> {
    env_logger::init();

    let mut config = Config::default();
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--strict-mapper" => config.strict_mapper = true,
            "--no-jmp-bug" => config.indirect_jmp_page_wrap = false,
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() {
        eprintln!("Usage: nes-cpu <rom_file> [instructions] [--strict-mapper] [--no-jmp-bug]");
        process::exit(1);
    }

    let rom_path = &positional[0];
    let limit = match positional.get(1) {
        Some(count) => count
            .parse::<u64>()
            .with_context(|| format!("invalid instruction count: {}", count))?,
        None => DEFAULT_INSTRUCTIONS,
    };

    log::info!("Loading ROM: {}", rom_path);
    let rom = std::fs::read(rom_path).with_context(|| format!("failed to read {}", rom_path))?;

    let mut system = System::load_with_config(&rom, config)?;
    system.reset();

    log::info!("Starting emulation...");

    let mut executed = 0;
    while executed < limit {
        if let Err(err) = system.tick() {
            log::error!("Halting: {}", err);
            break;
        }
        executed += 1;
    }

    let cpu = system.cpu();
    println!(
        "Executed {} instructions in {} cycles. PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        executed,
        system.cycles(),
        cpu.pc,
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.flags(),
        cpu.sp
    );

    Ok(())
}
