use anyhow::{Context, Result};
use nes_cpu::cartridge::Cartridge;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <rom_file>", args[0]);
        std::process::exit(1);
    }

    let rom_path = &args[1];
    println!("Loading ROM: {}", rom_path);

    let data = std::fs::read(rom_path).with_context(|| format!("failed to read {}", rom_path))?;
    let cartridge = Cartridge::load_from_bytes(&data)?;

    println!("\n=== ROM Information ===");
    println!("Mapper: {} ({})", cartridge.mapper_id(), cartridge.mapper().name());
    println!("Mirroring: {:?}", cartridge.mirroring());
    println!("Battery: {}", cartridge.has_battery());
    println!("PRG ROM size: {} bytes ({} KB)",
        cartridge.prg().len(), cartridge.prg().len() / 1024);
    println!("CHR size: {} bytes ({} KB){}",
        cartridge.chr().len(), cartridge.chr().len() / 1024,
        if cartridge.chr_banks() == 0 { ", zero-filled" } else { "" });

    println!("\n=== Vectors ===");
    for (name, addr) in [("NMI", 0xFFFAu16), ("RESET", 0xFFFC), ("IRQ/BRK", 0xFFFE)] {
        let lo = cartridge.cpu_read(addr) as u16;
        let hi = cartridge.cpu_read(addr.wrapping_add(1)) as u16;
        println!("{:<8} ${:04X} -> ${:04X}", name, addr, (hi << 8) | lo);
    }

    println!("\n=== First 16 bytes of PRG ROM ===");
    for (i, byte) in cartridge.prg().iter().take(16).enumerate() {
        if i % 8 == 0 && i > 0 {
            println!();
        }
        print!("{:02X} ", byte);
    }
    println!();

    Ok(())
}
