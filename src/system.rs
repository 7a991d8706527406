use crate::bus::Bus;
use crate::cartridge::{Cartridge, LoadError};
use crate::config::Config;
use crate::cpu::{Cpu, CpuBus, DecodeError};

/// One emulated machine: the CPU plus everything on its bus.
///
/// The CPU and the bus are siblings. Every CPU operation borrows the bus for the
/// length of the call, so nothing here holds a reference back to its owner.
pub struct System {
    cpu: Cpu,
    bus: Bus,
}

impl System {
    pub fn load(rom: &[u8]) -> Result<Self, LoadError> {
        Self::load_with_config(rom, Config::default())
    }

    pub fn load_with_config(rom: &[u8], config: Config) -> Result<Self, LoadError> {
        let cartridge = Cartridge::load_with_config(rom, &config)?;
        Ok(System {
            cpu: Cpu::with_config(&config),
            bus: Bus::new(cartridge),
        })
    }

    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
    }

    /// Executes one instruction, returning the cycles it consumed so the caller
    /// can pace whatever runs alongside the CPU.
    pub fn tick(&mut self) -> Result<u8, DecodeError> {
        self.cpu.tick(&mut self.bus)
    }

    pub fn irq(&mut self) -> u8 {
        self.cpu.irq(&mut self.bus)
    }

    pub fn nmi(&mut self) -> u8 {
        self.cpu.nmi(&mut self.bus)
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bus.read_byte(addr)
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bus.write(addr, value);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cartridge(&self) -> &Cartridge {
        self.bus.cartridge()
    }

    pub fn cycles(&self) -> u64 {
        self.cpu.cycles
    }
}
