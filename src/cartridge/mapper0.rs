// NROM (Mapper 0)
// No bank switching. 16KB or 32KB of PRG, 8KB of CHR.

use crate::cartridge::mapper::Mapper;

#[derive(Debug, Clone, Copy)]
pub struct Mapper0 {
    prg_banks: u8,
}

impl Mapper0 {
    pub fn new(prg_banks: u8) -> Self {
        Self { prg_banks }
    }

    // 16KB carts see the same bank at $8000 and $C000
    fn prg_window(&self) -> usize {
        if self.prg_banks > 1 {
            0x8000
        } else {
            0x4000
        }
    }
}

impl Mapper for Mapper0 {
    fn cpu_map_read(&self, addr: u16) -> usize {
        addr as usize % self.prg_window()
    }

    fn cpu_map_write(&self, addr: u16) -> usize {
        addr as usize % self.prg_window()
    }

    fn ppu_map_read(&self, addr: u16) -> usize {
        addr as usize
    }

    fn ppu_map_write(&self, addr: u16) -> usize {
        addr as usize
    }
}
