use crate::cartridge::mapper0::Mapper0;

/// Address translation performed by cartridge board hardware.
///
/// Each method turns a bus address into an offset inside the cartridge's PRG (CPU side)
/// or CHR (PPU side) region.
pub trait Mapper {
    fn cpu_map_read(&self, addr: u16) -> usize;
    fn cpu_map_write(&self, addr: u16) -> usize;
    fn ppu_map_read(&self, addr: u16) -> usize;
    fn ppu_map_write(&self, addr: u16) -> usize;
}

/// Every board this core knows how to drive. New boards are added as variants.
#[derive(Debug, Clone)]
pub enum CartridgeMapper {
    Nrom(Mapper0),
}

impl CartridgeMapper {
    /// Picks the board for a mapper id. Returns `None` for ids with no implementation.
    pub fn for_id(id: u8, prg_banks: u8) -> Option<Self> {
        match id {
            0 => Some(CartridgeMapper::Nrom(Mapper0::new(prg_banks))),
            _ => None,
        }
    }

    /// The baseline board used when an id is unknown and strict loading is off.
    pub fn fallback(prg_banks: u8) -> Self {
        CartridgeMapper::Nrom(Mapper0::new(prg_banks))
    }

    pub fn name(&self) -> &'static str {
        match self {
            CartridgeMapper::Nrom(_) => "NROM",
        }
    }
}

impl Mapper for CartridgeMapper {
    fn cpu_map_read(&self, addr: u16) -> usize {
        match self {
            CartridgeMapper::Nrom(m) => m.cpu_map_read(addr),
        }
    }

    fn cpu_map_write(&self, addr: u16) -> usize {
        match self {
            CartridgeMapper::Nrom(m) => m.cpu_map_write(addr),
        }
    }

    fn ppu_map_read(&self, addr: u16) -> usize {
        match self {
            CartridgeMapper::Nrom(m) => m.ppu_map_read(addr),
        }
    }

    fn ppu_map_write(&self, addr: u16) -> usize {
        match self {
            CartridgeMapper::Nrom(m) => m.ppu_map_write(addr),
        }
    }
}
