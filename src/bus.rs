use crate::cartridge::Cartridge;
use crate::cpu::CpuBus;
use crate::memory::CpuMemory;

/// CPU address space: internal RAM below $2000, the cartridge everywhere else.
pub struct Bus {
    ram: CpuMemory,
    cartridge: Cartridge,
}

impl Bus {
    pub fn new(cartridge: Cartridge) -> Self {
        Bus {
            ram: CpuMemory::new(),
            cartridge,
        }
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            _ => self.cartridge.cpu_read(addr),
        }
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, value),
            _ => self.cartridge.cpu_write(addr, value),
        }
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }
}

impl CpuBus for Bus {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.write_byte(addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{CHR_BANK_SIZE, HEADER_SIZE, PRG_BANK_SIZE};

    fn bus_with_prg(fill: impl Fn(usize) -> u8) -> Bus {
        let mut data = vec![b'N', b'E', b'S', 0x1A, 1, 1, 0, 0];
        data.resize(HEADER_SIZE, 0);
        data.extend((0..PRG_BANK_SIZE).map(fill));
        data.extend(std::iter::repeat(0).take(CHR_BANK_SIZE));
        Bus::new(Cartridge::load_from_bytes(&data).unwrap())
    }

    #[test]
    fn low_addresses_hit_mirrored_ram() {
        let mut bus = bus_with_prg(|_| 0);
        bus.write(0x0801, 0x77);
        assert_eq!(bus.read(0x0001), 0x77);
        assert_eq!(bus.read(0x1801), 0x77);
    }

    #[test]
    fn high_addresses_hit_cartridge() {
        let mut bus = bus_with_prg(|i| (i & 0xFF) as u8);
        assert_eq!(bus.read(0x8010), 0x10);
        assert_eq!(bus.read(0xC010), 0x10);
        // $2000 is the first address past RAM and lands in the cartridge
        assert_eq!(bus.read(0x2005), 0x05);
    }

    #[test]
    fn ram_writes_do_not_touch_prg() {
        let mut bus = bus_with_prg(|_| 0xAA);
        bus.write(0x0000, 0x01);
        assert_eq!(bus.cartridge().prg()[0], 0xAA);
    }
}
