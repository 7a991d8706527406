pub const RAM_SIZE: usize = 0x800;
pub const ZERO_PAGE_END: u16 = 0x0100;
pub const STACK_PAGE_END: u16 = 0x0200;

/// The console's 2 KB of internal work RAM.
///
/// Split the way the CPU sees it: zero page ($0000-$00FF), the hardware stack page
/// ($0100-$01FF) and general purpose RAM ($0200-$07FF). The whole block repeats every
/// $800 bytes, so any address is reduced modulo $800 before it is used.
pub struct CpuMemory {
    zero_page: [u8; 0x100],
    stack: [u8; 0x100],
    ram: [u8; 0x600],
}

impl CpuMemory {
    pub fn new() -> Self {
        CpuMemory {
            zero_page: [0; 0x100],
            stack: [0; 0x100],
            ram: [0; 0x600],
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        let addr = addr % RAM_SIZE as u16;
        match addr {
            0x0000..=0x00FF => self.zero_page[addr as usize],
            0x0100..=0x01FF => self.stack[(addr - ZERO_PAGE_END) as usize],
            _ => self.ram[(addr - STACK_PAGE_END) as usize],
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        let addr = addr % RAM_SIZE as u16;
        match addr {
            0x0000..=0x00FF => self.zero_page[addr as usize] = value,
            0x0100..=0x01FF => self.stack[(addr - ZERO_PAGE_END) as usize] = value,
            _ => self.ram[(addr - STACK_PAGE_END) as usize] = value,
        }
    }
}

impl Default for CpuMemory {
    fn default() -> Self {
        Self::new()
    }
}
