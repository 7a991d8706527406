use crate::cpu::{Cpu, CpuBus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

/// What an instruction operates on once its addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Address(u16),
}

impl Operand {
    /// The effective address, or 0 for operands that have none.
    pub fn address(self) -> u16 {
        match self {
            Operand::Address(addr) => addr,
            Operand::Implied | Operand::Accumulator => 0,
        }
    }
}

pub fn page_crossed(addr1: u16, addr2: u16) -> bool {
    (addr1 & 0xFF00) != (addr2 & 0xFF00)
}

impl Cpu {
    /// Computes the operand for the instruction whose opcode sits at `PC`.
    ///
    /// `PC` is not moved. Indexed modes that cross a page add a cycle to the running
    /// counter when `page_penalty` is set.
    pub fn resolve<B: CpuBus>(&mut self, bus: &mut B, mode: AddressingMode, page_penalty: bool) -> Operand {
        let arg = self.pc.wrapping_add(1);

        let addr = match mode {
            AddressingMode::Implied => return Operand::Implied,
            AddressingMode::Accumulator => return Operand::Accumulator,
            AddressingMode::Immediate => arg,
            AddressingMode::ZeroPage => bus.read(arg) as u16,
            AddressingMode::ZeroPageX => bus.read(arg).wrapping_add(self.x) as u16,
            AddressingMode::ZeroPageY => bus.read(arg).wrapping_add(self.y) as u16,
            AddressingMode::Relative => {
                let offset = bus.read(arg) as i8;
                self.pc.wrapping_add(2).wrapping_add(offset as u16)
            }
            AddressingMode::Absolute => self.read_word(bus, arg),
            AddressingMode::AbsoluteX => {
                let base = self.read_word(bus, arg);
                self.indexed(base, self.x, page_penalty)
            }
            AddressingMode::AbsoluteY => {
                let base = self.read_word(bus, arg);
                self.indexed(base, self.y, page_penalty)
            }
            AddressingMode::Indirect => {
                let ptr = self.read_word(bus, arg);
                if self.jmp_page_wrap && (ptr & 0xFF) == 0xFF {
                    // 6502 bug: the high byte comes from the start of the same page
                    let lo = bus.read(ptr) as u16;
                    let hi = bus.read(ptr & 0xFF00) as u16;
                    (hi << 8) | lo
                } else {
                    self.read_word(bus, ptr)
                }
            }
            AddressingMode::IndirectX => {
                let zp = bus.read(arg).wrapping_add(self.x);
                self.read_word_zp(bus, zp)
            }
            AddressingMode::IndirectY => {
                let zp = bus.read(arg);
                let base = self.read_word_zp(bus, zp);
                self.indexed(base, self.y, page_penalty)
            }
        };

        Operand::Address(addr)
    }

    fn indexed(&mut self, base: u16, index: u8, page_penalty: bool) -> u16 {
        let addr = base.wrapping_add(index as u16);
        if page_penalty && page_crossed(base, addr) {
            self.cycles += 1;
        }
        addr
    }

    // Pointers stored at $FF take their high byte from $00
    fn read_word_zp<B: CpuBus>(&self, bus: &mut B, zp: u8) -> u16 {
        let lo = bus.read(zp as u16) as u16;
        let hi = bus.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }
}
