pub mod addressing;
pub mod instructions;
pub mod opcodes;

use bitflags::bitflags;
use thiserror::Error;

use crate::config::Config;
use self::addressing::Operand;

pub const STACK_BASE: u16 = 0x0100;
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

pub const RESET_SP: u8 = 0xFD;
pub const IRQ_CYCLES: u8 = 7;
pub const NMI_CYCLES: u8 = 8;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const CARRY = 0x01;
        const ZERO = 0x02;
        const INTERRUPT_DISABLE = 0x04;
        const DECIMAL = 0x08;
        const BREAK = 0x10;
        const UNUSED = 0x20;
        const OVERFLOW = 0x40;
        const NEGATIVE = 0x80;
    }
}

/// Bits of the status byte that only exist on the stack.
const STACK_ONLY: Status = Status::BREAK.union(Status::UNUSED);

/// Byte-level access to the CPU's 16-bit address space.
///
/// The CPU borrows an implementor for the duration of a single `tick` or interrupt
/// entry, so it never holds on to the memory it runs against.
pub trait CpuBus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unassigned opcode ${opcode:02X} at ${addr:04X}")]
pub struct DecodeError {
    pub addr: u16,
    pub opcode: u8,
}

pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    /// C/Z/I/D/V/N. BREAK and UNUSED are never stored here.
    pub status: Status,
    pub cycles: u64,
    jmp_page_wrap: bool,
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: 0,
            status: Status::empty(),
            cycles: 0,
            jmp_page_wrap: config.indirect_jmp_page_wrap,
        }
    }

    pub fn reset<B: CpuBus>(&mut self, bus: &mut B) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = RESET_SP;
        self.status = Status::empty();
        self.pc = self.read_word(bus, RESET_VECTOR);
        log::info!("Reset CPU, PC set to: 0x{:04X}", self.pc);
    }

    /// Runs one whole instruction and returns the cycles it took.
    pub fn tick<B: CpuBus>(&mut self, bus: &mut B) -> Result<u8, DecodeError> {
        let start = self.cycles;
        let pc = self.pc;
        let byte = bus.read(pc);
        let opcode = opcodes::lookup(byte).ok_or(DecodeError { addr: pc, opcode: byte })?;

        log::trace!(
            "{:04X}  {:02X}  {:<14} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            byte,
            opcode.to_string(),
            self.a,
            self.x,
            self.y,
            self.flags(),
            self.sp,
            self.cycles
        );

        let operand = self.resolve(bus, opcode.mode, opcode.instruction.page_penalty());
        self.pc = pc.wrapping_add(opcode.len as u16);
        self.execute(bus, opcode.instruction, operand);
        self.cycles += opcode.cycles as u64;

        Ok((self.cycles - start) as u8)
    }

    /// Maskable interrupt. Pushes the current PC, the next instruction to run, so
    /// RTI resumes exactly there. Returns the cycles consumed, 0 when masked.
    pub fn irq<B: CpuBus>(&mut self, bus: &mut B) -> u8 {
        if self.status.contains(Status::INTERRUPT_DISABLE) {
            return 0;
        }
        log::debug!("IRQ at PC: 0x{:04X}", self.pc);
        self.interrupt(bus, IRQ_VECTOR);
        self.cycles += IRQ_CYCLES as u64;
        IRQ_CYCLES
    }

    /// Non-maskable interrupt. Pushes the current PC like [`Cpu::irq`].
    pub fn nmi<B: CpuBus>(&mut self, bus: &mut B) -> u8 {
        log::debug!("NMI at PC: 0x{:04X}", self.pc);
        self.interrupt(bus, NMI_VECTOR);
        self.cycles += NMI_CYCLES as u64;
        NMI_CYCLES
    }

    // Hardware interrupts push with BREAK clear so handlers can tell them from BRK.
    fn interrupt<B: CpuBus>(&mut self, bus: &mut B, vector: u16) {
        self.push_word(bus, self.pc);
        self.push(bus, self.flags());
        self.status.insert(Status::INTERRUPT_DISABLE);
        self.pc = self.read_word(bus, vector);
    }

    /// The status byte as it appears on the stack for a hardware interrupt:
    /// UNUSED set, BREAK clear.
    pub fn flags(&self) -> u8 {
        ((self.status - STACK_ONLY) | Status::UNUSED).bits()
    }

    pub fn set_flags(&mut self, value: u8) {
        self.status = Status::from_bits_truncate(value) - STACK_ONLY;
    }

    pub fn read_word<B: CpuBus>(&self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read(addr) as u16;
        let hi = bus.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    pub fn push<B: CpuBus>(&mut self, bus: &mut B, value: u8) {
        bus.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub fn pop<B: CpuBus>(&mut self, bus: &mut B) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    pub fn push_word<B: CpuBus>(&mut self, bus: &mut B, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    pub fn pop_word<B: CpuBus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pop(bus) as u16;
        let hi = self.pop(bus) as u16;
        (hi << 8) | lo
    }

    fn update_nz(&mut self, value: u8) {
        self.status.set(Status::ZERO, value == 0);
        self.status.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    fn load<B: CpuBus>(&self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Address(addr) => bus.read(addr),
            Operand::Accumulator => self.a,
            Operand::Implied => 0,
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
