use std::fmt;

use crate::cpu::addressing::{page_crossed, Operand};
use crate::cpu::{Cpu, CpuBus, Status, IRQ_VECTOR};

/// The 56 documented 6502 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Instruction {
    pub fn mnemonic(self) -> &'static str {
        use Instruction::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA",
        }
    }

    /// Whether an indexed page cross costs an extra cycle. Stores and
    /// read-modify-write ops always pay it in their base cost instead.
    pub fn page_penalty(self) -> bool {
        use Instruction::*;
        matches!(self, Adc | And | Cmp | Eor | Lda | Ldx | Ldy | Ora | Sbc)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl Cpu {
    /// Runs an instruction body. `PC` already points at the following instruction.
    pub fn execute<B: CpuBus>(&mut self, bus: &mut B, instruction: Instruction, operand: Operand) {
        use Instruction::*;

        match instruction {
            // Arithmetic and logic
            Adc => {
                let value = self.load(bus, operand);
                self.adc(value);
            }
            Sbc => {
                let value = self.load(bus, operand);
                self.sbc(value);
            }
            And => {
                self.a &= self.load(bus, operand);
                self.update_nz(self.a);
            }
            Ora => {
                self.a |= self.load(bus, operand);
                self.update_nz(self.a);
            }
            Eor => {
                self.a ^= self.load(bus, operand);
                self.update_nz(self.a);
            }
            Bit => {
                let value = self.load(bus, operand);
                self.status.set(Status::ZERO, self.a & value == 0);
                self.status.set(Status::OVERFLOW, value & 0x40 != 0);
                self.status.set(Status::NEGATIVE, value & 0x80 != 0);
            }
            Cmp => {
                let value = self.load(bus, operand);
                self.compare(self.a, value);
            }
            Cpx => {
                let value = self.load(bus, operand);
                self.compare(self.x, value);
            }
            Cpy => {
                let value = self.load(bus, operand);
                self.compare(self.y, value);
            }

            // Shifts, rotates and memory increments
            Asl => self.modify(bus, operand, Self::asl),
            Lsr => self.modify(bus, operand, Self::lsr),
            Rol => self.modify(bus, operand, Self::rol),
            Ror => self.modify(bus, operand, Self::ror),
            Inc => self.modify(bus, operand, |_, value| value.wrapping_add(1)),
            Dec => self.modify(bus, operand, |_, value| value.wrapping_sub(1)),

            Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_nz(self.x);
            }
            Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_nz(self.y);
            }
            Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_nz(self.x);
            }
            Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_nz(self.y);
            }

            // Loads and stores
            Lda => {
                self.a = self.load(bus, operand);
                self.update_nz(self.a);
            }
            Ldx => {
                self.x = self.load(bus, operand);
                self.update_nz(self.x);
            }
            Ldy => {
                self.y = self.load(bus, operand);
                self.update_nz(self.y);
            }
            Sta => bus.write(operand.address(), self.a),
            Stx => bus.write(operand.address(), self.x),
            Sty => bus.write(operand.address(), self.y),

            // Branches
            Bcc => self.branch(!self.status.contains(Status::CARRY), operand),
            Bcs => self.branch(self.status.contains(Status::CARRY), operand),
            Bne => self.branch(!self.status.contains(Status::ZERO), operand),
            Beq => self.branch(self.status.contains(Status::ZERO), operand),
            Bpl => self.branch(!self.status.contains(Status::NEGATIVE), operand),
            Bmi => self.branch(self.status.contains(Status::NEGATIVE), operand),
            Bvc => self.branch(!self.status.contains(Status::OVERFLOW), operand),
            Bvs => self.branch(self.status.contains(Status::OVERFLOW), operand),

            // Jumps and subroutines
            Jmp => self.pc = operand.address(),
            Jsr => {
                self.push_word(bus, self.pc.wrapping_sub(1));
                self.pc = operand.address();
            }
            Rts => self.pc = self.pop_word(bus).wrapping_add(1),
            Brk => {
                self.push_word(bus, self.pc.wrapping_add(1));
                self.push(bus, self.flags() | Status::BREAK.bits());
                self.status.insert(Status::INTERRUPT_DISABLE);
                self.pc = self.read_word(bus, IRQ_VECTOR);
            }
            Rti => {
                let flags = self.pop(bus);
                self.set_flags(flags);
                self.pc = self.pop_word(bus);
            }

            // Stack
            Pha => self.push(bus, self.a),
            Php => self.push(bus, self.flags() | Status::BREAK.bits()),
            Pla => {
                self.a = self.pop(bus);
                self.update_nz(self.a);
            }
            Plp => {
                let flags = self.pop(bus);
                self.set_flags(flags);
            }

            // Flags
            Clc => self.status.remove(Status::CARRY),
            Cld => self.status.remove(Status::DECIMAL),
            Cli => self.status.remove(Status::INTERRUPT_DISABLE),
            Clv => self.status.remove(Status::OVERFLOW),
            Sec => self.status.insert(Status::CARRY),
            Sed => self.status.insert(Status::DECIMAL),
            Sei => self.status.insert(Status::INTERRUPT_DISABLE),

            // Transfers
            Tax => {
                self.x = self.a;
                self.update_nz(self.x);
            }
            Tay => {
                self.y = self.a;
                self.update_nz(self.y);
            }
            Txa => {
                self.a = self.x;
                self.update_nz(self.a);
            }
            Tya => {
                self.a = self.y;
                self.update_nz(self.a);
            }
            Tsx => {
                self.x = self.sp;
                self.update_nz(self.x);
            }
            Txs => self.sp = self.x,

            Nop => {}
        }
    }

    fn adc(&mut self, value: u8) {
        let sum = self.a as u16 + value as u16 + self.status.contains(Status::CARRY) as u16;
        let result = sum as u8;

        self.status.set(Status::CARRY, sum > 0xFF);
        self.status.set(
            Status::OVERFLOW,
            (self.a ^ result) & (value ^ result) & 0x80 != 0,
        );

        self.a = result;
        self.update_nz(self.a);
    }

    // A - M - (1 - C) is A + !M + C in two's complement; carry out means no borrow.
    fn sbc(&mut self, value: u8) {
        self.adc(!value);
    }

    fn compare(&mut self, reg: u8, value: u8) {
        self.status.set(Status::CARRY, reg >= value);
        self.update_nz(reg.wrapping_sub(value));
    }

    fn branch(&mut self, condition: bool, operand: Operand) {
        if !condition {
            return;
        }
        let target = operand.address();
        self.cycles += if page_crossed(self.pc, target) { 2 } else { 1 };
        self.pc = target;
    }

    /// Read-modify-write on either the accumulator or memory, setting N/Z from the result.
    fn modify<B, F>(&mut self, bus: &mut B, operand: Operand, op: F)
    where
        B: CpuBus,
        F: FnOnce(&mut Self, u8) -> u8,
    {
        match operand {
            Operand::Accumulator => {
                let value = self.a;
                self.a = op(self, value);
                self.update_nz(self.a);
            }
            Operand::Address(addr) => {
                let value = bus.read(addr);
                let result = op(self, value);
                bus.write(addr, result);
                self.update_nz(result);
            }
            Operand::Implied => {}
        }
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.status.set(Status::CARRY, value & 0x80 != 0);
        value << 1
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.status.set(Status::CARRY, value & 0x01 != 0);
        value >> 1
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry = self.status.contains(Status::CARRY) as u8;
        self.status.set(Status::CARRY, value & 0x80 != 0);
        (value << 1) | carry
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry = (self.status.contains(Status::CARRY) as u8) << 7;
        self.status.set(Status::CARRY, value & 0x01 != 0);
        (value >> 1) | carry
    }
}
