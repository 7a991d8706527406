//! Whole-machine tests: hand-assembled programs run from an NROM cartridge.

use nes_cpu::{Config, DecodeError, LoadError, Status, System};

const HEADER: usize = 16;
const PRG_BANK: usize = 0x4000;
const CHR_BANK: usize = 0x2000;

/// Builds a one-bank NROM image with `program` at $8000 and the given vectors.
fn rom(program: &[u8], nmi: u16, irq: u16) -> Vec<u8> {
    let mut data = vec![b'N', b'E', b'S', 0x1A, 1, 1, 0, 0];
    data.resize(HEADER + PRG_BANK + CHR_BANK, 0);

    let prg = &mut data[HEADER..HEADER + PRG_BANK];
    prg[..program.len()].copy_from_slice(program);
    for (offset, target) in [(0x3FFA, nmi), (0x3FFC, 0x8000u16), (0x3FFE, irq)] {
        prg[offset] = target as u8;
        prg[offset + 1] = (target >> 8) as u8;
    }
    data
}

fn boot(program: &[u8]) -> System {
    let mut system = System::load(&rom(program, 0x9000, 0xA000)).unwrap();
    system.reset();
    system
}

fn run(system: &mut System, instructions: usize) -> u64 {
    let start = system.cycles();
    for _ in 0..instructions {
        system.tick().unwrap();
    }
    system.cycles() - start
}

#[test]
fn reset_uses_vector() {
    let system = boot(&[0xEA]);
    let cpu = system.cpu();
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.sp, 0xFD);
    assert!(cpu.status.is_empty());
}

#[test]
fn single_bank_is_visible_at_c000() {
    let system = boot(&[0xA9, 0x42]);
    assert_eq!(system.read(0x8000), 0xA9);
    assert_eq!(system.read(0xC000), 0xA9);
    assert_eq!(system.read(0xC001), 0x42);
}

#[test]
fn adc_scenario() {
    // CLC ; LDA #$50 ; ADC #$50
    let mut system = boot(&[0x18, 0xA9, 0x50, 0x69, 0x50]);
    assert_eq!(run(&mut system, 3), 6);

    let cpu = system.cpu();
    assert_eq!(cpu.a, 0xA0);
    assert!(!cpu.status.contains(Status::CARRY));
    assert!(cpu.status.contains(Status::OVERFLOW));
    assert!(cpu.status.contains(Status::NEGATIVE));
    assert!(!cpu.status.contains(Status::ZERO));
}

#[test]
fn sbc_scenario() {
    // SEC ; LDA #$00 ; SBC #$01
    let mut system = boot(&[0x38, 0xA9, 0x00, 0xE9, 0x01]);
    run(&mut system, 3);

    let cpu = system.cpu();
    assert_eq!(cpu.a, 0xFF);
    assert!(!cpu.status.contains(Status::CARRY));
    assert!(cpu.status.contains(Status::NEGATIVE));
    assert!(!cpu.status.contains(Status::ZERO));
}

#[test]
fn counting_loop_sums_into_ram() {
    // LDX #$0A ; LDA #$00 ; CLC
    // loop: STX $00 ; ADC $00 ; DEX ; BNE loop
    // STA $0200
    let program = [
        0xA2, 0x0A, 0xA9, 0x00, 0x18, 0x86, 0x00, 0x65, 0x00, 0xCA, 0xD0, 0xF9, 0x8D, 0x00, 0x02,
    ];
    let mut system = boot(&program);
    while system.cpu().pc != 0x800F {
        system.tick().unwrap();
    }
    assert_eq!(system.read(0x0200), 55);
    // RAM is mirrored every 2KB
    assert_eq!(system.read(0x0A00), 55);
}

#[test]
fn indexed_read_pays_for_page_cross_but_store_does_not() {
    // LDX #$FF ; LDA $80F0,X ; STA $0210,X
    let mut system = boot(&[0xA2, 0xFF, 0xBD, 0xF0, 0x80, 0x9D, 0x10, 0x02]);
    system.tick().unwrap();
    assert_eq!(system.tick().unwrap(), 5);
    assert_eq!(system.tick().unwrap(), 5);
}

#[test]
fn jsr_and_rts_restore_caller() {
    // $8000: JSR $8010 ; NOP
    // $8010: LDY #$07 ; RTS
    let mut program = vec![0xEA; 0x20];
    program[..3].copy_from_slice(&[0x20, 0x10, 0x80]);
    program[0x10..0x13].copy_from_slice(&[0xA0, 0x07, 0x60]);
    let mut system = boot(&program);

    run(&mut system, 3);
    assert_eq!(system.cpu().pc, 0x8003);
    assert_eq!(system.cpu().sp, 0xFD);
    assert_eq!(system.cpu().y, 0x07);
}

#[test]
fn indirect_jump_reproduces_page_wrap_by_default() {
    // JMP ($02FF) with $02FF=$00, $0200=$90, $0300=$A0
    let program = [0x6C, 0xFF, 0x02];

    let mut system = boot(&program);
    system.write(0x02FF, 0x00);
    system.write(0x0200, 0x90);
    system.write(0x0300, 0xA0);
    system.tick().unwrap();
    assert_eq!(system.cpu().pc, 0x9000);

    let config = Config {
        indirect_jmp_page_wrap: false,
        ..Config::default()
    };
    let mut system = System::load_with_config(&rom(&program, 0, 0), config).unwrap();
    system.reset();
    system.write(0x02FF, 0x00);
    system.write(0x0200, 0x90);
    system.write(0x0300, 0xA0);
    system.tick().unwrap();
    assert_eq!(system.cpu().pc, 0xA000);
}

#[test]
fn irq_and_rti_resume_program() {
    // $8000: CLI ; NOP ; NOP
    // $A000: RTI
    let mut program = vec![0x58, 0xEA, 0xEA];
    program.resize(0x2001, 0xEA);
    program[0x2000] = 0x40;
    let mut system = boot(&program);

    system.tick().unwrap();
    assert_eq!(system.irq(), 7);
    assert_eq!(system.cpu().pc, 0xA000);
    // return address is the next instruction, not one past it
    assert_eq!(system.read(0x01FD), 0x80);
    assert_eq!(system.read(0x01FC), 0x01);
    // handler sees BREAK clear in the pushed status
    assert_eq!(system.read(0x01FB) & 0x30, 0x20);

    system.tick().unwrap();
    assert_eq!(system.cpu().pc, 0x8001);
    assert!(!system.cpu().status.contains(Status::INTERRUPT_DISABLE));
}

#[test]
fn irq_is_ignored_after_sei() {
    let mut system = boot(&[0x78, 0xEA]);
    system.tick().unwrap();
    assert_eq!(system.irq(), 0);
    assert_eq!(system.cpu().pc, 0x8001);
}

#[test]
fn nmi_jumps_through_its_vector() {
    let mut system = boot(&[0x78, 0xEA]);
    system.tick().unwrap();
    let before = system.cycles();
    assert_eq!(system.nmi(), 8);
    assert_eq!(system.cycles() - before, 8);
    assert_eq!(system.cpu().pc, 0x9000);
}

#[test]
fn brk_is_distinguishable_from_irq() {
    // BRK ; padding byte
    let mut system = boot(&[0x00, 0xEA]);
    assert_eq!(system.tick().unwrap(), 7);
    assert_eq!(system.cpu().pc, 0xA000);
    assert_eq!(system.read(0x01FB) & 0x30, 0x30);
    assert_eq!(system.read(0x01FC), 0x02);
    assert_eq!(system.read(0x01FD), 0x80);
}

#[test]
fn bad_opcode_reports_address() {
    let mut system = boot(&[0xEA, 0xFF]);
    system.tick().unwrap();
    assert_eq!(
        system.tick(),
        Err(DecodeError {
            addr: 0x8001,
            opcode: 0xFF
        })
    );
    assert_eq!(system.cpu().pc, 0x8001);
}

#[test]
fn load_failures() {
    assert_eq!(System::load(&[0; 4]).err(), Some(LoadError::TooShort { len: 4 }));

    let mut no_prg = rom(&[], 0, 0);
    no_prg[4] = 0;
    assert_eq!(System::load(&no_prg).err(), Some(LoadError::NoPrgBanks));

    let mut unknown = rom(&[], 0, 0);
    unknown[6] = 0x10;
    assert!(System::load(&unknown).is_ok());
    let strict = Config {
        strict_mapper: true,
        ..Config::default()
    };
    assert_eq!(
        System::load_with_config(&unknown, strict).err(),
        Some(LoadError::UnsupportedMapper(1))
    );
}

#[test]
fn debug_write_reaches_cartridge() {
    let mut system = boot(&[0xEA]);
    system.write(0x8005, 0x99);
    assert_eq!(system.read(0xC005), 0x99);
    assert_eq!(system.cartridge().prg()[5], 0x99);
}
