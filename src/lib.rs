//! Core of an NES emulator: the 6502 CPU, its 2 KB of RAM, the CPU bus and the
//! cartridge with its mapper. Video, audio and input live outside this crate and
//! pace themselves off the cycle counts returned by [`System::tick`].

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod memory;
pub mod system;

pub use cartridge::{Cartridge, LoadError, Mirroring};
pub use config::Config;
pub use cpu::{Cpu, CpuBus, DecodeError, Status};
pub use system::System;
