pub mod mapper;
pub mod mapper0;

use thiserror::Error;

use crate::config::Config;
use self::mapper::{CartridgeMapper, Mapper};

pub const HEADER_SIZE: usize = 16;
pub const TRAINER_SIZE: usize = 512;
pub const PRG_BANK_SIZE: usize = 0x4000;
pub const CHR_BANK_SIZE: usize = 0x2000;

const MAGIC: &[u8; 4] = b"NES\x1A";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("ROM image too small for a header ({len} bytes)")]
    TooShort { len: usize },
    #[error("invalid iNES header magic")]
    BadMagic,
    #[error("ROM declares zero PRG banks")]
    NoPrgBanks,
    #[error("ROM truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// A parsed cartridge image: the PRG and CHR regions plus the board that maps
/// bus addresses into them.
pub struct Cartridge {
    prg: Vec<u8>,
    chr: Vec<u8>,
    prg_banks: u8,
    chr_banks: u8,
    mapper_id: u8,
    mirroring: Mirroring,
    battery_backed: bool,
    mapper: CartridgeMapper,
}

impl Cartridge {
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, LoadError> {
        Self::load_with_config(data, &Config::default())
    }

    pub fn load_with_config(data: &[u8], config: &Config) -> Result<Self, LoadError> {
        if data.len() < HEADER_SIZE {
            return Err(LoadError::TooShort { len: data.len() });
        }

        if &data[0..4] != MAGIC {
            return Err(LoadError::BadMagic);
        }

        let prg_banks = data[4];
        let chr_banks = data[5];
        if prg_banks == 0 {
            return Err(LoadError::NoPrgBanks);
        }

        let prg_size = prg_banks as usize * PRG_BANK_SIZE;
        let chr_size = chr_banks as usize * CHR_BANK_SIZE;

        let flags_6 = data[6];
        let flags_7 = data[7];

        let mirroring = if (flags_6 & 0x08) != 0 {
            Mirroring::FourScreen
        } else if (flags_6 & 0x01) != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let battery_backed = (flags_6 & 0x02) != 0;
        let trainer_present = (flags_6 & 0x04) != 0;

        let mapper_id = (flags_7 & 0xF0) | ((flags_6 & 0xF0) >> 4);

        let prg_start = HEADER_SIZE + if trainer_present { TRAINER_SIZE } else { 0 };
        let chr_start = prg_start + prg_size;
        let expected = chr_start + chr_size;

        if data.len() < expected {
            return Err(LoadError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let prg = data[prg_start..chr_start].to_vec();
        let chr = if chr_size > 0 {
            data[chr_start..expected].to_vec()
        } else {
            vec![0; CHR_BANK_SIZE]
        };

        let mapper = match CartridgeMapper::for_id(mapper_id, prg_banks) {
            Some(mapper) => mapper,
            None if config.strict_mapper => return Err(LoadError::UnsupportedMapper(mapper_id)),
            None => {
                log::warn!("Unsupported mapper {}, falling back to NROM", mapper_id);
                CartridgeMapper::fallback(prg_banks)
            }
        };

        log::info!(
            "Cartridge: PRG {}x16KB, CHR {}x8KB, mirroring {:?}, mapper {} ({})",
            prg_banks,
            chr_banks,
            mirroring,
            mapper_id,
            mapper.name()
        );

        Ok(Cartridge {
            prg,
            chr,
            prg_banks,
            chr_banks,
            mapper_id,
            mirroring,
            battery_backed,
            mapper,
        })
    }

    pub fn cpu_read(&self, addr: u16) -> u8 {
        let offset = self.mapper.cpu_map_read(addr);
        self.prg[offset % self.prg.len()]
    }

    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        let offset = self.mapper.cpu_map_write(addr) % self.prg.len();
        log::trace!("PRG write {:04X} -> offset {:04X} = {:02X}", addr, offset, value);
        self.prg[offset] = value;
    }

    pub fn ppu_read(&self, addr: u16) -> u8 {
        let offset = self.mapper.ppu_map_read(addr);
        self.chr[offset % self.chr.len()]
    }

    pub fn ppu_write(&mut self, addr: u16, value: u8) {
        let offset = self.mapper.ppu_map_write(addr) % self.chr.len();
        self.chr[offset] = value;
    }

    pub fn prg(&self) -> &[u8] {
        &self.prg
    }

    pub fn chr(&self) -> &[u8] {
        &self.chr
    }

    pub fn prg_banks(&self) -> u8 {
        self.prg_banks
    }

    pub fn chr_banks(&self) -> u8 {
        self.chr_banks
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    pub fn mapper(&self) -> &CartridgeMapper {
        &self.mapper
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn has_battery(&self) -> bool {
        self.battery_backed
    }
}
