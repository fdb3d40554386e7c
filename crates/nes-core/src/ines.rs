//! iNES container header codec.
//!
//! The iNES format is a 16-byte header followed by an optional 512-byte
//! trainer, PRG ROM and optional CHR ROM. Only the original iNES layout
//! is handled here; NES 2.0 extensions and the VS System/PlayChoice-10
//! flags are ignored.
//!
//! Reference: https://www.nesdev.org/wiki/INES

use std::fmt;

pub const HEADER_LEN: usize = 16;
pub const TRAINER_LEN: usize = 512;
/// PRG ROM size unit (byte 4 of the header counts these).
pub const PRG_UNIT: usize = 16 * 1024;
/// CHR ROM size unit (byte 5 of the header counts these).
pub const CHR_UNIT: usize = 8 * 1024;

const MAGIC: &[u8; 4] = b"NES\x1a";

/// Name table mirroring declared in flags 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    /// Four-screen VRAM; overrides the horizontal/vertical bit.
    FourScreen,
}

impl fmt::Display for Mirroring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
            Self::FourScreen => write!(f, "four-screen"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("file too short for an iNES header (need 16 bytes, got {0})")]
    TooShort(usize),
    #[error("iNES magic not found")]
    BadMagic,
    #[error("file truncated (header declares {declared} bytes, file has {actual})")]
    Truncated { declared: usize, actual: usize },
    #[error("invalid PRG ROM size {0} (need a multiple of 16 KiB, 16 KiB to 4 MiB)")]
    InvalidPrgSize(usize),
    #[error("invalid CHR ROM size {0} (need a multiple of 8 KiB, at most 2040 KiB)")]
    InvalidChrSize(usize),
}

/// Parsed iNES header.
///
/// The start offsets are derived once at parse time; the value is
/// immutable afterwards and safe to share freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub trainer_start: usize,
    /// 0 or 512.
    pub trainer_size: usize,
    pub prg_start: usize,
    pub prg_size: usize,
    pub chr_start: usize,
    /// 0 means the cartridge uses CHR RAM instead of CHR ROM.
    pub chr_size: usize,
    pub mapper: u8,
    pub mirroring: Mirroring,
    /// Battery-backed or extra PRG RAM present.
    pub extra_ram: bool,
}

impl Header {
    /// Parse an iNES header.
    ///
    /// `bytes` must hold at least the first 16 bytes of the file;
    /// `file_size` is the true on-disk size, needed to detect files
    /// whose header declares more data than the file contains. Files
    /// larger than the declared size are accepted.
    pub fn parse(bytes: &[u8], file_size: usize) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_LEN || file_size < HEADER_LEN {
            return Err(HeaderError::TooShort(bytes.len().min(file_size)));
        }
        if &bytes[..4] != MAGIC {
            return Err(HeaderError::BadMagic);
        }

        // PRG ROM size unit count 0 means 256 (4 MiB).
        let prg_units = bytes[4] as usize;
        let prg_size = if prg_units == 0 { 256 } else { prg_units } * PRG_UNIT;
        let chr_size = bytes[5] as usize * CHR_UNIT;

        let flags6 = bytes[6];
        let flags7 = bytes[7];
        // Bytes 8-15 are reserved and ignored.

        let trainer_size = if flags6 & 0x04 != 0 { TRAINER_LEN } else { 0 };

        let declared = HEADER_LEN + trainer_size + prg_size + chr_size;
        if file_size < declared {
            return Err(HeaderError::Truncated {
                declared,
                actual: file_size,
            });
        }

        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let prg_start = HEADER_LEN + trainer_size;
        Ok(Header {
            trainer_start: HEADER_LEN,
            trainer_size,
            prg_start,
            prg_size,
            chr_start: prg_start + prg_size,
            chr_size,
            mapper: (flags7 & 0xf0) | (flags6 >> 4),
            mirroring,
            extra_ram: flags6 & 0x02 != 0,
        })
    }

    /// The PRG ROM bytes of `data` (the whole file this header was
    /// parsed from).
    pub fn prg_rom<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.prg_start..self.prg_start + self.prg_size]
    }

    /// The CHR ROM bytes of `data`; empty if the cartridge has none.
    pub fn chr_rom<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.chr_start..self.chr_start + self.chr_size]
    }
}

/// Encode a 16-byte iNES header.
///
/// A PRG size of exactly 256 units (4 MiB) is written as byte value 0.
/// Trainers are never encoded; `parse` is the exact inverse for any
/// header with trainer size 0.
pub fn encode_header(
    prg_size: usize,
    chr_size: usize,
    mapper: u8,
    mirroring: Mirroring,
    extra_ram: bool,
) -> Result<[u8; HEADER_LEN], HeaderError> {
    if prg_size == 0 || prg_size % PRG_UNIT != 0 || prg_size / PRG_UNIT > 256 {
        return Err(HeaderError::InvalidPrgSize(prg_size));
    }
    if chr_size % CHR_UNIT != 0 || chr_size / CHR_UNIT > 255 {
        return Err(HeaderError::InvalidChrSize(chr_size));
    }

    let mut flags6 = (mapper & 0x0f) << 4;
    flags6 |= match mirroring {
        Mirroring::Horizontal => 0x00,
        Mirroring::Vertical => 0x01,
        Mirroring::FourScreen => 0x08,
    };
    if extra_ram {
        flags6 |= 0x02;
    }

    let mut header = [0u8; HEADER_LEN];
    header[..4].copy_from_slice(MAGIC);
    header[4] = (prg_size / PRG_UNIT % 256) as u8;
    header[5] = (chr_size / CHR_UNIT) as u8;
    header[6] = flags6;
    header[7] = mapper & 0xf0;
    // Bytes 8-15 stay zero.
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom(header: [u8; HEADER_LEN], payload: usize) -> Vec<u8> {
        let mut data = header.to_vec();
        data.resize(HEADER_LEN + payload, 0);
        data
    }

    #[test]
    fn parse_minimal_rom() {
        let header =
            encode_header(32 * 1024, 8 * 1024, 1, Mirroring::Vertical, true).unwrap();
        let data = rom(header, 32 * 1024 + 8 * 1024);
        let parsed = Header::parse(&data, data.len()).unwrap();

        assert_eq!(parsed.prg_start, 16);
        assert_eq!(parsed.prg_size, 32 * 1024);
        assert_eq!(parsed.chr_start, 16 + 32 * 1024);
        assert_eq!(parsed.chr_size, 8 * 1024);
        assert_eq!(parsed.mapper, 1);
        assert_eq!(parsed.mirroring, Mirroring::Vertical);
        assert!(parsed.extra_ram);
        assert_eq!(parsed.trainer_size, 0);
    }

    #[test]
    fn round_trip_all_fields() {
        for (prg, chr, mapper, mirroring, extra_ram) in [
            (16 * 1024, 0, 0, Mirroring::Horizontal, false),
            (128 * 1024, 128 * 1024, 4, Mirroring::FourScreen, false),
            (512 * 1024, 16 * 1024, 255, Mirroring::Vertical, true),
        ] {
            let header = encode_header(prg, chr, mapper, mirroring, extra_ram).unwrap();
            let data = rom(header, prg + chr);
            let parsed = Header::parse(&data, data.len()).unwrap();
            assert_eq!(parsed.prg_size, prg);
            assert_eq!(parsed.chr_size, chr);
            assert_eq!(parsed.mapper, mapper);
            assert_eq!(parsed.mirroring, mirroring);
            assert_eq!(parsed.extra_ram, extra_ram);
        }
    }

    #[test]
    fn prg_unit_count_256_wraps_to_zero() {
        let header =
            encode_header(256 * 16 * 1024, 0, 0, Mirroring::Horizontal, false).unwrap();
        assert_eq!(header[4], 0);

        let data = rom(header, 256 * 16 * 1024);
        let parsed = Header::parse(&data, data.len()).unwrap();
        assert_eq!(parsed.prg_size, 256 * 16 * 1024);
    }

    #[test]
    fn trainer_shifts_derived_offsets() {
        let mut header = encode_header(16 * 1024, 0, 0, Mirroring::Horizontal, false).unwrap();
        header[6] |= 0x04;
        let data = rom(header, TRAINER_LEN + 16 * 1024);
        let parsed = Header::parse(&data, data.len()).unwrap();
        assert_eq!(parsed.trainer_start, 16);
        assert_eq!(parsed.trainer_size, TRAINER_LEN);
        assert_eq!(parsed.prg_start, 16 + TRAINER_LEN);
        assert_eq!(parsed.chr_start, 16 + TRAINER_LEN + 16 * 1024);
    }

    #[test]
    fn four_screen_overrides_vertical() {
        let mut header = encode_header(16 * 1024, 0, 0, Mirroring::Horizontal, false).unwrap();
        header[6] |= 0x08 | 0x01;
        let data = rom(header, 16 * 1024);
        let parsed = Header::parse(&data, data.len()).unwrap();
        assert_eq!(parsed.mirroring, Mirroring::FourScreen);
    }

    #[test]
    fn rejects_short_header() {
        let err = Header::parse(&[0u8; 15], 15).unwrap_err();
        assert!(matches!(err, HeaderError::TooShort(15)));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = rom([0u8; HEADER_LEN], 16 * 1024);
        data[..4].copy_from_slice(b"NES\x00");
        data[4] = 1;
        let err = Header::parse(&data, data.len()).unwrap_err();
        assert!(matches!(err, HeaderError::BadMagic));
    }

    #[test]
    fn rejects_truncated_file() {
        // Declares 32 KiB PRG but the file is only the header.
        let header = encode_header(32 * 1024, 0, 0, Mirroring::Horizontal, false).unwrap();
        let err = Header::parse(&header, HEADER_LEN).unwrap_err();
        assert!(matches!(err, HeaderError::Truncated { .. }));
    }

    #[test]
    fn accepts_oversized_file() {
        let header = encode_header(16 * 1024, 0, 0, Mirroring::Horizontal, false).unwrap();
        let data = rom(header, 16 * 1024 + 1000);
        assert!(Header::parse(&data, data.len()).is_ok());
    }

    #[test]
    fn encode_rejects_bad_sizes() {
        assert!(matches!(
            encode_header(0, 0, 0, Mirroring::Horizontal, false),
            Err(HeaderError::InvalidPrgSize(0))
        ));
        assert!(matches!(
            encode_header(16 * 1024 + 1, 0, 0, Mirroring::Horizontal, false),
            Err(HeaderError::InvalidPrgSize(_))
        ));
        assert!(matches!(
            encode_header(257 * 16 * 1024, 0, 0, Mirroring::Horizontal, false),
            Err(HeaderError::InvalidPrgSize(_))
        ));
        assert!(matches!(
            encode_header(16 * 1024, 100, 0, Mirroring::Horizontal, false),
            Err(HeaderError::InvalidChrSize(100))
        ));
        assert!(matches!(
            encode_header(16 * 1024, 256 * 8 * 1024, 0, Mirroring::Horizontal, false),
            Err(HeaderError::InvalidChrSize(_))
        ));
    }
}
