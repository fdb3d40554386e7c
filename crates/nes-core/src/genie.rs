//! Game Genie code cipher.
//!
//! A code is 6 or 8 letters over a 16-letter alphabet; each letter
//! carries one nibble. The nibbles are scrambled across letter
//! positions: a letter's low 3 bits and its neighbor's high bit form
//! one nibble of the packed (address, replacement[, compare]) value.
//! Because of that shared bit, several spellings decode to the same
//! values; re-encoding a decoded code yields the canonical spelling.
//!
//! Reference: https://www.nesdev.org/nesgg.txt

use std::fmt;

/// Letter alphabet; a letter's position is its nibble value.
pub const LETTERS: &str = "APZLGITYEOXUKSVN";

/// Letter-position permutation, shared by both directions. Found at
/// 0x0eb6 in the Game Genie's own PRG ROM.
const DECODE_KEY: [usize; 8] = [3, 5, 2, 4, 1, 0, 7, 6];

#[derive(Debug, thiserror::Error)]
pub enum GenieError {
    #[error("invalid Game Genie code (expected 6 or 8 letters from APZLGITYEOXUKSVN)")]
    InvalidCode,
}

/// A decoded Game Genie code.
///
/// Six-letter codes patch the CPU address unconditionally; eight-letter
/// codes only when the byte read matches the compare value. The stored
/// address always has its top bit set (CPU ROM starts at 0x8000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenieCode {
    Six { addr: u16, repl: u8 },
    Eight { addr: u16, repl: u8, comp: u8 },
}

impl GenieCode {
    /// Six-letter code for `addr`/`repl`. The address top bit is forced
    /// on, so 0x0000 means the same as 0x8000.
    pub fn six(addr: u16, repl: u8) -> Self {
        Self::Six {
            addr: addr | 0x8000,
            repl,
        }
    }

    /// Eight-letter code for `addr`/`repl` with a compare value.
    pub fn eight(addr: u16, repl: u8, comp: u8) -> Self {
        Self::Eight {
            addr: addr | 0x8000,
            repl,
            comp,
        }
    }

    /// Decode a code, case-insensitively.
    pub fn parse(code: &str) -> Result<Self, GenieError> {
        let bytes = code.as_bytes();
        let len = bytes.len();
        if len != 6 && len != 8 {
            return Err(GenieError::InvalidCode);
        }

        // Letter -> nibble value.
        let mut values = [0u8; 8];
        for (value, &letter) in values.iter_mut().zip(bytes) {
            *value = LETTERS
                .bytes()
                .position(|l| l == letter.to_ascii_uppercase())
                .ok_or(GenieError::InvalidCode)? as u8;
        }

        // Descramble: each key position contributes its low 3 bits and
        // the previous letter's high bit, most significant nibble first.
        let mut packed: u32 = 0;
        for &lo in &DECODE_KEY[..len] {
            let hi = (lo + len - 1) % len;
            packed = (packed << 4) | u32::from((values[hi] & 8) | (values[lo] & 7));
        }

        Ok(match len {
            6 => Self::six((packed >> 8) as u16, packed as u8),
            _ => Self::eight((packed >> 16) as u16, (packed >> 8) as u8, packed as u8),
        })
    }

    /// The canonical letter form. For six-letter codes the address top
    /// bit is cleared before packing (third letter in A/P/Z/L/G/I/T/Y);
    /// for eight-letter codes it is set (third letter in
    /// E/O/X/U/K/S/V/N), so the code length is visible from the letters.
    pub fn encode(&self) -> String {
        let (len, mut packed) = match *self {
            Self::Six { addr, repl } => {
                (6, u32::from(addr & 0x7fff) << 8 | u32::from(repl))
            }
            Self::Eight { addr, repl, comp } => (
                8,
                u32::from(addr | 0x8000) << 16 | u32::from(repl) << 8 | u32::from(comp),
            ),
        };

        // Scramble: run the key in reverse, distributing each nibble's
        // low 3 bits and high bit into two letter slots.
        let mut values = [0u8; 8];
        for &lo in DECODE_KEY[..len].iter().rev() {
            let hi = (lo + len - 1) % len;
            values[lo] |= (packed & 0b0111) as u8;
            values[hi] |= (packed & 0b1000) as u8;
            packed >>= 4;
        }

        values[..len]
            .iter()
            .map(|&v| LETTERS.as_bytes()[v as usize] as char)
            .collect()
    }

    pub fn addr(&self) -> u16 {
        match *self {
            Self::Six { addr, .. } | Self::Eight { addr, .. } => addr,
        }
    }

    pub fn repl(&self) -> u8 {
        match *self {
            Self::Six { repl, .. } | Self::Eight { repl, .. } => repl,
        }
    }

    pub fn comp(&self) -> Option<u8> {
        match *self {
            Self::Six { .. } => None,
            Self::Eight { comp, .. } => Some(comp),
        }
    }
}

impl fmt::Display for GenieCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(code: &str) -> (u16, u8, Option<u8>) {
        let code = GenieCode::parse(code).unwrap();
        (code.addr(), code.repl(), code.comp())
    }

    #[test]
    fn decode_six_letter_codes() {
        // One vector per letter position, plus the extremes.
        assert_eq!(decode("AAAAAA"), (0x8000, 0x00, None));
        assert_eq!(decode("NNYNNN"), (0xffff, 0xff, None));
        assert_eq!(decode("NAAAAA"), (0x8000, 0x87, None));
        assert_eq!(decode("ANAAAA"), (0x8080, 0x70, None));
        assert_eq!(decode("AAYAAA"), (0x8070, 0x00, None));
        assert_eq!(decode("AAANAA"), (0xf008, 0x00, None));
        assert_eq!(decode("AAAANA"), (0x8807, 0x00, None));
        assert_eq!(decode("AAAAAN"), (0x8700, 0x08, None));
    }

    #[test]
    fn decode_eight_letter_codes() {
        assert_eq!(decode("AAEAAAAA"), (0x8000, 0x00, Some(0x00)));
        assert_eq!(decode("NNNNNNNN"), (0xffff, 0xff, Some(0xff)));
        assert_eq!(decode("NAEAAAAA"), (0x8000, 0x87, Some(0x00)));
        assert_eq!(decode("ANEAAAAA"), (0x8080, 0x70, Some(0x00)));
        assert_eq!(decode("AANAAAAA"), (0x8070, 0x00, Some(0x00)));
        assert_eq!(decode("AAENAAAA"), (0xf008, 0x00, Some(0x00)));
        assert_eq!(decode("AAEANAAA"), (0x8807, 0x00, Some(0x00)));
        assert_eq!(decode("AAEAANAA"), (0x8700, 0x00, Some(0x08)));
        assert_eq!(decode("AAEAAANA"), (0x8000, 0x00, Some(0x87)));
        assert_eq!(decode("AAEAAAAN"), (0x8000, 0x08, Some(0x70)));
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(decode("aaaaan"), (0x8700, 0x08, None));
        assert_eq!(decode("naeaaaaa"), (0x8000, 0x87, Some(0x00)));
    }

    #[test]
    fn rejects_invalid_codes() {
        for code in ["", "AAAAA", "AAAAAAA", "AAAAAAAAA", "BAAAAA", "AAAAA1"] {
            assert!(GenieCode::parse(code).is_err(), "{:?} accepted", code);
        }
    }

    #[test]
    fn encode_six_letter_codes() {
        assert_eq!(GenieCode::six(0x8000, 0x00).encode(), "AAAAAA");
        assert_eq!(GenieCode::six(0xffff, 0xff).encode(), "NNYNNN");
        assert_eq!(GenieCode::six(0x8000, 0x87).encode(), "NAAAAA");
        assert_eq!(GenieCode::six(0x8080, 0x70).encode(), "ANAAAA");
        assert_eq!(GenieCode::six(0x8070, 0x00).encode(), "AAYAAA");
        assert_eq!(GenieCode::six(0xf008, 0x00).encode(), "AAANAA");
        assert_eq!(GenieCode::six(0x8807, 0x00).encode(), "AAAANA");
        assert_eq!(GenieCode::six(0x8700, 0x08).encode(), "AAAAAN");
    }

    #[test]
    fn encode_eight_letter_codes() {
        assert_eq!(GenieCode::eight(0x8000, 0x00, 0x00).encode(), "AAEAAAAA");
        assert_eq!(GenieCode::eight(0xffff, 0xff, 0xff).encode(), "NNNNNNNN");
        assert_eq!(GenieCode::eight(0x8000, 0x87, 0x00).encode(), "NAEAAAAA");
        assert_eq!(GenieCode::eight(0x8080, 0x70, 0x00).encode(), "ANEAAAAA");
        assert_eq!(GenieCode::eight(0x8700, 0x00, 0x08).encode(), "AAEAANAA");
        assert_eq!(GenieCode::eight(0x8000, 0x00, 0x87).encode(), "AAEAAANA");
        assert_eq!(GenieCode::eight(0x8000, 0x08, 0x70).encode(), "AAEAAAAN");
    }

    #[test]
    fn address_top_bit_is_forced() {
        // 0x0000 and 0x8000 are the same address.
        assert_eq!(GenieCode::six(0x0000, 0x00), GenieCode::six(0x8000, 0x00));
        assert_eq!(
            GenieCode::eight(0x0000, 0x00, 0x00).encode(),
            GenieCode::eight(0x8000, 0x00, 0x00).encode()
        );
    }

    #[test]
    fn canonicalization_is_idempotent() {
        // "AAEAAA" spells the same values as "AAAAAA" (the shared
        // don't-care bit); re-encoding lands on the canonical form.
        let decoded = GenieCode::parse("AAEAAA").unwrap();
        assert_eq!(decoded, GenieCode::six(0x8000, 0x00));
        assert_eq!(decoded.encode(), "AAAAAA");

        for code in ["AAAAAA", "AAEAAA", "NNYNNN", "IGZALP", "AAEAAAAA", "NNNNNNNN"] {
            let canonical = GenieCode::parse(code).unwrap().encode();
            let again = GenieCode::parse(&canonical).unwrap();
            assert_eq!(again.encode(), canonical);
            assert_eq!(again, GenieCode::parse(code).unwrap());
        }
    }

    #[test]
    fn third_letter_distinguishes_code_length() {
        let short = "APZLGITY";
        let long = "EOXUKSVN";
        for repl in [0x00, 0x5a, 0xff] {
            let third = GenieCode::six(0x9234, repl).encode().as_bytes()[2];
            assert!(short.bytes().any(|b| b == third));
            let third = GenieCode::eight(0x9234, repl, 0x12).encode().as_bytes()[2];
            assert!(long.bytes().any(|b| b == third));
        }
    }
}
