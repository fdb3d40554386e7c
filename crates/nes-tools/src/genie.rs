//! Game Genie subcommands: decode/encode codes and map them onto a
//! ROM's PRG banks.

use std::collections::BTreeSet;

use nes_core::{addr, mapper, GenieCode};

use crate::util::{fail, parse_hex, read_rom};

/// `8123:45` for six-letter values, `89AB?CD:EF` for eight-letter ones
/// (address, optional compare value, replacement value).
fn format_values(code: &GenieCode) -> String {
    match code.comp() {
        None => format!("{:04X}:{:02X}", code.addr(), code.repl()),
        Some(comp) => format!("{:04X}?{:02X}:{:02X}", code.addr(), comp, code.repl()),
    }
}

/// Parse the `aaaa:rr` / `aaaa?cc:rr` value notation.
fn parse_values(text: &str) -> GenieCode {
    const USAGE: &str = "values must be aaaa:rr or aaaa?cc:rr (hexadecimal)";
    let Some((left, repl_text)) = text.split_once(':') else {
        fail(USAGE);
    };
    let (addr_text, comp_text) = match left.split_once('?') {
        Some((addr_text, comp_text)) => (addr_text, Some(comp_text)),
        None => (left, None),
    };

    let addr = parse_hex(addr_text, "address");
    if addr > 0xffff {
        fail("address must be 0000-ffff");
    }
    let repl = parse_hex(repl_text, "replacement value");
    if repl > 0xff {
        fail("replacement value must be 00-ff");
    }

    match comp_text {
        None => GenieCode::six(addr as u16, repl as u8),
        Some(comp_text) => {
            let comp = parse_hex(comp_text, "compare value");
            if comp > 0xff {
                fail("compare value must be 00-ff");
            }
            GenieCode::eight(addr as u16, repl as u8, comp as u8)
        }
    }
}

fn parse_code(text: &str) -> GenieCode {
    match GenieCode::parse(text) {
        Ok(code) => code,
        Err(err) => fail(err),
    }
}

/// Print a code's canonical form and decoded values.
pub fn run_decode(args: &[String]) {
    let [code_text] = args else {
        fail("Usage: nes-tools genie-decode <code>");
    };
    let code = parse_code(code_text);
    println!("{} = {}", code, format_values(&code));
}

/// Print the code for a value triple.
pub fn run_encode(args: &[String]) {
    let [values_text] = args else {
        fail("Usage: nes-tools genie-encode <aaaa:rr | aaaa?cc:rr>");
    };
    let code = parse_values(values_text);
    println!("{} = {}", format_values(&code), code);
}

/// Print the PRG ROM offsets a code affects in a ROM. Eight-letter
/// codes are narrowed by their compare value.
pub fn run_prgaddr(args: &[String]) {
    let [path, code_text] = args else {
        fail("Usage: nes-tools genie-prgaddr <file.nes> <code>");
    };
    let code = parse_code(code_text);
    let (data, header) = read_rom(path);

    let bank_size = mapper::min_prg_bank_size(header.prg_size, header.mapper);
    let prg = header.prg_rom(&data);
    let prg_addrs: Vec<usize> = match code.comp() {
        Some(comp) => addr::cpu_to_prg_matching(code.addr(), bank_size, prg, comp).collect(),
        None => addr::cpu_to_prg(code.addr(), bank_size, prg.len()).collect(),
    };

    let formatted: Vec<String> = prg_addrs
        .iter()
        .map(|prg_addr| format!("0x{:04x}", prg_addr))
        .collect();
    println!("{}", formatted.join(", "));
}

/// Convert a six-letter code into eight-letter candidates, one per
/// distinct byte value found in the candidate banks. Compare values
/// equal to the replacement value are dropped: such a code would patch
/// a byte to the value it already has.
pub fn run_6to8(args: &[String]) {
    let [path, code_text] = args else {
        fail("Usage: nes-tools genie-6to8 <file.nes> <code>");
    };
    let code = parse_code(code_text);
    if code.comp().is_some() {
        fail("the code must be six letters");
    }
    let (data, header) = read_rom(path);

    if !mapper::is_prg_bankswitched(header.prg_size, header.mapper) {
        fail("there is no reason to use eight-letter codes with this game");
    }

    let bank_size = mapper::min_prg_bank_size(header.prg_size, header.mapper);
    let prg = header.prg_rom(&data);
    let mut compare_values: BTreeSet<u8> = addr::cpu_to_prg(code.addr(), bank_size, prg.len())
        .map(|prg_addr| prg[prg_addr])
        .collect();
    compare_values.remove(&code.repl());

    let mut codes: Vec<String> = compare_values
        .iter()
        .map(|&comp| GenieCode::eight(code.addr(), code.repl(), comp).encode())
        .collect();
    codes.sort();
    println!("{}", codes.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_notation_round_trips() {
        let code = parse_values("8123:45");
        assert_eq!((code.addr(), code.repl(), code.comp()), (0x8123, 0x45, None));
        assert_eq!(format_values(&code), "8123:45");

        let code = parse_values("89ab?cd:ef");
        assert_eq!(
            (code.addr(), code.repl(), code.comp()),
            (0x89ab, 0xef, Some(0xcd))
        );
        assert_eq!(format_values(&code), "89AB?CD:EF");
    }

    #[test]
    fn value_notation_forces_rom_addresses() {
        // 0000 is spelled 8000 in canonical form.
        assert_eq!(format_values(&parse_values("0000:00")), "8000:00");
    }
}
