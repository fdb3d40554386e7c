//! `prg2cpu` and `prgbyte` — PRG ROM offset lookups.

use nes_core::{addr, mapper};

use crate::util::{fail, parse_hex, read_rom};

/// Print every CPU address a PRG ROM offset may be visible at.
pub fn run_prg2cpu(args: &[String]) {
    let [path, offset_text] = args else {
        fail("Usage: nes-tools prg2cpu <file.nes> <prg-offset-hex>");
    };
    let (_, header) = read_rom(path);

    let prg_addr = parse_hex(offset_text, "PRG ROM offset") as usize;
    if prg_addr >= header.prg_size {
        fail("PRG ROM offset must be smaller than the PRG ROM size");
    }

    let bank_size = mapper::min_prg_bank_size(header.prg_size, header.mapper);
    let cpu_addrs: Vec<String> = addr::prg_to_cpu(prg_addr, bank_size)
        .map(|cpu_addr| format!("0x{:04x}", cpu_addr))
        .collect();
    println!("Possible CPU addresses: {}", cpu_addrs.join(", "));
}

/// Print the byte value at a PRG ROM offset.
pub fn run_prgbyte(args: &[String]) {
    let [path, offset_text] = args else {
        fail("Usage: nes-tools prgbyte <file.nes> <prg-offset-hex>");
    };
    let (data, header) = read_rom(path);

    let prg_addr = parse_hex(offset_text, "PRG ROM offset") as usize;
    if prg_addr >= header.prg_size {
        fail("PRG ROM offset must be smaller than the PRG ROM size");
    }

    println!("0x{:02x}", header.prg_rom(&data)[prg_addr]);
}
