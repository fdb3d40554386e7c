//! `combine` — build an iNES ROM file from PRG and CHR data files.

use nes_core::ines::{self, Mirroring};

use crate::util::{fail, flag_value, has_switch, parse_args, parse_int, read_file, write_new_file};

const USAGE: &str = "Usage: nes-tools combine --prg FILE [--chr FILE] [--mapper N] \
[--mirroring h|v|f] [--extra-ram] <out.nes>";

pub fn run(args: &[String]) {
    let (flags, positional) = parse_args(args, &["extra-ram"], &[]);
    let [out_path] = positional[..] else {
        fail(USAGE);
    };
    let Some(prg_path) = flag_value(&flags, "prg") else {
        fail(USAGE);
    };

    let mapper = match flag_value(&flags, "mapper") {
        Some(text) => match parse_int(text, "mapper number") {
            mapper @ 0..=255 => mapper as u8,
            _ => fail("mapper number must be 0-255"),
        },
        None => 0,
    };
    let mirroring = match flag_value(&flags, "mirroring") {
        None | Some("h") => Mirroring::Horizontal,
        Some("v") => Mirroring::Vertical,
        Some("f") => Mirroring::FourScreen,
        Some(other) => fail(format!("invalid mirroring {:?} (use h, v or f)", other)),
    };
    let extra_ram = has_switch(&flags, "extra-ram");

    let prg = read_file(prg_path);
    let chr = flag_value(&flags, "chr").map(read_file).unwrap_or_default();

    let header = match ines::encode_header(prg.len(), chr.len(), mapper, mirroring, extra_ram) {
        Ok(header) => header,
        Err(err) => fail(err),
    };

    let mut data = Vec::with_capacity(header.len() + prg.len() + chr.len());
    data.extend_from_slice(&header);
    data.extend_from_slice(&prg);
    data.extend_from_slice(&chr);
    write_new_file(out_path, &data);
}
