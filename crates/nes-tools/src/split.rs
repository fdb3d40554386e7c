//! `split` — extract PRG and/or CHR ROM data from an iNES file.

use crate::util::{fail, flag_value, parse_args, read_rom, write_new_file};

pub fn run(args: &[String]) {
    let (flags, positional) = parse_args(args, &[], &[]);
    let [path] = positional[..] else {
        fail("Usage: nes-tools split <file.nes> [--prg FILE] [--chr FILE]");
    };
    let prg_out = flag_value(&flags, "prg");
    let chr_out = flag_value(&flags, "chr");
    if prg_out.is_none() && chr_out.is_none() {
        fail("nothing to do (specify at least one output file)");
    }

    let (data, header) = read_rom(path);

    if let Some(out) = prg_out {
        write_new_file(out, header.prg_rom(&data));
    }
    if let Some(out) = chr_out {
        if header.chr_size > 0 {
            write_new_file(out, header.chr_rom(&data));
        } else {
            log::warn!("{} has no CHR ROM; not writing {}", path, out);
        }
    }
}
