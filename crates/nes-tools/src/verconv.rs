//! `genie-verconv` — convert a Game Genie code from one version of a
//! game to another (e.g. Japanese to US).
//!
//! Decode the code; find the PRG ROM offsets it affects in file1; take
//! the byte neighborhoods around them; look for similar neighborhoods
//! in file2's PRG ROM; convert the matches back into CPU addresses and
//! encode them into codes.

use std::collections::BTreeSet;

use nes_core::{addr, mapper, GenieCode};

use crate::util::{fail, flag_value, has_switch, parse_args, parse_int, read_rom};

const USAGE: &str = "Usage: nes-tools genie-verconv [--slice-length N] \
[--max-different-bytes N] [--verbose] <code> <file1.nes> <file2.nes>";

/// Byte neighborhood of one affected offset: the bytes before and
/// after the relevant byte, clamped at the PRG ROM edges.
type Neighborhood = (Vec<u8>, Vec<u8>);

fn neighborhoods(prg: &[u8], offsets: &BTreeSet<usize>, slice_len: usize) -> BTreeSet<Neighborhood> {
    offsets
        .iter()
        .map(|&offset| {
            let before = slice_len.min(offset);
            let after = slice_len.min(prg.len() - offset - 1);
            (
                prg[offset - before..offset].to_vec(),
                prg[offset + 1..offset + 1 + after].to_vec(),
            )
        })
        .collect()
}

/// Offsets in `prg` whose byte equals `compare` and whose neighborhood
/// differs from one of `slices` in at most `max_diff` bytes.
fn find_matches(
    prg: &[u8],
    slices: &BTreeSet<Neighborhood>,
    compare: u8,
    max_diff: usize,
) -> BTreeSet<usize> {
    let mut matches = BTreeSet::new();
    for (before, after) in slices {
        for offset in before.len()..prg.len() - after.len() {
            // The relevant byte itself must always match.
            if prg[offset] != compare {
                continue;
            }
            let diff = before
                .iter()
                .zip(&prg[offset - before.len()..offset])
                .chain(after.iter().zip(&prg[offset + 1..offset + 1 + after.len()]))
                .filter(|(expected, actual)| expected != actual)
                .count();
            if diff <= max_diff {
                matches.insert(offset);
            }
        }
    }
    matches
}

fn hex_list<T: std::fmt::LowerHex>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|value| format!("{:04x}", value))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(args: &[String]) {
    let (flags, positional) = parse_args(args, &["verbose"], &[]);
    let [code_text, path1, path2] = positional[..] else {
        fail(USAGE);
    };

    let slice_len = flag_value(&flags, "slice-length")
        .map_or(4, |text| parse_int(text, "--slice-length"));
    if !(1..=20).contains(&slice_len) {
        fail("invalid value for --slice-length (1-20)");
    }
    let max_diff = flag_value(&flags, "max-different-bytes")
        .map_or(1, |text| parse_int(text, "--max-different-bytes"));
    if max_diff >= 2 * slice_len {
        fail("invalid value for --max-different-bytes (0 to twice --slice-length, minus one)");
    }
    let verbose = has_switch(&flags, "verbose");

    let code = match GenieCode::parse(code_text) {
        Ok(code) => code,
        Err(err) => fail(err),
    };
    if verbose {
        let comp = code
            .comp()
            .map_or("none".to_string(), |comp| format!("{:02x}", comp));
        println!(
            "Code: CPU address={:04x}, replace value={:02x}, compare value={}",
            code.addr(),
            code.repl(),
            comp
        );
    }

    // Offsets the code affects in file1.
    let (data1, header1) = read_rom(path1);
    let prg1 = header1.prg_rom(&data1);
    if code.comp().is_none() && mapper::is_prg_bankswitched(header1.prg_size, header1.mapper) {
        fail("six-letter codes not supported because file1 uses PRG ROM bankswitching");
    }
    let bank1 = mapper::min_prg_bank_size(header1.prg_size, header1.mapper);
    let offsets1: BTreeSet<usize> = match code.comp() {
        Some(comp) => addr::cpu_to_prg_matching(code.addr(), bank1, prg1, comp).collect(),
        None => addr::cpu_to_prg(code.addr(), bank1, prg1.len()).collect(),
    };
    if offsets1.is_empty() {
        fail("the code seems to affect file1 in no way");
    }
    if verbose {
        println!(
            "PRG offsets affected in file1: {}",
            hex_list(offsets1.iter().copied())
        );
    }

    // Six-letter codes have no compare value; substitute the byte the
    // code overwrites in file1.
    let compare = code
        .comp()
        .unwrap_or_else(|| prg1[code.addr() as usize & (prg1.len() - 1)]);

    let slices = neighborhoods(prg1, &offsets1, slice_len);
    if verbose {
        println!("Bytestrings around those offsets in file1 (relevant byte in <brackets>):");
        for (before, after) in &slices {
            let before: Vec<String> = before.iter().map(|b| format!("{:02x}", b)).collect();
            let after: Vec<String> = after.iter().map(|b| format!("{:02x}", b)).collect();
            println!(
                "    {} <{:02x}> {}",
                before.join(" "),
                compare,
                after.join(" ")
            );
        }
    }

    // Similar neighborhoods in file2.
    let (data2, header2) = read_rom(path2);
    let prg2 = header2.prg_rom(&data2);
    let offsets2 = find_matches(prg2, &slices, compare, max_diff);
    if offsets2.is_empty() {
        fail("file2 contains nothing similar to what the code affects in file1");
    }

    let bank2 = mapper::min_prg_bank_size(header2.prg_size, header2.mapper);
    let cpu_addrs: BTreeSet<u16> = offsets2
        .iter()
        .flat_map(|&offset| addr::prg_to_cpu(offset, bank2))
        .collect();
    if verbose {
        println!("Matching addresses in file2:");
        println!("    PRG: {}", hex_list(offsets2.iter().copied()));
        println!("    CPU: {}", hex_list(cpu_addrs.iter().copied()));
    }

    // If file2 is not bankswitched a compare value buys nothing;
    // output six-letter codes.
    let out_comp = if mapper::is_prg_bankswitched(header2.prg_size, header2.mapper) {
        Some(compare)
    } else {
        None
    };

    // Nearest address to the original first; ties stay ascending.
    let mut cpu_addrs: Vec<u16> = cpu_addrs.into_iter().collect();
    let original = code.addr();
    cpu_addrs.sort_by_key(|&cpu_addr| (i32::from(cpu_addr) - i32::from(original)).abs());

    let codes: Vec<String> = cpu_addrs
        .iter()
        .map(|&cpu_addr| match out_comp {
            Some(comp) => GenieCode::eight(cpu_addr, code.repl(), comp).encode(),
            None => GenieCode::six(cpu_addr, code.repl()).encode(),
        })
        .collect();
    println!(
        "Game Genie codes for file2 (try the first one first): {}",
        codes.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhoods_clamp_at_prg_edges() {
        let prg: Vec<u8> = (0..32).collect();
        let offsets: BTreeSet<usize> = [1, 16, 30].into_iter().collect();
        let slices = neighborhoods(&prg, &offsets, 4);
        assert!(slices.contains(&(vec![0], vec![2, 3, 4, 5])));
        assert!(slices.contains(&(vec![12, 13, 14, 15], vec![17, 18, 19, 20])));
        assert!(slices.contains(&(vec![26, 27, 28, 29], vec![31])));
    }

    #[test]
    fn matching_tolerates_differing_bytes() {
        let prg = [0x10, 0x20, 0x30, 0xad, 0x40, 0x50, 0x60, 0xad, 0x99, 0x50];
        let slices: BTreeSet<Neighborhood> =
            [(vec![0x20, 0x30], vec![0x40, 0x50])].into_iter().collect();

        // Exact match at 3 only.
        assert_eq!(
            find_matches(&prg, &slices, 0xad, 0),
            [3].into_iter().collect()
        );
        // Offset 7 differs in three surrounding bytes; allowing three
        // mismatches picks it up.
        assert_eq!(
            find_matches(&prg, &slices, 0xad, 3),
            [3, 7].into_iter().collect()
        );
    }
}
