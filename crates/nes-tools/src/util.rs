//! Shared helpers for the command-line tools: flag scanning, hex
//! parsing and checked file access. Every error path prints a message
//! and exits with status 1.

use std::path::Path;
use std::process::exit;

use nes_core::Header;

pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}", msg);
    exit(1);
}

/// Split `args` into flags and positional arguments. `switches` lists
/// flags that take no value, `multi` flags that take several
/// space-separated values; every other `--flag` takes exactly one.
pub fn parse_args<'a>(
    args: &'a [String],
    switches: &[&str],
    multi: &[(&str, usize)],
) -> (Vec<(&'a str, Vec<&'a str>)>, Vec<&'a str>) {
    let mut flags: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let Some(name) = arg.strip_prefix("--") else {
            positional.push(arg.as_str());
            continue;
        };
        let count = if switches.contains(&name) {
            0
        } else {
            multi
                .iter()
                .find(|(flag, _)| *flag == name)
                .map_or(1, |&(_, count)| count)
        };
        let values: Vec<&str> = iter.by_ref().take(count).map(String::as_str).collect();
        if values.len() < count {
            fail(format!("--{} needs {} value(s)", name, count));
        }
        flags.push((name, values));
    }
    (flags, positional)
}

/// The value of a single-value `--name`, if given.
pub fn flag_value<'a>(flags: &[(&str, Vec<&'a str>)], name: &str) -> Option<&'a str> {
    flags
        .iter()
        .find(|(flag, _)| *flag == name)
        .map(|(_, values)| values[0])
}

/// The values of a multi-value `--name`, if given.
pub fn flag_list<'a>(flags: &[(&str, Vec<&'a str>)], name: &str) -> Option<Vec<&'a str>> {
    flags
        .iter()
        .find(|(flag, _)| *flag == name)
        .map(|(_, values)| values.clone())
}

pub fn has_switch(flags: &[(&str, Vec<&str>)], name: &str) -> bool {
    flags.iter().any(|(flag, _)| *flag == name)
}

pub fn parse_hex(text: &str, what: &str) -> u32 {
    match u32::from_str_radix(text, 16) {
        Ok(value) => value,
        Err(_) => fail(format!("{} must be a hexadecimal integer", what)),
    }
}

pub fn parse_int(text: &str, what: &str) -> usize {
    match text.parse() {
        Ok(value) => value,
        Err(_) => fail(format!("{} must be a nonnegative integer", what)),
    }
}

pub fn read_file(path: &str) -> Vec<u8> {
    match std::fs::read(path) {
        Ok(data) => data,
        Err(err) => fail(format!("error reading {}: {}", path, err)),
    }
}

/// Read an iNES ROM file and parse its header.
pub fn read_rom(path: &str) -> (Vec<u8>, Header) {
    let data = read_file(path);
    match Header::parse(&data, data.len()) {
        Ok(header) => (data, header),
        Err(err) => fail(format!("{}: {}", path, err)),
    }
}

/// Write a new file, refusing to overwrite an existing one.
pub fn write_new_file(path: &str, data: &[u8]) {
    if Path::new(path).exists() {
        fail(format!("{} already exists", path));
    }
    if let Err(err) = std::fs::write(path, data) {
        fail(format!("error writing {}: {}", path, err));
    }
}
