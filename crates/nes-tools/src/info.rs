//! `info` — print ROM information as one CSV line.

use crate::util::{fail, read_rom};

const FIELDS: &str = "file,size,prg size,chr size,mapper,mapper name,mirroring,\
extra ram,trainer size,file crc32,prg crc32,chr crc32";

pub fn run(args: &[String]) {
    let [path] = args else {
        fail(format!(
            "Usage: nes-tools info <file.nes>\nOutput fields: {}",
            FIELDS
        ));
    };
    let (data, header) = read_rom(path);

    let file_crc = crc32fast::hash(&data);
    let prg_crc = crc32fast::hash(header.prg_rom(&data));
    let chr_crc = crc32fast::hash(header.chr_rom(&data));

    let name = std::path::Path::new(path)
        .file_name()
        .map_or(path.as_str(), |name| name.to_str().unwrap_or(path.as_str()));

    println!(
        "\"{}\",{},{},{},{},\"{}\",\"{}\",\"{}\",{},\"{:08x}\",\"{:08x}\",\"{:08x}\"",
        name,
        data.len(),
        header.prg_size,
        header.chr_size,
        header.mapper,
        nes_core::mapper::mapper_name(header.mapper),
        header.mirroring,
        if header.extra_ram { "yes" } else { "no" },
        header.trainer_size,
        file_crc,
        prg_crc,
        chr_crc,
    );
}
