//! CHR graphics subcommands: PNG conversion and color swapping.
//!
//! CHR data is laid out as rows of 16 tiles; images are therefore
//! always 128 pixels wide and one 8-pixel row tall per 256 bytes.

use std::path::Path;

use nes_core::{tile, Header};

use crate::util::{fail, flag_list, flag_value, parse_args, parse_hex, parse_int, read_file,
                  read_rom, write_new_file};

/// Grayscale ramp used when no `--palette` is given.
const DEFAULT_PALETTE: [&str; 4] = ["000", "555", "aaa", "fff"];

const TILES_PER_ROW: usize = 16;
const ROW_LEN: usize = TILES_PER_ROW * tile::TILE_LEN;

/// Decode a 3- or 6-digit hexadecimal RGB color code.
fn decode_color_code(text: &str) -> (u8, u8, u8) {
    let value = parse_hex(text, "color code");
    match text.len() {
        3 => (
            (value >> 8 & 0xf) as u8 * 0x11,
            (value >> 4 & 0xf) as u8 * 0x11,
            (value & 0xf) as u8 * 0x11,
        ),
        6 => (
            (value >> 16 & 0xff) as u8,
            (value >> 8 & 0xff) as u8,
            (value & 0xff) as u8,
        ),
        _ => fail("color code must be 3 or 6 hexadecimal digits"),
    }
}

fn palette_arg(flags: &[(&str, Vec<&str>)]) -> [(u8, u8, u8); 4] {
    let codes = flag_list(flags, "palette")
        .unwrap_or_else(|| DEFAULT_PALETTE.to_vec());
    let mut palette = [(0, 0, 0); 4];
    for (slot, code) in palette.iter_mut().zip(&codes) {
        *slot = decode_color_code(code);
    }
    palette
}

/// The CHR bytes of an input file: the CHR ROM of an iNES file, or the
/// whole file as raw CHR data.
fn chr_data<'a>(path: &str, data: &'a [u8]) -> &'a [u8] {
    if path.to_lowercase().ends_with(".nes") {
        let header = match Header::parse(data, data.len()) {
            Ok(header) => header,
            Err(err) => fail(format!("{}: {}", path, err)),
        };
        if header.chr_size == 0 {
            fail("iNES ROM file has no CHR ROM");
        }
        return &data[header.chr_start..header.chr_start + header.chr_size];
    }
    if data.is_empty() || data.len() % ROW_LEN != 0 {
        fail("raw CHR data must be a nonzero multiple of 256 bytes");
    }
    data
}

/// `chr-decode` — render CHR data as a PNG image.
pub fn run_decode(args: &[String]) {
    let (flags, positional) = parse_args(args, &[], &[("palette", 4)]);
    let [in_path, out_path] = positional[..] else {
        fail("Usage: nes-tools chr-decode [--palette C C C C] <file.nes|file.chr> <out.png>");
    };
    let palette = palette_arg(&flags);

    let data = read_file(in_path);
    let chr = chr_data(in_path, &data);

    let height = chr.len() / ROW_LEN * 8;
    let mut img = image::RgbImage::new((TILES_PER_ROW * 8) as u32, height as u32);
    for (tile_index, planes) in chr.chunks_exact(tile::TILE_LEN).enumerate() {
        let tile_x = tile_index % TILES_PER_ROW * 8;
        let tile_y = tile_index / TILES_PER_ROW * 8;
        for y in 0..8 {
            let pixels = tile::decode_tile_slice(planes[y], planes[y + 8]);
            for (x, &pixel) in pixels.iter().enumerate() {
                let (r, g, b) = palette[pixel as usize];
                img.put_pixel(
                    (tile_x + x) as u32,
                    (tile_y + y) as u32,
                    image::Rgb([r, g, b]),
                );
            }
        }
    }

    if Path::new(out_path).exists() {
        fail(format!("{} already exists", out_path));
    }
    if let Err(err) = img.save(out_path) {
        fail(format!("error writing {}: {}", out_path, err));
    }
}

/// `chr-encode` — convert a PNG image back into raw CHR data.
pub fn run_encode(args: &[String]) {
    let (flags, positional) = parse_args(args, &[], &[("palette", 4)]);
    let [in_path, out_path] = positional[..] else {
        fail("Usage: nes-tools chr-encode [--palette C C C C] <in.png> <out.chr>");
    };
    let palette = palette_arg(&flags);
    if palette.iter().collect::<std::collections::HashSet<_>>().len() < 4 {
        fail("all colors in --palette must be distinct");
    }

    let img = match image::open(in_path) {
        Ok(img) => img.into_rgb8(),
        Err(err) => fail(format!("error reading {}: {}", in_path, err)),
    };
    let (width, height) = img.dimensions();
    if width != (TILES_PER_ROW * 8) as u32 || height == 0 || height % 8 != 0 {
        fail("image must be 128 pixels wide and a multiple of 8 pixels tall");
    }

    let tiles = (width / 8 * height / 8) as usize;
    let mut chr = vec![0u8; tiles * tile::TILE_LEN];
    for (tile_index, planes) in chr.chunks_exact_mut(tile::TILE_LEN).enumerate() {
        let tile_x = tile_index % TILES_PER_ROW * 8;
        let tile_y = tile_index / TILES_PER_ROW * 8;
        for y in 0..8 {
            let mut pixels = [0u8; 8];
            for (x, pixel) in pixels.iter_mut().enumerate() {
                let rgb = img.get_pixel((tile_x + x) as u32, (tile_y + y) as u32);
                let color = (rgb[0], rgb[1], rgb[2]);
                *pixel = match palette.iter().position(|&c| c == color) {
                    Some(index) => index as u8,
                    None => fail(format!(
                        "image color #{:02x}{:02x}{:02x} not in --palette",
                        color.0, color.1, color.2
                    )),
                };
            }
            let (lo, hi) = tile::encode_tile_slice(pixels);
            planes[y] = lo;
            planes[y + 8] = hi;
        }
    }
    write_new_file(out_path, &chr);
}

/// `color-swap` — remap colors 0-3 in the CHR ROM tiles of an iNES
/// file.
pub fn run_color_swap(args: &[String]) {
    let (flags, positional) = parse_args(args, &[], &[("colors", 4)]);
    let [in_path, out_path] = positional[..] else {
        fail("Usage: nes-tools color-swap [--colors A B C D] [--first-tile N] \
              [--tile-count N] <in.nes> <out.nes>");
    };

    let colors: [u8; 4] = match flag_list(&flags, "colors") {
        Some(codes) => {
            let mut colors = [0u8; 4];
            for (slot, code) in colors.iter_mut().zip(&codes) {
                *slot = match parse_int(code, "color") {
                    color @ 0..=3 => color as u8,
                    _ => fail("colors must be 0-3"),
                };
            }
            colors
        }
        None => [0, 2, 3, 1],
    };
    let first_tile = flag_value(&flags, "first-tile")
        .map_or(0, |text| parse_int(text, "--first-tile"));
    let tile_count = flag_value(&flags, "tile-count")
        .map_or(0, |text| parse_int(text, "--tile-count"));

    let (mut data, header) = read_rom(in_path);
    if header.chr_size == 0 {
        fail("input file has no CHR ROM");
    }

    let total_tiles = header.chr_size / tile::TILE_LEN;
    if first_tile >= total_tiles {
        fail("--first-tile is past the end of CHR ROM");
    }
    let count = if tile_count == 0 {
        total_tiles - first_tile
    } else {
        tile_count
    };
    if first_tile + count > total_tiles {
        fail("tile range extends past the end of CHR ROM");
    }

    for tile_index in first_tile..first_tile + count {
        let base = header.chr_start + tile_index * tile::TILE_LEN;
        for y in 0..8 {
            let pixels = tile::decode_tile_slice(data[base + y], data[base + 8 + y]);
            let (lo, hi) = tile::encode_tile_slice(pixels.map(|p| colors[p as usize]));
            data[base + y] = lo;
            data[base + 8 + y] = hi;
        }
    }
    write_new_file(out_path, &data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_color_codes() {
        assert_eq!(decode_color_code("000"), (0x00, 0x00, 0x00));
        assert_eq!(decode_color_code("fff"), (0xff, 0xff, 0xff));
        assert_eq!(decode_color_code("5a0"), (0x55, 0xaa, 0x00));
        assert_eq!(decode_color_code("123456"), (0x12, 0x34, 0x56));
    }
}
