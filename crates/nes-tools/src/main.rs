mod chr;
mod combine;
mod genie;
mod info;
mod prg;
mod split;
mod util;
mod verconv;

const USAGE: &str = "\
Usage: nes-tools <command> [args]

ROM file commands:
  info <file.nes>
        Print ROM information as one CSV line.
  split <file.nes> [--prg FILE] [--chr FILE]
        Extract PRG and/or CHR ROM data.
  combine --prg FILE [--chr FILE] [--mapper N] [--mirroring h|v|f]
          [--extra-ram] <out.nes>
        Build an iNES ROM file from data files.
  prg2cpu <file.nes> <prg-offset-hex>
        Convert a PRG ROM offset into possible CPU addresses.
  prgbyte <file.nes> <prg-offset-hex>
        Print the byte value at a PRG ROM offset.

Game Genie commands:
  genie-decode <code>
        Decode a code; print its canonical form and values.
  genie-encode <aaaa:rr | aaaa?cc:rr>
        Encode values (hexadecimal) into a code.
  genie-prgaddr <file.nes> <code>
        PRG ROM offsets a code affects in a ROM.
  genie-6to8 <file.nes> <code>
        Convert a six-letter code into eight-letter candidates.
  genie-verconv [--slice-length N] [--max-different-bytes N] [--verbose]
                <code> <file1.nes> <file2.nes>
        Convert a code from one version of a game to another.

Graphics commands:
  chr-decode [--palette C C C C] <file.nes|file.chr> <out.png>
        Convert CHR data into a PNG image (128 pixels wide).
  chr-encode [--palette C C C C] <in.png> <out.chr>
        Convert a PNG image back into CHR data.
  color-swap [--colors A B C D] [--first-tile N] [--tile-count N]
             <in.nes> <out.nes>
        Swap colors 0-3 in the CHR ROM tiles of an iNES file.";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        util::fail(USAGE);
    };

    let rest = &args[1..];
    match command.as_str() {
        "info" => info::run(rest),
        "split" => split::run(rest),
        "combine" => combine::run(rest),
        "prg2cpu" => prg::run_prg2cpu(rest),
        "prgbyte" => prg::run_prgbyte(rest),
        "genie-decode" => genie::run_decode(rest),
        "genie-encode" => genie::run_encode(rest),
        "genie-prgaddr" => genie::run_prgaddr(rest),
        "genie-6to8" => genie::run_6to8(rest),
        "genie-verconv" => verconv::run(rest),
        "chr-decode" => chr::run_decode(rest),
        "chr-encode" => chr::run_encode(rest),
        "color-swap" => chr::run_color_swap(rest),
        _ => {
            eprintln!("Unknown command: {}", command);
            util::fail(USAGE);
        }
    }
}
