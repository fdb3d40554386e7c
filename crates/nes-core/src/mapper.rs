//! Mapper bank-size table.
//!
//! Maps an iNES mapper number to the smallest PRG ROM bank size its
//! bank-switching scheme supports. A 32 KiB bank means the mapper does
//! no PRG bankswitching at all.
//!
//! Reference: https://www.nesdev.org/wiki/List_of_mappers

/// Bank size assumed for mappers absent from the table. 8 KiB is the
/// smallest bank any mapper uses, so candidate address lists derived
/// from it are over-broad but never miss an address.
const FALLBACK_BANK_SIZE: usize = 8 * 1024;

// (mapper, smallest PRG bank size in KiB, board name).
// Mappers only seen in pirate carts are left out.
const MAPPER_INFO: &[(u8, usize, &str)] = &[
    (0, 32, "NROM"),
    (1, 16, "SxROM, MMC1"),
    (2, 16, "UxROM"),
    (3, 32, "CNROM"),
    (4, 8, "TxROM, MMC3, MMC6"),
    (5, 8, "ExROM, MMC5"),
    (7, 32, "AxROM"),
    (9, 8, "PxROM, MMC2"),
    (10, 16, "FxROM, MMC4"),
    (11, 32, "Color Dreams"),
    (13, 32, "CPROM"),
    (16, 16, "some Bandai FCG boards"),
    (18, 8, "Jaleco SS8806"),
    (19, 8, "Namco 163"),
    (21, 8, "Konami VRC4a, VRC4c"),
    (22, 8, "Konami VRC2a"),
    (23, 8, "Konami VRC2b, VRC4e"),
    (24, 8, "Konami VRC6a"),
    (25, 8, "Konami VRC4b, VRC4d"),
    (26, 8, "Konami VRC6b"),
    (33, 8, "Taito TC0190"),
    (34, 32, "BNROM, NINA-001"),
    (64, 8, "RAMBO-1"),
    (66, 32, "GxROM, MxROM"),
    (68, 16, "Sunsoft-4"),
    (69, 8, "Sunsoft FME-7, 5A, 5B"),
    (70, 16, "(unnamed)"),
    (71, 16, "Camerica/Codemasters"),
    (73, 16, "Konami VRC3"),
    (75, 8, "Konami VRC1"),
    (79, 32, "NINA-03, NINA-06"),
    (80, 8, "Taito X1-005"),
    (85, 8, "Konami VRC7"),
    (86, 32, "Jaleco JF-13"),
    (87, 32, "(unnamed)"),
    (88, 8, "(unnamed)"),
    (91, 8, "(unnamed)"),
    (94, 16, "HVC-UN1ROM"),
    (99, 8, "(used by Vs. System games)"),
    (105, 16, "NES-EVENT"),
    (112, 8, "(unnamed)"),
    (113, 32, "NINA-003/NINA-006??"),
    (118, 8, "TxSROM, MMC3"),
    (119, 8, "TQROM, MMC3"),
    (139, 32, "Sachen 8259"),
    (141, 32, "Sachen 8259"),
    (146, 32, "NINA-03, NINA-06"),
    (148, 32, "Sachen SA-008-A, Tengen 800008"),
    (150, 32, "Sachen SA-015, SA-630"),
    (153, 16, "some Bandai FCG boards"),
    (157, 16, "some Bandai FCG boards"),
    (159, 16, "some Bandai FCG boards"),
    (180, 16, "Crazy Climber"),
    (185, 32, "CNROM with protection diodes"),
    (210, 8, "Namco 175, 340"),
    (228, 16, "Action 52"),
    (232, 16, "Camerica/Codemasters Quattro"),
    (243, 32, "Sachen SA-020A"),
];

fn lookup(mapper: u8) -> Option<(usize, &'static str)> {
    MAPPER_INFO
        .iter()
        .find(|&&(number, _, _)| number == mapper)
        .map(|&(_, kib, name)| (kib * 1024, name))
}

/// Is the mapper in the table? Bank-size results for unknown mappers
/// are conservative guesses rather than facts.
pub fn is_mapper_known(mapper: u8) -> bool {
    lookup(mapper).is_some()
}

pub fn mapper_name(mapper: u8) -> &'static str {
    lookup(mapper).map_or("(unknown)", |(_, name)| name)
}

/// The smallest PRG ROM bank size the mapper's addressing scheme
/// supports: 8, 16 or 32 KiB. Unknown mappers get the 8 KiB fallback
/// and a warning; this never fails.
pub fn min_prg_bank_size_for_mapper(mapper: u8) -> usize {
    match lookup(mapper) {
        Some((size, _)) => size,
        None => {
            log::warn!(
                "unknown mapper {} (assuming {} KiB PRG banks)",
                mapper,
                FALLBACK_BANK_SIZE / 1024
            );
            FALLBACK_BANK_SIZE
        }
    }
}

/// The smallest PRG ROM bank size the game may actually use. Never
/// larger than the PRG ROM itself, even for mappers whose nominal
/// minimum bank is larger.
pub fn min_prg_bank_size(prg_size: usize, mapper: u8) -> usize {
    min_prg_bank_size_for_mapper(mapper).min(prg_size)
}

/// Does this mapper need more than one bank to cover the ROM?
/// May give false positives (especially for unknown mappers), never
/// false negatives.
pub fn is_prg_bankswitched(prg_size: usize, mapper: u8) -> bool {
    min_prg_bank_size_for_mapper(mapper) < prg_size
}
