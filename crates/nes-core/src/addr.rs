//! CPU ↔ PRG ROM address translation.
//!
//! The CPU sees PRG ROM through the fixed 0x8000-0xFFFF window, one
//! bank-sized slice at a time. One PRG ROM offset is therefore visible
//! at every bank-aligned position of the window, and one CPU address
//! can come from any bank of the ROM. Both directions return all
//! candidates in ascending order.

/// Start of the CPU's PRG ROM window.
pub const CPU_ROM_START: u16 = 0x8000;

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("CPU address {0:#06x} is outside the ROM area 0x8000-0xffff")]
    OutOfRange(u32),
}

/// Validate a caller-supplied CPU ROM address.
///
/// The translation functions below mask their input into range and
/// never fail; this is the checked entry point for addresses that come
/// from the user.
pub fn cpu_rom_address(addr: u32) -> Result<u16, AddressError> {
    if (CPU_ROM_START as u32..=0xffff).contains(&addr) {
        Ok(addr as u16)
    } else {
        Err(AddressError::OutOfRange(addr))
    }
}

/// Every CPU address a PRG ROM offset can appear at, ascending.
///
/// `bank_size` must be a power of two (8/16/32 KiB). Total: any offset
/// lands in at least one window slot since banks never exceed 32 KiB.
pub fn prg_to_cpu(prg_addr: usize, bank_size: usize) -> impl Iterator<Item = u16> {
    debug_assert!(bank_size.is_power_of_two());
    let offset = prg_addr & (bank_size - 1);
    (CPU_ROM_START as usize..0x1_0000)
        .step_by(bank_size)
        .map(move |origin| (origin | offset) as u16)
}

/// Every PRG ROM offset that can be mapped at a CPU address, ascending.
/// The CPU address is masked into the bank implicitly.
pub fn cpu_to_prg(
    cpu_addr: u16,
    bank_size: usize,
    prg_size: usize,
) -> impl Iterator<Item = usize> {
    debug_assert!(bank_size.is_power_of_two());
    let offset = cpu_addr as usize & (bank_size - 1);
    (offset..prg_size).step_by(bank_size)
}

/// Like [`cpu_to_prg`], but keeps only offsets whose current byte
/// equals `compare`. This is how an 8-letter Game Genie code is
/// narrowed down to the banks it can actually patch.
pub fn cpu_to_prg_matching(
    cpu_addr: u16,
    bank_size: usize,
    prg: &[u8],
    compare: u8,
) -> impl Iterator<Item = usize> + '_ {
    cpu_to_prg(cpu_addr, bank_size, prg.len()).filter(move |&addr| prg[addr] == compare)
}
