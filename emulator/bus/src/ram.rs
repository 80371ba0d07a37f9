/*++

Licensed under the Apache-2.0 license.

File Name:

    ram.rs

Abstract:

    File contains the word-lane access used by the AXI4-Lite responder on
    top of the caliptra RAM.

--*/

use crate::{Bus, BusError};
use caliptra_emu_bus::Ram;
use emulator_types::{DataWord, RvAddr, RvData, RvSize, WriteStrobe};

/// Whole-word access to a byte-addressable memory, one byte per lane.
///
/// Both operations are total: addresses past the end wrap around as the
/// upper address bits are not decoded, and an empty memory reads as zeros
/// and ignores writes.
pub trait WordAccess {
    /// Read the whole `width`-byte word containing `addr`.
    ///
    /// # Arguments
    ///
    /// * `addr` - Any address within the word
    /// * `width` - Word size in bytes; must be a power of two
    fn read_word(&self, addr: RvAddr, width: usize) -> DataWord;

    /// Write the lanes of `word` selected by `strb` into the word containing
    /// `addr`. Lanes with a clear strobe bit keep their current value.
    ///
    /// # Arguments
    ///
    /// * `addr` - Any address within the word
    /// * `word` - Data for every lane of the word
    /// * `strb` - Lanes to overwrite
    fn write_word_masked(&mut self, addr: RvAddr, word: &DataWord, strb: WriteStrobe);
}

/// Offset of the first byte of the `width`-byte word containing `addr` in a
/// memory of `len` bytes.
fn word_base(len: usize, addr: RvAddr, width: usize) -> usize {
    (addr as usize % len) & !(width.max(1) - 1)
}

impl WordAccess for Ram {
    fn read_word(&self, addr: RvAddr, width: usize) -> DataWord {
        let mut word = DataWord::zeroed(width);
        let data = self.data();
        if data.is_empty() {
            return word;
        }
        let base = word_base(data.len(), addr, width);
        for lane in 0..width {
            if let Some(byte) = data.get(base + lane) {
                word.set_lane(lane, *byte);
            }
        }
        word
    }

    fn write_word_masked(&mut self, addr: RvAddr, word: &DataWord, strb: WriteStrobe) {
        let data = self.data_mut();
        if data.is_empty() {
            return;
        }
        let width = word.width();
        let base = word_base(data.len(), addr, width);
        for lane in strb.truncate(width).lanes() {
            if let Some(byte) = data.get_mut(base + lane) {
                *byte = word.lane(lane);
            }
        }
    }
}

impl Bus for Ram {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        caliptra_emu_bus::Bus::read(self, size, addr).map_err(|x| x.into())
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        caliptra_emu_bus::Bus::write(self, size, addr, val).map_err(|x| x.into())
    }
}
