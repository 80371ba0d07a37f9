// Licensed under the Apache-2.0 license

use crate::consts::MAX_STRB_WIDTH;
use arrayvec::ArrayVec;
use std::fmt;
use std::ops::Range;

/// Value of the data bus, one byte per lane, lane 0 first (little endian).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DataWord(ArrayVec<u8, MAX_STRB_WIDTH>);

impl DataWord {
    /// A word of `width` lanes, all zero.
    pub fn zeroed(width: usize) -> Self {
        Self(std::iter::repeat(0).take(width.min(MAX_STRB_WIDTH)).collect())
    }

    /// Builds a word from its lanes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds more than `MAX_STRB_WIDTH` lanes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.iter().copied().collect())
    }

    /// Places the little-endian bytes of `value` in the low lanes of a `width`-lane word.
    pub fn from_u64_le(value: u64, width: usize) -> Self {
        let mut word = Self::zeroed(width);
        for (lane, byte) in value.to_le_bytes().into_iter().enumerate() {
            word.set_lane(lane, byte);
        }
        word
    }

    /// Low eight lanes as a little-endian integer.
    pub fn to_u64_le(&self) -> u64 {
        self.0
            .iter()
            .take(8)
            .enumerate()
            .fold(0, |acc, (lane, byte)| acc | (*byte as u64) << (8 * lane))
    }

    /// Number of lanes.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Byte in `lane`, or zero for lanes past the end of the word.
    pub fn lane(&self, lane: usize) -> u8 {
        self.0.get(lane).copied().unwrap_or(0)
    }

    /// Sets the byte in `lane`. Lanes past the end of the word are ignored.
    pub fn set_lane(&mut self, lane: usize, value: u8) {
        if let Some(byte) = self.0.get_mut(lane) {
            *byte = value;
        }
    }

    /// Copy of the word with `width` lanes, truncated or zero-extended.
    pub fn resized(&self, width: usize) -> Self {
        let mut word = Self::zeroed(width);
        for (lane, byte) in self.0.iter().enumerate() {
            word.set_lane(lane, *byte);
        }
        word
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for DataWord {
    /// Formats the word the way a waveform viewer shows the bus: most significant lane first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        if self.0.is_empty() {
            return write!(f, "0");
        }
        for byte in self.0.iter().rev() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Byte-lane enables of a write, one bit per lane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WriteStrobe(u64);

impl WriteStrobe {
    /// No lane enabled.
    pub const fn none() -> Self {
        Self(0)
    }

    /// All lanes of a `width`-lane bus enabled.
    pub fn full(width: usize) -> Self {
        Self::from_lanes(0..width)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Enables every lane in `lanes`.
    pub fn from_lanes(lanes: Range<usize>) -> Self {
        let start = lanes.start.min(MAX_STRB_WIDTH);
        let end = lanes.end.min(MAX_STRB_WIDTH);
        if start >= end {
            return Self::none();
        }
        let upper = if end == 64 { u64::MAX } else { (1u64 << end) - 1 };
        let lower = (1u64 << start) - 1;
        Self(upper & !lower)
    }

    pub fn is_set(self, lane: usize) -> bool {
        lane < MAX_STRB_WIDTH && (self.0 >> lane) & 1 == 1
    }

    /// Number of enabled lanes.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Drops lanes at or above `width`.
    pub fn truncate(self, width: usize) -> Self {
        Self(self.0 & Self::full(width).0)
    }

    /// Indices of the enabled lanes, lowest first.
    pub fn lanes(self) -> impl Iterator<Item = usize> {
        (0..MAX_STRB_WIDTH).filter(move |lane| self.is_set(*lane))
    }
}

impl fmt::Display for WriteStrobe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}
