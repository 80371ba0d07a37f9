// Licensed under the Apache-2.0 license

use crate::consts::{
    DEFAULT_ADDR_WIDTH, DEFAULT_DATA_WIDTH, MAX_ADDR_WIDTH, MAX_DATA_WIDTH, MIN_DATA_WIDTH,
};
use crate::RvAddr;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("data width {0} is not a power of two between 8 and 512 bits")]
    DataWidth(u32),
    #[error("address width {addr_width} outside {min}..={max} bits")]
    AddrWidth { addr_width: u32, min: u32, max: u32 },
    #[error("failed to parse bus parameters: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Geometry of the AXI4-Lite bus: `ADDR_WIDTH` and `DATA_WIDTH` of the RTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawParams")]
pub struct AxilParams {
    addr_width: u32,
    data_width: u32,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawParams {
    #[serde(alias = "ADDR_WIDTH")]
    addr_width: u32,
    #[serde(alias = "DATA_WIDTH")]
    data_width: u32,
}

impl Default for RawParams {
    fn default() -> Self {
        Self {
            addr_width: DEFAULT_ADDR_WIDTH,
            data_width: DEFAULT_DATA_WIDTH,
        }
    }
}

impl TryFrom<RawParams> for AxilParams {
    type Error = ParamsError;

    fn try_from(raw: RawParams) -> Result<Self, Self::Error> {
        AxilParams::new(raw.addr_width, raw.data_width)
    }
}

impl Default for AxilParams {
    fn default() -> Self {
        Self {
            addr_width: DEFAULT_ADDR_WIDTH,
            data_width: DEFAULT_DATA_WIDTH,
        }
    }
}

impl AxilParams {
    pub fn new(addr_width: u32, data_width: u32) -> Result<Self, ParamsError> {
        let params = Self {
            addr_width,
            data_width,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parses parameters from TOML, e.g. `addr_width = 16` / `data_width = 32`.
    /// Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ParamsError> {
        Ok(toml::from_str(s)?)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.data_width.is_power_of_two()
            || !(MIN_DATA_WIDTH..=MAX_DATA_WIDTH).contains(&self.data_width)
        {
            return Err(ParamsError::DataWidth(self.data_width));
        }
        // the memory has to hold at least one full word, and its size has
        // to fit in usize on the host
        let min = self.strb_width().trailing_zeros();
        let max = MAX_ADDR_WIDTH.min(usize::BITS - 1);
        if !(min..=max).contains(&self.addr_width) {
            return Err(ParamsError::AddrWidth {
                addr_width: self.addr_width,
                min,
                max,
            });
        }
        Ok(())
    }

    pub fn addr_width(&self) -> u32 {
        self.addr_width
    }

    pub fn data_width(&self) -> u32 {
        self.data_width
    }

    /// Number of byte lanes (`STRB_WIDTH`).
    pub fn strb_width(&self) -> usize {
        (self.data_width / 8) as usize
    }

    /// Size of the memory in bytes.
    pub fn mem_size(&self) -> usize {
        // validate() bounds addr_width to usize::BITS - 1
        1 << self.addr_width
    }

    /// Mask of the address bits the slave decodes.
    pub fn addr_mask(&self) -> RvAddr {
        if self.addr_width >= RvAddr::BITS {
            RvAddr::MAX
        } else {
            (1 << self.addr_width) - 1
        }
    }

    /// Address of the word containing `addr`, with undecoded bits dropped.
    pub fn word_align(&self, addr: RvAddr) -> RvAddr {
        addr & self.addr_mask() & !(self.strb_width() as RvAddr - 1)
    }

    /// Byte lane `addr` falls on.
    pub fn lane_of(&self, addr: RvAddr) -> usize {
        addr as usize & (self.strb_width() - 1)
    }
}
