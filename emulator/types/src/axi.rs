// Licensed under the Apache-2.0 license

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Response code carried on `bresp` and `rresp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum AxiResp {
    /// Normal access success.
    Okay = 0b00,
    /// Exclusive access success. Not used by AXI4-Lite slaves.
    ExOkay = 0b01,
    /// Slave error.
    SlvErr = 0b10,
    /// Decode error.
    DecErr = 0b11,
}

impl AxiResp {
    pub fn is_ok(self) -> bool {
        matches!(self, AxiResp::Okay | AxiResp::ExOkay)
    }
}

impl Default for AxiResp {
    fn default() -> Self {
        AxiResp::Okay
    }
}

bitflags! {
    /// Protection attributes sampled from `awprot`/`arprot`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxiProt: u8 {
        const PRIVILEGED = 0b001;
        const NON_SECURE = 0b010;
        const INSTRUCTION = 0b100;
    }
}

impl Default for AxiProt {
    fn default() -> Self {
        AxiProt::empty()
    }
}
