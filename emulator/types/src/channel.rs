// Licensed under the Apache-2.0 license

//! Signal groups of the five AXI4-Lite channels, seen from the slave side.

use crate::{AxiProt, AxiResp, DataWord, RvAddr, WriteStrobe};

/// `*addr`, `*prot` and `*valid` of the AW or AR channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddrChannel {
    pub addr: RvAddr,
    pub prot: AxiProt,
    pub valid: bool,
}

/// `wdata`, `wstrb` and `wvalid`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteDataChannel {
    pub data: DataWord,
    pub strb: WriteStrobe,
    pub valid: bool,
}

/// `bresp` and `bvalid`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteRespChannel {
    pub resp: AxiResp,
    pub valid: bool,
}

/// `rdata`, `rresp` and `rvalid`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadDataChannel {
    pub data: DataWord,
    pub resp: AxiResp,
    pub valid: bool,
}

/// Everything the master (and the reset generator) drives into the slave.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AxilSlaveInputs {
    pub rst: bool,
    pub aw: AddrChannel,
    pub w: WriteDataChannel,
    pub bready: bool,
    pub ar: AddrChannel,
    pub rready: bool,
}

/// Everything the slave drives back to the master.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AxilSlaveOutputs {
    pub awready: bool,
    pub wready: bool,
    pub b: WriteRespChannel,
    pub arready: bool,
    pub r: ReadDataChannel,
}

impl AxilSlaveOutputs {
    /// Outputs with every ready and valid low and a `width`-lane zero `rdata`.
    pub fn quiet(width: usize) -> Self {
        Self {
            r: ReadDataChannel {
                data: DataWord::zeroed(width),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn aw_fire(&self, inputs: &AxilSlaveInputs) -> bool {
        inputs.aw.valid && self.awready
    }

    pub fn w_fire(&self, inputs: &AxilSlaveInputs) -> bool {
        inputs.w.valid && self.wready
    }

    pub fn b_fire(&self, inputs: &AxilSlaveInputs) -> bool {
        self.b.valid && inputs.bready
    }

    pub fn ar_fire(&self, inputs: &AxilSlaveInputs) -> bool {
        inputs.ar.valid && self.arready
    }

    pub fn r_fire(&self, inputs: &AxilSlaveInputs) -> bool {
        self.r.valid && inputs.rready
    }
}
