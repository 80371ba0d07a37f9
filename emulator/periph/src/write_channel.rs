// Licensed under the Apache-2.0 license

//! Write side of the AXI4-Lite responder: the AW, W and B channels.

use emulator_types::{
    AxiResp, AxilSlaveInputs, DataWord, RvAddr, WriteRespChannel, WriteStrobe,
};

/// State of the write channels.
///
/// Address and data are latched independently, so a transaction may pass
/// through either `AwaitData` or `AwaitAddr`, or straight from `Idle` to
/// `Respond` when both handshakes land on the same edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WriteState {
    #[default]
    Idle,
    /// Address accepted, waiting for the W handshake.
    AwaitData { addr: RvAddr },
    /// Data accepted, waiting for the AW handshake.
    AwaitAddr { data: DataWord, strb: WriteStrobe },
    /// Write committed, `bvalid` high until `bready`.
    Respond { resp: AxiResp },
}

/// A write whose address and data have both been accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingWrite {
    pub(crate) addr: RvAddr,
    pub(crate) data: DataWord,
    pub(crate) strb: WriteStrobe,
}

#[derive(Default)]
pub(crate) struct WriteChannel {
    state: WriteState,
}

impl WriteChannel {
    pub(crate) fn state(&self) -> &WriteState {
        &self.state
    }

    pub(crate) fn awready(&self) -> bool {
        matches!(self.state, WriteState::Idle | WriteState::AwaitAddr { .. })
    }

    pub(crate) fn wready(&self) -> bool {
        matches!(self.state, WriteState::Idle | WriteState::AwaitData { .. })
    }

    pub(crate) fn b(&self) -> WriteRespChannel {
        match self.state {
            WriteState::Respond { resp } => WriteRespChannel { resp, valid: true },
            _ => WriteRespChannel::default(),
        }
    }

    /// Advances the state machine on a clock edge. Returns the write to
    /// commit when this edge completes the second of the AW/W handshakes.
    pub(crate) fn clock(&mut self, inputs: &AxilSlaveInputs) -> Option<PendingWrite> {
        let aw_fire = inputs.aw.valid && self.awready();
        let w_fire = inputs.w.valid && self.wready();
        let respond = WriteState::Respond {
            resp: AxiResp::Okay,
        };

        let (next, commit) = match std::mem::take(&mut self.state) {
            WriteState::Idle => match (aw_fire, w_fire) {
                (true, true) => (
                    respond,
                    Some(PendingWrite {
                        addr: inputs.aw.addr,
                        data: inputs.w.data.clone(),
                        strb: inputs.w.strb,
                    }),
                ),
                (true, false) => (
                    WriteState::AwaitData {
                        addr: inputs.aw.addr,
                    },
                    None,
                ),
                (false, true) => (
                    WriteState::AwaitAddr {
                        data: inputs.w.data.clone(),
                        strb: inputs.w.strb,
                    },
                    None,
                ),
                (false, false) => (WriteState::Idle, None),
            },
            WriteState::AwaitData { addr } if w_fire => (
                respond,
                Some(PendingWrite {
                    addr,
                    data: inputs.w.data.clone(),
                    strb: inputs.w.strb,
                }),
            ),
            WriteState::AwaitAddr { data, strb } if aw_fire => (
                respond,
                Some(PendingWrite {
                    addr: inputs.aw.addr,
                    data,
                    strb,
                }),
            ),
            WriteState::Respond { .. } if inputs.bready => (WriteState::Idle, None),
            state => (state, None),
        };
        self.state = next;
        commit
    }

    /// Returns to `Idle`. Reports whether a half-accepted write was dropped.
    pub(crate) fn reset(&mut self) -> bool {
        let dropped = matches!(
            self.state,
            WriteState::AwaitData { .. } | WriteState::AwaitAddr { .. }
        );
        self.state = WriteState::Idle;
        dropped
    }
}
