// Licensed under the Apache-2.0 license

//! Read side of the AXI4-Lite responder: the AR and R channels.

use emulator_types::{AxiResp, AxilSlaveInputs, DataWord, ReadDataChannel, RvAddr};

/// State of the read channels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ReadState {
    #[default]
    Idle,
    /// Word fetched, `rvalid` high until `rready`.
    Respond {
        addr: RvAddr,
        data: DataWord,
        resp: AxiResp,
    },
}

#[derive(Default)]
pub(crate) struct ReadChannel {
    state: ReadState,
}

impl ReadChannel {
    pub(crate) fn state(&self) -> &ReadState {
        &self.state
    }

    pub(crate) fn arready(&self) -> bool {
        self.state == ReadState::Idle
    }

    /// R channel outputs; `rdata` is all zero while no response is pending.
    pub(crate) fn r(&self, width: usize) -> ReadDataChannel {
        match &self.state {
            ReadState::Respond { data, resp, .. } => ReadDataChannel {
                data: data.clone(),
                resp: *resp,
                valid: true,
            },
            ReadState::Idle => ReadDataChannel {
                data: DataWord::zeroed(width),
                ..Default::default()
            },
        }
    }

    /// Advances the state machine on a clock edge. `fetch` is called with the
    /// accepted address when the AR handshake completes; the accepted address
    /// is returned.
    pub(crate) fn clock(
        &mut self,
        inputs: &AxilSlaveInputs,
        fetch: impl FnOnce(RvAddr) -> DataWord,
    ) -> Option<RvAddr> {
        match self.state {
            ReadState::Idle if inputs.ar.valid => {
                let addr = inputs.ar.addr;
                self.state = ReadState::Respond {
                    addr,
                    data: fetch(addr),
                    resp: AxiResp::Okay,
                };
                Some(addr)
            }
            ReadState::Respond { .. } if inputs.rready => {
                self.state = ReadState::Idle;
                None
            }
            _ => None,
        }
    }

    /// Returns to `Idle`. Reports whether an unacknowledged response was dropped.
    pub(crate) fn reset(&mut self) -> bool {
        let dropped = self.state != ReadState::Idle;
        self.state = ReadState::Idle;
        dropped
    }
}
