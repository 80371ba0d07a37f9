// Licensed under the Apache-2.0 license

use emulator_types::{AxilSlaveInputs, AxilSlaveOutputs};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("bvalid dropped before bready")]
    BValidDropped,
    #[error("write response changed while bvalid was high")]
    BChanged,
    #[error("rvalid dropped before rready")]
    RValidDropped,
    #[error("read response changed while rvalid was high")]
    RChanged,
    #[error("write response without an accepted write")]
    UnexpectedB,
    #[error("read response without an accepted read")]
    UnexpectedR,
}

/// Passive monitor for the responder side of an AXI4-Lite interface.
///
/// Fed one snapshot of inputs and outputs per cycle, taken before the clock
/// edge.
#[derive(Default)]
pub struct ProtocolChecker {
    prev: Option<(AxilSlaveInputs, AxilSlaveOutputs)>,
    aw: u64,
    w: u64,
    b: u64,
    ar: u64,
    r: u64,
}

impl ProtocolChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(
        &mut self,
        inputs: &AxilSlaveInputs,
        outputs: &AxilSlaveOutputs,
    ) -> Result<(), ProtocolError> {
        let mut b_held = false;
        let mut r_held = false;
        match self.prev.take() {
            Some((prev_in, _)) if prev_in.rst => {
                *self = Self::default();
            }
            Some((prev_in, prev_out)) => {
                if prev_out.b.valid && !prev_in.bready {
                    if !outputs.b.valid {
                        return Err(ProtocolError::BValidDropped);
                    }
                    if outputs.b != prev_out.b {
                        return Err(ProtocolError::BChanged);
                    }
                    b_held = true;
                }
                if prev_out.r.valid && !prev_in.rready {
                    if !outputs.r.valid {
                        return Err(ProtocolError::RValidDropped);
                    }
                    if outputs.r != prev_out.r {
                        return Err(ProtocolError::RChanged);
                    }
                    r_held = true;
                }
            }
            None => {}
        }

        if outputs.b.valid && !b_held && self.aw.min(self.w) <= self.b {
            return Err(ProtocolError::UnexpectedB);
        }
        if outputs.r.valid && !r_held && self.ar <= self.r {
            return Err(ProtocolError::UnexpectedR);
        }

        // handshakes in a reset cycle are discarded at the edge
        if !inputs.rst {
            self.aw += outputs.aw_fire(inputs) as u64;
            self.w += outputs.w_fire(inputs) as u64;
            self.b += outputs.b_fire(inputs) as u64;
            self.ar += outputs.ar_fire(inputs) as u64;
            self.r += outputs.r_fire(inputs) as u64;
        }
        self.prev = Some((inputs.clone(), outputs.clone()));
        Ok(())
    }
}
