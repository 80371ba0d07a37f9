// Licensed under the Apache-2.0 license

//! Cycle-level AXI4-Lite master.
//!
//! Byte-granular requests are split into word transactions. One write and
//! one read are in flight at a time, each channel pair working on its own.

use crate::pause::{PausePolicy, Pauser};
use emulator_types::{
    AddrChannel, AxiProt, AxiResp, AxilParams, AxilSlaveInputs, AxilSlaveOutputs, DataWord,
    RvAddr, WriteDataChannel, WriteStrobe,
};
use log::debug;
use std::collections::VecDeque;

/// Relative timing of `awvalid` and `wvalid` within one write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteOrder {
    /// Both raised in the same cycle.
    #[default]
    Together,
    /// `wvalid` raised the given number of cycles after `awvalid`.
    AddressFirst(u32),
    /// `awvalid` raised the given number of cycles after `wvalid`.
    DataFirst(u32),
}

impl WriteOrder {
    /// Cycles to wait before raising (`awvalid`, `wvalid`).
    fn delays(self) -> (u32, u32) {
        match self {
            WriteOrder::Together => (0, 0),
            WriteOrder::AddressFirst(n) => (0, n),
            WriteOrder::DataFirst(n) => (n, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Pending,
    Valid,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct WordWrite {
    addr: RvAddr,
    data: DataWord,
    strb: WriteStrobe,
}

struct ActiveWrite {
    op: WordWrite,
    aw: Phase,
    w: Phase,
    age: u32,
}

#[derive(Default)]
struct WriteEngine {
    queue: VecDeque<WordWrite>,
    active: Option<ActiveWrite>,
    responses: Vec<AxiResp>,
}

impl WriteEngine {
    fn drive(&mut self, inputs: &mut AxilSlaveInputs, order: WriteOrder, paused: bool) {
        if self.active.is_none() && !paused {
            self.active = self.queue.pop_front().map(|op| ActiveWrite {
                op,
                aw: Phase::Pending,
                w: Phase::Pending,
                age: 0,
            });
        }
        inputs.bready = !paused;

        let Some(active) = self.active.as_mut() else {
            inputs.aw.valid = false;
            inputs.w.valid = false;
            return;
        };
        let (aw_delay, w_delay) = order.delays();
        if !paused {
            if active.aw == Phase::Pending && active.age >= aw_delay {
                active.aw = Phase::Valid;
            }
            if active.w == Phase::Pending && active.age >= w_delay {
                active.w = Phase::Valid;
            }
        }
        active.age = active.age.saturating_add(1);

        inputs.aw = AddrChannel {
            addr: active.op.addr,
            prot: AxiProt::empty(),
            valid: active.aw == Phase::Valid,
        };
        inputs.w = WriteDataChannel {
            data: active.op.data.clone(),
            strb: active.op.strb,
            valid: active.w == Phase::Valid,
        };
    }

    fn sample(&mut self, inputs: &AxilSlaveInputs, outputs: &AxilSlaveOutputs) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if outputs.aw_fire(inputs) {
            active.aw = Phase::Done;
        }
        if outputs.w_fire(inputs) {
            active.w = Phase::Done;
        }
        if outputs.b_fire(inputs) && active.aw == Phase::Done && active.w == Phase::Done {
            debug!(
                "master: write {:#x} strb={} done, {:?}",
                active.op.addr, active.op.strb, outputs.b.resp
            );
            self.responses.push(outputs.b.resp);
            self.active = None;
        }
    }

    fn idle(&self) -> bool {
        self.queue.is_empty() && self.active.is_none()
    }
}

struct ReadCommand {
    addr: RvAddr,
    len: usize,
    /// Word addresses still to be requested.
    words: VecDeque<RvAddr>,
    data: Vec<u8>,
}

#[derive(Default)]
struct ReadEngine {
    queue: VecDeque<ReadCommand>,
    active: Option<ReadCommand>,
    ar: Phase,
    completed: VecDeque<(RvAddr, Vec<u8>)>,
}

impl ReadEngine {
    fn drive(&mut self, inputs: &mut AxilSlaveInputs, paused: bool) {
        if self.active.is_none() && !paused {
            self.active = self.queue.pop_front();
            self.ar = Phase::Pending;
        }
        inputs.rready = !paused;

        let Some(addr) = self.active.as_ref().and_then(|cmd| cmd.words.front().copied()) else {
            inputs.ar.valid = false;
            return;
        };
        if self.ar == Phase::Pending && !paused {
            self.ar = Phase::Valid;
        }
        inputs.ar = AddrChannel {
            addr,
            prot: AxiProt::empty(),
            valid: self.ar == Phase::Valid,
        };
    }

    fn sample(&mut self, inputs: &AxilSlaveInputs, outputs: &AxilSlaveOutputs, width: usize) {
        let Some(cmd) = self.active.as_mut() else {
            return;
        };
        if outputs.ar_fire(inputs) {
            self.ar = Phase::Done;
        }
        if !(outputs.r_fire(inputs) && self.ar == Phase::Done) {
            return;
        }
        cmd.data.extend_from_slice(outputs.r.data.as_bytes());
        cmd.words.pop_front();
        self.ar = Phase::Pending;
        if !cmd.words.is_empty() {
            return;
        }
        if let Some(cmd) = self.active.take() {
            let offset = cmd.addr as usize % width;
            let data = cmd.data[offset..offset + cmd.len].to_vec();
            debug!("master: read {:#x} len={} done", cmd.addr, cmd.len);
            self.completed.push_back((cmd.addr, data));
        }
    }

    fn idle(&self) -> bool {
        self.queue.is_empty() && self.active.is_none()
    }
}

/// AXI4-Lite master driving an [`AxilSlaveInputs`] bundle one cycle at a time.
///
/// Each cycle the owner calls [`AxilMaster::drive`] before the clock edge and
/// [`AxilMaster::sample`] with the same inputs and the responder outputs that
/// were visible before the edge.
pub struct AxilMaster {
    width: usize,
    order: WriteOrder,
    pauser: Pauser,
    write: WriteEngine,
    read: ReadEngine,
}

impl AxilMaster {
    pub fn new(params: &AxilParams) -> Self {
        Self {
            width: params.strb_width(),
            order: WriteOrder::default(),
            pauser: Pauser::new(PausePolicy::Never),
            write: WriteEngine::default(),
            read: ReadEngine::default(),
        }
    }

    pub fn set_write_order(&mut self, order: WriteOrder) {
        self.order = order;
    }

    pub fn set_pause_policy(&mut self, policy: PausePolicy) {
        self.pauser = Pauser::new(policy);
    }

    /// Queue a write of `data` starting at `addr`. The first and last words
    /// carry partial strobes when `addr` or the end are not word aligned.
    pub fn init_write(&mut self, addr: RvAddr, data: &[u8]) {
        for word in split_write(addr, data, self.width) {
            self.write.queue.push_back(word);
        }
    }

    /// Queue a read of `len` bytes starting at `addr`.
    pub fn init_read(&mut self, addr: RvAddr, len: usize) {
        if len == 0 {
            self.read.completed.push_back((addr, Vec::new()));
            return;
        }
        let width = self.width;
        let base = addr & !(width as RvAddr - 1);
        let count = (addr as usize % width + len).div_ceil(width);
        let words = (0..count)
            .map(|i| base.wrapping_add((i * width) as RvAddr))
            .collect();
        self.read.queue.push_back(ReadCommand {
            addr,
            len,
            words,
            data: Vec::with_capacity(count * width),
        });
    }

    /// Oldest completed read, as the requested address and bytes.
    pub fn get_read_data(&mut self) -> Option<(RvAddr, Vec<u8>)> {
        self.read.completed.pop_front()
    }

    /// No queued or outstanding transactions.
    pub fn idle(&self) -> bool {
        self.write.idle() && self.read.idle()
    }

    /// Every write response received so far, in order.
    pub fn write_responses(&self) -> &[AxiResp] {
        &self.write.responses
    }

    /// Drop queued and in-flight transactions. Completed reads and received
    /// responses are kept.
    pub fn reset(&mut self) {
        self.write.queue.clear();
        self.write.active = None;
        self.read.queue.clear();
        self.read.active = None;
        self.read.ar = Phase::Pending;
    }

    /// Drive the master's signals for the coming cycle.
    pub fn drive(&mut self, inputs: &mut AxilSlaveInputs) {
        let paused = self.pauser.next();
        self.write.drive(inputs, self.order, paused);
        self.read.drive(inputs, paused);
    }

    /// Observe the handshakes that completed at the clock edge.
    pub fn sample(&mut self, inputs: &AxilSlaveInputs, outputs: &AxilSlaveOutputs) {
        self.write.sample(inputs, outputs);
        self.read.sample(inputs, outputs, self.width);
    }
}

fn split_write(addr: RvAddr, data: &[u8], width: usize) -> Vec<WordWrite> {
    let mut words: Vec<WordWrite> = Vec::new();
    let offset = addr as usize % width;
    let base = addr & !(width as RvAddr - 1);
    let mut strb = 0u64;
    let mut word = DataWord::zeroed(width);
    for (i, byte) in data.iter().enumerate() {
        let lane = (offset + i) % width;
        word.set_lane(lane, *byte);
        strb |= 1 << lane;
        if lane == width - 1 || i == data.len() - 1 {
            let index = (offset + i) / width;
            words.push(WordWrite {
                addr: base.wrapping_add((index * width) as RvAddr),
                data: std::mem::replace(&mut word, DataWord::zeroed(width)),
                strb: WriteStrobe::from_bits(strb),
            });
            strb = 0;
        }
    }
    words
}
