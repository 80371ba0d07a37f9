/*++

Licensed under the Apache-2.0 license.

File Name:

    axil_ram.rs

Abstract:

    File contains the AXI4-Lite RAM responder.

--*/

use crate::read_channel::{ReadChannel, ReadState};
use crate::write_channel::{PendingWrite, WriteChannel, WriteState};
use emulator_bus::{Bus, BusError, Ram, WordAccess};
use emulator_types::{
    AxiProt, AxilParams, AxilSlaveInputs, AxilSlaveOutputs, DataWord, ReadDataChannel, RvAddr,
    RvData, RvSize, WriteRespChannel, WriteStrobe,
};
use log::{debug, trace, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AxilRamError {
    #[error("initial contents are {actual} bytes, memory is {expected} bytes")]
    MemSize { expected: usize, actual: usize },
}

/// Counters kept by the responder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxilRamStats {
    /// Clock edges seen.
    pub cycles: u64,
    /// Writes committed to memory.
    pub writes: u64,
    /// Words fetched for the R channel.
    pub reads: u64,
    /// Edges with reset asserted, plus calls to `reset()`.
    pub resets: u64,
    /// Valids withdrawn by the master before their handshake.
    pub violations: u64,
}

/// Valids that were high without a handshake at the last edge. AXI requires
/// them to still be high at the next one.
#[derive(Default)]
struct HeldValids {
    aw: bool,
    w: bool,
    ar: bool,
}

/// AXI4-Lite slave backed by a `2^ADDR_WIDTH`-byte RAM.
///
/// The model is clocked explicitly: drive the inputs with the `set_*`
/// methods, read the outputs, then call [`AxilRam::step`] for the rising
/// edge. Outputs depend only on state, so they are stable between edges.
/// At most one write and one read are in flight at any time.
pub struct AxilRam {
    params: AxilParams,
    ram: Ram,
    inputs: AxilSlaveInputs,
    write: WriteChannel,
    read: ReadChannel,
    /// Readies are registered and stay low until the first edge out of reset.
    active: bool,
    held: HeldValids,
    stats: AxilRamStats,
}

impl AxilRam {
    /// Create a responder with zero-filled memory.
    pub fn new(params: AxilParams) -> Self {
        Self::from_ram(params, Ram::new(vec![0; params.mem_size()]))
    }

    /// Create a responder with preloaded memory.
    ///
    /// # Arguments
    ///
    /// * `params` - Bus geometry
    /// * `data` - Initial contents, exactly `params.mem_size()` bytes
    ///
    /// # Error
    ///
    /// * `AxilRamError::MemSize` - `data` does not match the memory size
    pub fn with_data(params: AxilParams, data: Vec<u8>) -> Result<Self, AxilRamError> {
        if data.len() != params.mem_size() {
            return Err(AxilRamError::MemSize {
                expected: params.mem_size(),
                actual: data.len(),
            });
        }
        Ok(Self::from_ram(params, Ram::new(data)))
    }

    fn from_ram(params: AxilParams, ram: Ram) -> Self {
        let mut inputs = AxilSlaveInputs::default();
        inputs.w.data = DataWord::zeroed(params.strb_width());
        Self {
            params,
            ram,
            inputs,
            write: WriteChannel::default(),
            read: ReadChannel::default(),
            active: false,
            held: HeldValids::default(),
            stats: AxilRamStats::default(),
        }
    }

    pub fn params(&self) -> &AxilParams {
        &self.params
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    pub fn stats(&self) -> AxilRamStats {
        self.stats
    }

    pub fn write_state(&self) -> &WriteState {
        self.write.state()
    }

    pub fn read_state(&self) -> &ReadState {
        self.read.state()
    }

    /// Whether the address or the data of a write has been accepted without
    /// its counterpart.
    pub fn has_pending_write(&self) -> bool {
        matches!(
            self.write.state(),
            WriteState::AwaitData { .. } | WriteState::AwaitAddr { .. }
        )
    }

    // Inputs

    pub fn inputs(&self) -> &AxilSlaveInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut AxilSlaveInputs {
        &mut self.inputs
    }

    pub fn set_inputs(&mut self, inputs: AxilSlaveInputs) {
        self.inputs = inputs;
    }

    pub fn set_rst(&mut self, rst: bool) {
        self.inputs.rst = rst;
    }

    pub fn set_aw(&mut self, addr: RvAddr, prot: AxiProt, valid: bool) {
        self.inputs.aw.addr = addr;
        self.inputs.aw.prot = prot;
        self.inputs.aw.valid = valid;
    }

    pub fn set_w(&mut self, data: DataWord, strb: WriteStrobe, valid: bool) {
        self.inputs.w.data = data;
        self.inputs.w.strb = strb;
        self.inputs.w.valid = valid;
    }

    pub fn set_bready(&mut self, ready: bool) {
        self.inputs.bready = ready;
    }

    pub fn set_ar(&mut self, addr: RvAddr, prot: AxiProt, valid: bool) {
        self.inputs.ar.addr = addr;
        self.inputs.ar.prot = prot;
        self.inputs.ar.valid = valid;
    }

    pub fn set_rready(&mut self, ready: bool) {
        self.inputs.rready = ready;
    }

    // Outputs

    pub fn awready(&self) -> bool {
        self.active && self.write.awready()
    }

    pub fn wready(&self) -> bool {
        self.active && self.write.wready()
    }

    pub fn b(&self) -> WriteRespChannel {
        self.write.b()
    }

    pub fn arready(&self) -> bool {
        self.active && self.read.arready()
    }

    pub fn r(&self) -> ReadDataChannel {
        self.read.r(self.params.strb_width())
    }

    pub fn outputs(&self) -> AxilSlaveOutputs {
        AxilSlaveOutputs {
            awready: self.awready(),
            wready: self.wready(),
            b: self.b(),
            arready: self.arready(),
            r: self.r(),
        }
    }

    /// Synchronous reset. Both channels return to idle, every ready and
    /// valid goes low, and a half-accepted write is discarded. Memory keeps
    /// its contents.
    pub fn reset(&mut self) {
        self.stats.resets += 1;
        if self.write.reset() {
            debug!("axil_ram: reset discarded an uncommitted write");
        }
        if self.read.reset() {
            debug!("axil_ram: reset dropped an unacknowledged read response");
        }
        self.active = false;
        self.held = HeldValids::default();
    }

    /// Rising clock edge. All inputs are sampled once, as a single snapshot.
    pub fn step(&mut self) {
        self.stats.cycles += 1;
        if self.inputs.rst {
            self.reset();
            return;
        }
        if !self.active {
            self.active = true;
            return;
        }

        self.check_held_valids();

        let aw_fire = self.inputs.aw.valid && self.awready();
        let w_fire = self.inputs.w.valid && self.wready();
        let ar_fire = self.inputs.ar.valid && self.arready();
        if aw_fire {
            trace!(
                "axil_ram: AW addr={:#x} prot={:?}",
                self.inputs.aw.addr,
                self.inputs.aw.prot
            );
        }
        if w_fire {
            trace!(
                "axil_ram: W data={} strb={}",
                self.inputs.w.data,
                self.inputs.w.strb
            );
        }
        if self.b().valid && self.inputs.bready {
            trace!("axil_ram: B resp={:?}", self.b().resp);
        }
        if self.read.state() != &ReadState::Idle && self.inputs.rready {
            trace!("axil_ram: R data={}", self.r().data);
        }

        // The read fetches before the write commits, so a read and a write
        // to the same word accepted on one edge see memory as it was before
        // that edge.
        let params = self.params;
        let ram = &self.ram;
        let inputs = &self.inputs;
        let fetched = self.read.clock(inputs, |addr| {
            ram.read_word(params.word_align(addr), params.strb_width())
        });
        let commit = self.write.clock(inputs);

        if let Some(addr) = fetched {
            self.stats.reads += 1;
            debug!(
                "axil_ram: read {:#x} -> {}",
                params.word_align(addr),
                self.r().data
            );
        }
        if let Some(write) = commit {
            self.commit(write);
        }

        self.held = HeldValids {
            aw: self.inputs.aw.valid && !aw_fire,
            w: self.inputs.w.valid && !w_fire,
            ar: self.inputs.ar.valid && !ar_fire,
        };
    }

    fn commit(&mut self, write: PendingWrite) {
        let width = self.params.strb_width();
        let addr = self.params.word_align(write.addr);
        let data = write.data.resized(width);
        let strb = write.strb.truncate(width);
        self.ram.write_word_masked(addr, &data, strb);
        self.stats.writes += 1;
        debug!("axil_ram: write {:#x} <- {} strb={}", addr, data, strb);
    }

    fn check_held_valids(&mut self) {
        let withdrawn = [
            ("awvalid", self.held.aw && !self.inputs.aw.valid),
            ("wvalid", self.held.w && !self.inputs.w.valid),
            ("arvalid", self.held.ar && !self.inputs.ar.valid),
        ];
        for (signal, dropped) in withdrawn {
            if dropped {
                self.stats.violations += 1;
                warn!(
                    "axil_ram: {signal} withdrawn before handshake at cycle {}",
                    self.stats.cycles
                );
            }
        }
    }
}

impl Bus for AxilRam {
    /// Backdoor read of the memory. Undecoded address bits are ignored.
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        self.ram.read(size, addr & self.params.addr_mask())
    }

    /// Backdoor write of the memory. Undecoded address bits are ignored.
    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        self.ram.write(size, addr & self.params.addr_mask(), val)
    }

    fn poll(&mut self) {
        self.step();
    }

    fn warm_reset(&mut self) {
        self.reset();
    }
}
