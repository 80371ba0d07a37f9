// Licensed under the Apache-2.0 license

use crate::checker::{ProtocolChecker, ProtocolError};
use crate::master::{AxilMaster, WriteOrder};
use crate::pause::PausePolicy;
use emulator_bus::Clock;
use emulator_periph::{AxilRam, AxilRamError};
use emulator_types::{AxilParams, AxilSlaveInputs, RvAddr};
use log::debug;
use thiserror::Error;

/// Default number of cycles `wait` allows before giving up.
pub const DEFAULT_TIMEOUT: u64 = 100_000;

#[derive(Debug, Error)]
pub enum TestbenchError {
    #[error("master still busy after {0} cycles")]
    Timeout(u64),
    #[error("protocol violation at cycle {cycle}: {source}")]
    Protocol {
        cycle: u64,
        #[source]
        source: ProtocolError,
    },
    #[error("read at {0:#x} completed without data")]
    MissingReadData(RvAddr),
    #[error(transparent)]
    Ram(#[from] AxilRamError),
}

/// An [`AxilRam`] driven by an [`AxilMaster`] and watched by a
/// [`ProtocolChecker`], all on one clock.
pub struct AxilTestbench {
    ram: AxilRam,
    master: AxilMaster,
    checker: ProtocolChecker,
    clock: Clock,
    rst: bool,
    timeout: u64,
}

impl AxilTestbench {
    pub fn new(params: AxilParams) -> Self {
        Self::with_ram(AxilRam::new(params))
    }

    /// Testbench whose memory starts out as `data`.
    pub fn with_data(params: AxilParams, data: Vec<u8>) -> Result<Self, TestbenchError> {
        Ok(Self::with_ram(AxilRam::with_data(params, data)?))
    }

    pub fn with_ram(ram: AxilRam) -> Self {
        let master = AxilMaster::new(ram.params());
        Self {
            ram,
            master,
            checker: ProtocolChecker::new(),
            clock: Clock::new(),
            rst: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn ram(&self) -> &AxilRam {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut AxilRam {
        &mut self.ram
    }

    pub fn master(&self) -> &AxilMaster {
        &self.master
    }

    pub fn master_mut(&mut self) -> &mut AxilMaster {
        &mut self.master
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn set_timeout(&mut self, cycles: u64) {
        self.timeout = cycles;
    }

    pub fn set_pause_policy(&mut self, policy: PausePolicy) {
        self.master.set_pause_policy(policy);
    }

    pub fn set_write_order(&mut self, order: WriteOrder) {
        self.master.set_write_order(order);
    }

    /// One clock cycle: the master drives, the checker inspects the bus,
    /// the responder takes its edge and the master observes the handshakes.
    pub fn cycle(&mut self) -> Result<(), TestbenchError> {
        let mut inputs = self.ram.inputs().clone();
        if self.rst {
            quiesce(&mut inputs);
        } else {
            inputs.rst = false;
            self.master.drive(&mut inputs);
        }
        self.ram.set_inputs(inputs.clone());
        let outputs = self.ram.outputs();

        self.checker
            .check(&inputs, &outputs)
            .map_err(|source| TestbenchError::Protocol {
                cycle: self.clock.now(),
                source,
            })?;
        self.ram.step();
        if !self.rst {
            self.master.sample(&inputs, &outputs);
        }
        self.clock.increment(1);
        Ok(())
    }

    pub fn cycles(&mut self, count: u64) -> Result<(), TestbenchError> {
        for _ in 0..count {
            self.cycle()?;
        }
        Ok(())
    }

    /// Run until the master has nothing queued or outstanding.
    pub fn wait(&mut self) -> Result<(), TestbenchError> {
        let start = self.clock.now();
        while !self.master.idle() {
            if self.clock.now() - start >= self.timeout {
                return Err(TestbenchError::Timeout(self.timeout));
            }
            self.cycle()?;
        }
        Ok(())
    }

    /// Hold `rst` high for one cycle. Transactions the master had queued or
    /// in flight are dropped.
    pub fn reset(&mut self) -> Result<(), TestbenchError> {
        debug!("testbench: reset at cycle {}", self.clock.now());
        self.master.reset();
        self.rst = true;
        let result = self.cycle();
        self.rst = false;
        result
    }

    /// Write `data` at `addr` and wait for every response.
    pub fn write(&mut self, addr: RvAddr, data: &[u8]) -> Result<(), TestbenchError> {
        self.master.init_write(addr, data);
        self.wait()
    }

    /// Read `len` bytes at `addr`.
    pub fn read(&mut self, addr: RvAddr, len: usize) -> Result<Vec<u8>, TestbenchError> {
        self.master.init_read(addr, len);
        self.wait()?;
        self.master
            .get_read_data()
            .map(|(_, data)| data)
            .ok_or(TestbenchError::MissingReadData(addr))
    }
}

/// Reset asserted with every master valid and ready low.
fn quiesce(inputs: &mut AxilSlaveInputs) {
    inputs.rst = true;
    inputs.aw.valid = false;
    inputs.w.valid = false;
    inputs.bready = false;
    inputs.ar.valid = false;
    inputs.rready = false;
}
