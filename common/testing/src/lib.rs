// Licensed under the Apache-2.0 license

//! Bus-functional AXI4-Lite master and testbench for exercising the
//! responder models cycle by cycle.

mod checker;
mod master;
mod pause;
mod testbench;

pub use checker::{ProtocolChecker, ProtocolError};
pub use master::{AxilMaster, WriteOrder};
pub use pause::PausePolicy;
pub use testbench::{AxilTestbench, TestbenchError, DEFAULT_TIMEOUT};
