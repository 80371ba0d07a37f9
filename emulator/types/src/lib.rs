/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the value types shared by the AXI4-Lite RAM emulator crates.

--*/

mod axi;
mod channel;
pub mod consts;
mod params;
mod word;

pub use axi::{AxiProt, AxiResp};
pub use caliptra_emu_types::{RvAddr, RvData, RvSize};
pub use channel::{
    AddrChannel, AxilSlaveInputs, AxilSlaveOutputs, ReadDataChannel, WriteDataChannel,
    WriteRespChannel,
};
pub use params::{AxilParams, ParamsError};
pub use word::{DataWord, WriteStrobe};
