/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the AXI4-Lite peripheral library.

--*/

mod axil_ram;
mod read_channel;
mod write_channel;

pub use axil_ram::{AxilRam, AxilRamError, AxilRamStats};
pub use read_channel::ReadState;
pub use write_channel::WriteState;
