/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the emulator bus library.

--*/

mod bus;
mod ram;

pub use bus::{Bus, BusError};
pub use caliptra_emu_bus::{Clock, Ram};
pub use ram::WordAccess;
