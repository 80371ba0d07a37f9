/*++

Licensed under the Apache-2.0 license.

File Name:

    consts.rs

Abstract:

    File contains constants describing the AXI4-Lite RAM bus geometry.

--*/

/// Address width used when no configuration is supplied.
pub const DEFAULT_ADDR_WIDTH: u32 = 16;

/// Data width used when no configuration is supplied.
pub const DEFAULT_DATA_WIDTH: u32 = 32;

/// Narrowest supported data bus, in bits.
pub const MIN_DATA_WIDTH: u32 = 8;

/// Widest supported data bus, in bits.
pub const MAX_DATA_WIDTH: u32 = 512;

/// Widest supported address bus, in bits.
pub const MAX_ADDR_WIDTH: u32 = 32;

/// Number of byte lanes on the widest supported data bus.
pub const MAX_STRB_WIDTH: usize = (MAX_DATA_WIDTH / 8) as usize;
