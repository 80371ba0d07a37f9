// Licensed under the Apache-2.0 license

mod test_axil_bench;
mod test_axil_ordering;
mod test_axil_reset;

#[cfg(test)]
mod test {
    use emulator_testing::{AxilTestbench, PausePolicy};
    use emulator_types::AxilParams;
    use log::LevelFilter;
    use simple_logger::SimpleLogger;

    pub(crate) fn init_logger() {
        let _ = SimpleLogger::new().with_level(LevelFilter::Info).init();
    }

    /// A testbench that has been through one reset pulse.
    pub(crate) fn testbench(params: AxilParams, pause: PausePolicy) -> AxilTestbench {
        init_logger();
        let mut tb = AxilTestbench::new(params);
        tb.set_pause_policy(pause);
        tb.reset().unwrap();
        tb
    }

    /// Bytes `11 22 33 ...` as used by the address sweep tests.
    pub(crate) fn test_data(len: usize) -> Vec<u8> {
        (1..=len).map(|i| (i as u8).wrapping_mul(0x11)).collect()
    }
}
