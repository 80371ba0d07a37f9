// Licensed under the Apache-2.0 license

#[cfg(test)]
mod test {
    use crate::test::testbench;
    use emulator_bus::Bus;
    use emulator_periph::{ReadState, WriteState};
    use emulator_testing::{PausePolicy, WriteOrder};
    use emulator_types::{AxilParams, RvSize};

    #[test]
    fn test_reset_between_address_and_data() {
        let mut tb = testbench(AxilParams::default(), PausePolicy::Never);
        tb.write(0x40, &[0x77; 4]).unwrap();

        tb.set_write_order(WriteOrder::AddressFirst(8));
        tb.master_mut().init_write(0x40, &[1, 2, 3, 4]);
        tb.cycles(3).unwrap();
        assert_eq!(tb.ram().write_state(), &WriteState::AwaitData { addr: 0x40 });
        assert!(tb.ram().has_pending_write());

        tb.reset().unwrap();
        assert_eq!(tb.ram().write_state(), &WriteState::Idle);
        assert!(tb.master().idle());
        tb.cycles(12).unwrap();
        assert_eq!(tb.ram_mut().read(RvSize::Word, 0x40).unwrap(), 0x7777_7777);

        // the bus is usable again
        tb.set_write_order(WriteOrder::Together);
        tb.write(0x40, &[1, 2, 3, 4]).unwrap();
        assert_eq!(tb.read(0x40, 4).unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_reset_while_responding() {
        let mut tb = testbench(AxilParams::default(), PausePolicy::Never);
        tb.ram_mut().write(RvSize::Word, 0x20, 0x1234_5678).unwrap();

        // hold rready low so the read response stays pending
        tb.set_pause_policy(PausePolicy::Random {
            percent: 100,
            seed: 3,
        });
        tb.master_mut().init_read(0x20, 4);
        tb.cycles(4).unwrap();
        assert_eq!(tb.ram().read_state(), &ReadState::Idle);

        // pattern frees the fourth cycle, which issues the request; the
        // next one is paused again
        tb.set_pause_policy(PausePolicy::Pattern);
        tb.cycles(5).unwrap();
        assert!(matches!(tb.ram().read_state(), ReadState::Respond { .. }));
        assert!(tb.ram().outputs().r.valid);
        tb.reset().unwrap();
        assert_eq!(tb.ram().read_state(), &ReadState::Idle);
        assert!(!tb.ram().outputs().r.valid);
        assert!(tb.master_mut().get_read_data().is_none());

        tb.set_pause_policy(PausePolicy::Never);
        assert_eq!(tb.read(0x20, 4).unwrap(), [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_reset_keeps_memory() {
        let mut tb = testbench(AxilParams::default(), PausePolicy::Pattern);
        tb.write(0x1000, &[9, 8, 7, 6, 5]).unwrap();
        for _ in 0..3 {
            tb.reset().unwrap();
        }
        assert_eq!(tb.read(0x1000, 5).unwrap(), [9, 8, 7, 6, 5]);
        assert_eq!(tb.ram().stats().resets, 4);
    }
}
