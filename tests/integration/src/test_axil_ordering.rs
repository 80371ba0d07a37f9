// Licensed under the Apache-2.0 license

#[cfg(test)]
mod test {
    use crate::test::{init_logger, testbench};
    use emulator_bus::Bus;
    use emulator_testing::{AxilTestbench, PausePolicy, WriteOrder};
    use emulator_types::{AxilParams, RvAddr, RvSize};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ORDERS: [WriteOrder; 7] = [
        WriteOrder::Together,
        WriteOrder::AddressFirst(0),
        WriteOrder::AddressFirst(1),
        WriteOrder::AddressFirst(4),
        WriteOrder::DataFirst(1),
        WriteOrder::DataFirst(2),
        WriteOrder::DataFirst(5),
    ];

    /// Byte writes of random length and address, checked against a plain
    /// byte array.
    fn random_traffic(tb: &mut AxilTestbench, seed: u64, count: usize) -> Vec<u8> {
        let size = tb.ram().params().mem_size();
        let mut model = vec![0u8; size];
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..count {
            let len = rng.gen_range(1..=12);
            let addr = rng.gen_range(0..size - len);
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            tb.write(addr as RvAddr, &data).unwrap();
            model[addr..addr + len].copy_from_slice(&data);

            let check = rng.gen_range(0..size - 16);
            assert_eq!(
                tb.read(check as RvAddr, 16).unwrap(),
                &model[check..check + 16]
            );
        }
        model
    }

    #[test]
    fn test_write_order_does_not_matter() {
        let params = AxilParams::new(8, 32).unwrap();
        let mut images = Vec::new();
        for order in ORDERS {
            let mut tb = testbench(params, PausePolicy::Never);
            tb.set_write_order(order);
            let model = random_traffic(&mut tb, 0x5eed, 64);
            assert_eq!(tb.ram().ram().data(), &model[..], "{order:?}");
            images.push(model);
        }
        assert!(images.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_backpressure_does_not_change_results() {
        let params = AxilParams::new(9, 64).unwrap();
        let mut expected = None;
        for percent in [0, 25, 50, 90] {
            for seed in 0..4 {
                let mut tb = testbench(params, PausePolicy::Random { percent, seed });
                tb.set_write_order(ORDERS[seed as usize % ORDERS.len()]);
                let model = random_traffic(&mut tb, 42, 48);
                assert_eq!(tb.ram().ram().data(), &model[..]);
                match &expected {
                    None => expected = Some(model),
                    Some(expected) => assert_eq!(expected, &model),
                }
            }
        }
    }

    #[test]
    fn test_read_and_write_same_word_same_edge() {
        let mut tb = testbench(AxilParams::default(), PausePolicy::Never);
        tb.ram_mut().write(RvSize::Word, 0x80, 0x0101_0101).unwrap();

        tb.master_mut().init_write(0x80, &[2, 2, 2, 2]);
        tb.master_mut().init_read(0x80, 4);
        tb.wait().unwrap();

        let (_, read) = tb.master_mut().get_read_data().unwrap();
        assert_eq!(read, [1, 1, 1, 1]);
        assert_eq!(tb.ram_mut().read(RvSize::Word, 0x80).unwrap(), 0x0202_0202);
    }

    #[test]
    fn test_channels_overlap() {
        init_logger();
        let mut tb = AxilTestbench::new(AxilParams::default());
        tb.ram_mut().write(RvSize::Word, 0x100, 0xdead_beef).unwrap();
        tb.cycle().unwrap();

        tb.master_mut().init_write(0x10, &[1, 2, 3, 4, 5, 6, 7, 8]);
        tb.master_mut().init_read(0x100, 4);
        tb.wait().unwrap();

        let stats = tb.ram().stats();
        assert_eq!(stats.writes, 2);
        assert_eq!(stats.reads, 1);
        assert_eq!(stats.violations, 0);
        // both channels work concurrently, so the read does not queue
        // behind the writes
        assert!(stats.cycles < 12, "took {} cycles", stats.cycles);
        assert_eq!(
            tb.master_mut().get_read_data(),
            Some((0x100, vec![0xef, 0xbe, 0xad, 0xde]))
        );
    }
}
