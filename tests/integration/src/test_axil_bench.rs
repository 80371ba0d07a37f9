// Licensed under the Apache-2.0 license

#[cfg(test)]
mod test {
    use crate::test::{test_data, testbench};
    use emulator_testing::PausePolicy;
    use emulator_types::{AxiResp, AxilParams, RvAddr};

    const WAITS: [PausePolicy; 2] = [PausePolicy::Never, PausePolicy::Pattern];

    #[test]
    fn test_write_read_word() {
        let mut tb = testbench(AxilParams::default(), PausePolicy::Never);
        let addr = 4;
        let data = [0x11, 0x22, 0x33, 0x44];

        tb.master_mut().init_write(addr, &data);
        tb.wait().unwrap();
        tb.master_mut().init_read(addr, data.len());
        tb.wait().unwrap();

        let (read_addr, read_data) = tb.master_mut().get_read_data().unwrap();
        assert_eq!(read_addr, addr);
        assert_eq!(read_data, data);
        assert_eq!(tb.master().write_responses(), &[AxiResp::Okay]);
    }

    /// Narrow writes at every lane offset must leave the bytes around them
    /// untouched.
    #[test]
    fn test_unaligned_writes_preserve_neighbours() {
        let mut tb = testbench(AxilParams::default(), PausePolicy::Never);
        for length in 1..=7usize {
            for offset in 4..=7 {
                for wait in WAITS {
                    let addr = 256 * (16 * offset + length as RvAddr) + offset;
                    let data = test_data(length);

                    tb.write(addr - 4, &vec![0xaa; length + 8]).unwrap();

                    tb.set_pause_policy(wait);
                    tb.master_mut().init_write(addr, &data);
                    tb.wait().unwrap();
                    tb.set_pause_policy(PausePolicy::Never);

                    tb.master_mut().init_read(addr - 1, length + 2);
                    tb.wait().unwrap();
                    let (read_addr, read_data) = tb.master_mut().get_read_data().unwrap();

                    let mut expected = vec![0xaa];
                    expected.extend_from_slice(&data);
                    expected.push(0xaa);
                    assert_eq!(read_addr, addr - 1);
                    assert_eq!(
                        read_data, expected,
                        "length {length} offset {offset} wait {wait:?}"
                    );
                }
            }
        }
        assert!(tb.master().write_responses().iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_unaligned_reads() {
        let mut tb = testbench(AxilParams::default(), PausePolicy::Never);
        for length in 1..=7usize {
            for offset in 4..=7 {
                for wait in WAITS {
                    let addr = 256 * (16 * offset + length as RvAddr) + offset;
                    let data = test_data(length);

                    tb.write(addr, &data).unwrap();

                    tb.set_pause_policy(wait);
                    tb.master_mut().init_read(addr, length);
                    tb.wait().unwrap();
                    tb.cycle().unwrap();
                    tb.set_pause_policy(PausePolicy::Never);

                    assert_eq!(
                        tb.master_mut().get_read_data(),
                        Some((addr, data)),
                        "length {length} offset {offset} wait {wait:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_wide_data_bus() {
        for data_width in [8, 64, 128, 512] {
            let params = AxilParams::new(12, data_width).unwrap();
            let width = params.strb_width();
            let mut tb = testbench(params, PausePolicy::Pattern);
            for offset in 0..width as RvAddr {
                let addr = 0x200 + offset;
                let data = test_data(width + 3);
                tb.write(addr - 1, &vec![0xaa; width + 5]).unwrap();
                tb.write(addr, &data).unwrap();

                let read = tb.read(addr - 1, width + 5).unwrap();
                assert_eq!(read[0], 0xaa);
                assert_eq!(&read[1..width + 4], &data[..]);
                assert_eq!(read[width + 4], 0xaa);
            }
        }
    }

    #[test]
    fn test_params_from_toml() {
        let params = AxilParams::from_toml_str("addr_width = 10\ndata_width = 64").unwrap();
        let mut tb = testbench(params, PausePolicy::Never);
        tb.write(0x3fc, &[1, 2, 3, 4]).unwrap();
        // address bits above addr_width are not decoded
        assert_eq!(tb.read(0x7fc, 4).unwrap(), [1, 2, 3, 4]);
        assert_eq!(tb.ram().ram().len(), 1024);
    }
}
