#![no_main]

use libfuzzer_sys::fuzz_target;

use wasm_emit::encoding::{read_vs32, read_vs64, read_vu32, read_vu64, write_vs32, write_vs64, write_vu32, write_vu64};

// Any accepted input must decode to a value whose minimal encoding decodes
// back to the same value, and never consume more than the width allows.
fuzz_target!(|data: &[u8]| {
    if let Ok((v, n)) = read_vu32(data, 0) {
        assert!(n <= 5);
        let mut buf = Vec::new();
        write_vu32(&mut buf, v);
        assert_eq!(read_vu32(&buf, 0).unwrap(), (v, buf.len()));
    }
    if let Ok((v, n)) = read_vu64(data, 0) {
        assert!(n <= 10);
        let mut buf = Vec::new();
        write_vu64(&mut buf, v);
        assert_eq!(read_vu64(&buf, 0).unwrap(), (v, buf.len()));
    }
    if let Ok((v, n)) = read_vs32(data, 0) {
        assert!(n <= 5);
        let mut buf = Vec::new();
        write_vs32(&mut buf, v);
        assert_eq!(read_vs32(&buf, 0).unwrap(), (v, buf.len()));
    }
    if let Ok((v, n)) = read_vs64(data, 0) {
        assert!(n <= 10);
        let mut buf = Vec::new();
        write_vs64(&mut buf, v);
        assert_eq!(read_vs64(&buf, 0).unwrap(), (v, buf.len()));
    }
});
