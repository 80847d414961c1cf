//! Common test utilities shared between integration tests

use wasm_emit::encoding::read_vu32;

/// A section as found in an encoded module: id byte, length prefix width and payload.
#[derive(Debug)]
pub struct FramedSection {
    pub id: u8,
    pub prefix_len: usize,
    pub payload: Vec<u8>,
}

/// Splits an encoded module into its sections, asserting the preamble and
/// that every length prefix matches the bytes that follow it.
pub fn split_sections(bytes: &[u8]) -> Vec<FramedSection> {
    assert_eq!(&bytes[0..4], b"\0asm", "missing magic");
    assert_eq!(&bytes[4..8], &[1, 0, 0, 0], "unexpected version");

    let mut sections = Vec::new();
    let mut pos = 8;
    while pos < bytes.len() {
        let id = bytes[pos];
        let (len, prefix_len) = read_vu32(bytes, pos + 1).unwrap_or_else(|e| panic!("bad section length: {e}"));
        let start = pos + 1 + prefix_len;
        let end = start + len as usize;
        assert!(end <= bytes.len(), "section {id} overruns the module");
        sections.push(FramedSection {
            id,
            prefix_len,
            payload: bytes[start..end].to_vec(),
        });
        pos = end;
    }
    sections
}
