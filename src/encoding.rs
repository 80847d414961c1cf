//! Binary encoding primitives for WebAssembly values.
//!
//! Provides LEB128 integer encoding and decoding, IEEE 754 float encoding, and
//! the wire constants used by the section encoders.
//!
//! Writers append directly into a caller-provided `&mut Vec<u8>`, avoiding
//! intermediate allocations. Readers work on a byte slice and an offset and
//! report how many bytes they consumed.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{EncodeError, VarintFault};

// ---------------------------------------------------------------------------
// WebAssembly binary format constants (§5)
// ---------------------------------------------------------------------------

// Preamble (§5.5.16)
pub const MAGIC: [u8; 4] = *b"\0asm";
pub const VERSION: u32 = 1;

// Section IDs (§5.5.2)
pub const SECTION_CUSTOM: u8 = 0;
pub const SECTION_TYPE: u8 = 1;
pub const SECTION_IMPORT: u8 = 2;
pub const SECTION_FUNCTION: u8 = 3;
pub const SECTION_TABLE: u8 = 4;
pub const SECTION_MEMORY: u8 = 5;
pub const SECTION_GLOBAL: u8 = 6;
pub const SECTION_EXPORT: u8 = 7;
pub const SECTION_START: u8 = 8;
pub const SECTION_ELEMENT: u8 = 9;
pub const SECTION_CODE: u8 = 10;
pub const SECTION_DATA: u8 = 11;
pub const SECTION_DATA_COUNT: u8 = 12;

// Type constructors (§5.3.6)
pub const TYPE_FUNC: u8 = 0x60;

// Limits (§5.3.7)
pub const LIMITS_MIN: u8 = 0x00;
pub const LIMITS_MIN_MAX: u8 = 0x01;

// Import/export descriptor kinds (§5.5.5, §5.5.10)
pub const DESC_FUNC: u8 = 0x00;
pub const DESC_TABLE: u8 = 0x01;
pub const DESC_MEMORY: u8 = 0x02;
pub const DESC_GLOBAL: u8 = 0x03;

// Element segment elemkind (§5.5.12)
pub const ELEMKIND_FUNCREF: u8 = 0x00;

// Element segment flags (§5.5.12)
// 3-bit encoding: bit 0 = non-active mode, bit 1 = explicit table (or declarative), bit 2 = expressions
pub const ELEM_NON_ACTIVE: u32 = 0b001;
pub const ELEM_EXPLICIT: u32 = 0b010;
pub const ELEM_EXPRESSIONS: u32 = 0b100;

// Data segment flags (§5.5.14)
pub const DATA_ACTIVE: u32 = 0;
pub const DATA_PASSIVE: u32 = 1;
pub const DATA_ACTIVE_EXPLICIT: u32 = 2;

// Constant expression opcodes (§5.4)
pub const OP_GLOBAL_GET: u8 = 0x23;
pub const OP_I32_CONST: u8 = 0x41;
pub const OP_I64_CONST: u8 = 0x42;
pub const OP_F32_CONST: u8 = 0x43;
pub const OP_F64_CONST: u8 = 0x44;
pub const OP_REF_NULL: u8 = 0xD0;
pub const OP_REF_FUNC: u8 = 0xD2;

// Expression terminator (§5.4.9)
pub const OP_END: u8 = 0x0B;

// ---------------------------------------------------------------------------
// Unsigned LEB128
// ---------------------------------------------------------------------------

/// Appends the unsigned LEB128 encoding of a u64 value to `buf`.
fn write_vu(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        byte |= 0x80;
        buf.push(byte);
    }
}

/// Appends the unsigned LEB128 encoding of a u32 value to `buf`.
pub fn write_vu32(buf: &mut Vec<u8>, v: u32) {
    write_vu(buf, v as u64);
}

/// Appends the unsigned LEB128 encoding of a u64 value to `buf`.
pub fn write_vu64(buf: &mut Vec<u8>, v: u64) {
    write_vu(buf, v);
}

/// Appends a single-bit boolean as a one-byte LEB128 value (0x00 or 0x01).
pub fn write_vu1(buf: &mut Vec<u8>, v: bool) {
    buf.push(if v { 1 } else { 0 });
}

/// Number of bytes the unsigned LEB128 encoding of `value` occupies.
pub fn vu_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

// ---------------------------------------------------------------------------
// Signed LEB128
// ---------------------------------------------------------------------------

/// Appends the signed LEB128 encoding of an i64 value to `buf`.
fn write_vs(buf: &mut Vec<u8>, mut value: i64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if (value == 0 && (byte & 0x40) == 0) || (value == -1 && (byte & 0x40) != 0) {
            buf.push(byte);
            break;
        }
        byte |= 0x80;
        buf.push(byte);
    }
}

/// Appends the signed LEB128 encoding of an i32 value to `buf`.
pub fn write_vs32(buf: &mut Vec<u8>, v: i32) {
    write_vs(buf, v as i64);
}

/// Appends the signed LEB128 encoding of an i64 value to `buf`.
pub fn write_vs64(buf: &mut Vec<u8>, v: i64) {
    write_vs(buf, v);
}

/// Number of bytes the signed LEB128 encoding of `value` occupies.
pub fn vs_len(mut value: i64) -> usize {
    let mut len = 1;
    loop {
        let byte = value & 0x7f;
        value >>= 7;
        if (value == 0 && (byte & 0x40) == 0) || (value == -1 && (byte & 0x40) != 0) {
            return len;
        }
        len += 1;
    }
}

// ---------------------------------------------------------------------------
// LEB128 decoding
// ---------------------------------------------------------------------------

fn malformed(offset: usize, fault: VarintFault) -> EncodeError {
    EncodeError::MalformedVarint { offset, fault }
}

/// Maximum encoded length of an N-bit integer: ceil(N / 7).
fn max_len(bits: u32) -> usize {
    ((bits + 6) / 7) as usize
}

fn read_vu(bytes: &[u8], offset: usize, bits: u32) -> Result<(u64, usize), EncodeError> {
    let max_bytes = max_len(bits);
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for i in 0..max_bytes {
        let byte = *bytes
            .get(offset + i)
            .ok_or_else(|| malformed(offset, VarintFault::Truncated))?;
        let low = (byte & 0x7f) as u64;

        if i == max_bytes - 1 {
            if byte & 0x80 != 0 {
                return Err(malformed(offset, VarintFault::Overlong));
            }
            // only `bits - shift` value bits remain in the last group
            if low >> (bits - shift) != 0 {
                return Err(malformed(offset, VarintFault::Overflow));
            }
        }

        result |= low << shift;
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    Err(malformed(offset, VarintFault::Overlong))
}

fn read_vs(bytes: &[u8], offset: usize, bits: u32) -> Result<(i64, usize), EncodeError> {
    let max_bytes = max_len(bits);
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    for i in 0..max_bytes {
        let byte = *bytes
            .get(offset + i)
            .ok_or_else(|| malformed(offset, VarintFault::Truncated))?;

        if i == max_bytes - 1 {
            if byte & 0x80 != 0 {
                return Err(malformed(offset, VarintFault::Overlong));
            }
            // the sign bit and every unused bit above it must agree
            let spare = bits - shift;
            let mask = 0x7f & !((1u8 << (spare - 1)) - 1);
            let high = byte & mask;
            if high != 0 && high != mask {
                return Err(malformed(offset, VarintFault::Overflow));
            }
        }

        result |= ((byte & 0x7f) as i64) << shift;
        shift += 7;
        if byte & 0x80 == 0 {
            if shift < 64 && (byte & 0x40) != 0 {
                result |= -1i64 << shift;
            }
            return Ok((result, i + 1));
        }
    }

    Err(malformed(offset, VarintFault::Overlong))
}

/// Decodes an unsigned 32-bit LEB128 value starting at `offset`.
///
/// Returns the value and the number of bytes consumed.
pub fn read_vu32(bytes: &[u8], offset: usize) -> Result<(u32, usize), EncodeError> {
    read_vu(bytes, offset, 32).map(|(v, n)| (v as u32, n))
}

/// Decodes an unsigned 64-bit LEB128 value starting at `offset`.
pub fn read_vu64(bytes: &[u8], offset: usize) -> Result<(u64, usize), EncodeError> {
    read_vu(bytes, offset, 64)
}

/// Decodes a signed 32-bit LEB128 value starting at `offset`.
pub fn read_vs32(bytes: &[u8], offset: usize) -> Result<(i32, usize), EncodeError> {
    read_vs(bytes, offset, 32).map(|(v, n)| (v as i32, n))
}

/// Decodes a signed 64-bit LEB128 value starting at `offset`.
pub fn read_vs64(bytes: &[u8], offset: usize) -> Result<(i64, usize), EncodeError> {
    read_vs(bytes, offset, 64)
}

// ---------------------------------------------------------------------------
// IEEE 754 floats (little-endian)
// ---------------------------------------------------------------------------

/// Appends the little-endian IEEE 754 encoding of an f32 value to `buf`.
pub fn write_f32(buf: &mut Vec<u8>, v: f32) {
    let mut bytes = [0u8; 4];
    LittleEndian::write_f32(&mut bytes, v);
    buf.extend_from_slice(&bytes);
}

/// Appends the little-endian IEEE 754 encoding of an f64 value to `buf`.
pub fn write_f64(buf: &mut Vec<u8>, v: f64) {
    let mut bytes = [0u8; 8];
    LittleEndian::write_f64(&mut bytes, v);
    buf.extend_from_slice(&bytes);
}

/// Appends a little-endian u32 (used for the preamble version).
pub fn write_u32_le(buf: &mut Vec<u8>, v: u32) {
    let mut bytes = [0u8; 4];
    LittleEndian::write_u32(&mut bytes, v);
    buf.extend_from_slice(&bytes);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rstest::rstest;

    fn assert_eq_with_diag<T: std::fmt::Debug + std::cmp::PartialEq>(actual: T, expected: T) {
        assert!(
            actual == expected,
            "Assertion failed. Actual: {actual:?}, Expected: {expected:?}",
        );
    }

    fn encode_vu32(v: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        write_vu32(&mut buf, v);
        buf
    }

    fn encode_vu64(v: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_vu64(&mut buf, v);
        buf
    }

    fn encode_vs32(v: i32) -> Vec<u8> {
        let mut buf = Vec::new();
        write_vs32(&mut buf, v);
        buf
    }

    fn encode_vs64(v: i64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_vs64(&mut buf, v);
        buf
    }

    // -- Unsigned LEB128 --

    #[rstest]
    #[case(0, vec![0])]
    #[case(1, vec![1])]
    #[case(127, vec![0x7f])]
    #[case(128, vec![0x80, 0x01])]
    #[case(300, vec![0xac, 0x02])]
    #[case(16256, vec![0x80, 0x7f])]
    #[case(624485, vec![0b11100101, 0b10001110, 0b00100110])]
    #[case(0x80000000, vec![128, 128, 128, 128, 8])]
    #[case(0xffffffff, vec![0xff, 0xff, 0xff, 0xff, 0xf])]
    fn test_write_vu32(#[case] value: u32, #[case] expected: Vec<u8>) {
        assert_eq_with_diag(encode_vu32(value), expected.clone());
        assert_eq_with_diag(encode_vu64(value as u64), expected.clone());
        assert_eq_with_diag(vu_len(value as u64), expected.len());
    }

    #[test]
    fn test_write_vu64_max() {
        assert_eq_with_diag(
            encode_vu64(u64::MAX),
            vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01],
        );
    }

    #[test]
    fn test_rt_vu32() {
        let mut test_values = vec![0, 1, u32::MAX, u32::MIN, 128, 129, 130, 624485];

        for i in 0..31 {
            let value = 1u32 << i;
            test_values.push(value);
            test_values.push(value + 1);
            test_values.push(value - 1);
        }

        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            test_values.push(rng.gen::<u32>());
        }

        for i in 0..1000 {
            test_values.push(i);
        }

        for &expected in &test_values {
            let bytes = encode_vu32(expected);
            let (actual, consumed) = read_vu32(&bytes, 0).unwrap_or_else(|e| panic!("failed to read vu32: {e}"));
            assert_eq_with_diag(actual, expected);
            assert_eq_with_diag(consumed, bytes.len());
            assert_eq_with_diag(encode_vu32(actual), bytes);
        }
    }

    #[test]
    fn test_rt_vu64() {
        let mut test_values = vec![0, 1, u64::MAX, u64::MIN, 128, 129, 130, 624485];

        for i in 0..63 {
            let value = 1u64 << i;
            test_values.push(value);
            test_values.push(value + 1);
            test_values.push(value - 1);
        }

        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            test_values.push(rng.gen::<u64>());
        }

        for &expected in &test_values {
            let bytes = encode_vu64(expected);
            let (actual, consumed) = read_vu64(&bytes, 0).unwrap_or_else(|e| panic!("failed to read vu64: {e}"));
            assert_eq_with_diag(actual, expected);
            assert_eq_with_diag(consumed, bytes.len());
            assert_eq_with_diag(vu_len(expected), bytes.len());
        }
    }

    #[test]
    fn test_write_vu1() {
        let mut buf = Vec::new();
        write_vu1(&mut buf, false);
        write_vu1(&mut buf, true);
        assert_eq!(buf, vec![0, 1]);
    }

    // -- Signed LEB128 --

    #[rstest]
    #[case(0, vec![0])]
    #[case(1, vec![1])]
    #[case(-1, vec![0x7f])]
    #[case(63, vec![0x3f])]
    #[case(64, vec![0xc0, 0x00])]
    #[case(-64, vec![0x40])]
    #[case(-65, vec![0xbf, 0x7f])]
    #[case(-128, vec![0x80, 0x7f])]
    #[case(624485, vec![0b11100101, 0b10001110, 0b00100110])]
    #[case(-624485, vec![0b10011011, 0b11110001, 0b01011001])]
    #[case(i32::MAX, vec![0xff, 0xff, 0xff, 0xff, 0x07])]
    #[case(i32::MIN, vec![128, 128, 128, 128, 120])]
    fn test_write_vs32(#[case] value: i32, #[case] expected: Vec<u8>) {
        assert_eq_with_diag(encode_vs32(value), expected.clone());
        assert_eq_with_diag(vs_len(value as i64), expected.len());
    }

    #[test]
    fn test_write_vs64() {
        assert_eq_with_diag(
            encode_vs64(0x7ff8000000000000),
            vec![128, 128, 128, 128, 128, 128, 128, 252, 255, 0],
        );
        assert_eq_with_diag(
            encode_vs64(i64::MIN),
            vec![128, 128, 128, 128, 128, 128, 128, 128, 128, 127],
        );
    }

    #[test]
    fn test_rt_vs32() {
        let mut test_values = vec![0, 1, -1, i32::MAX, i32::MIN, 128, -128, 129, -129, 624485, -624485];

        for i in 0..31 {
            let value = 1i32 << i;
            test_values.push(value);
            test_values.push(-value);
            test_values.push(value - 1);
            test_values.push(-value + 1);
        }

        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            test_values.push(rng.gen::<i32>());
        }

        for i in -1000..1000 {
            test_values.push(i);
        }

        for &expected in &test_values {
            let bytes = encode_vs32(expected);
            let (actual, consumed) = read_vs32(&bytes, 0).unwrap_or_else(|e| panic!("failed to read vs32: {e}"));
            assert_eq_with_diag(actual, expected);
            assert_eq_with_diag(consumed, bytes.len());
            assert_eq_with_diag(encode_vs32(actual), bytes);
        }
    }

    #[test]
    fn test_rt_vs64() {
        let mut test_values = vec![0, 1, -1, i64::MAX, i64::MIN, 128, -128, 624485, -624485];

        for i in 0..63 {
            let value = 1i64 << i;
            test_values.push(value);
            test_values.push(-value);
            test_values.push(value - 1);
            test_values.push(-value + 1);
        }

        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            test_values.push(rng.gen::<i64>());
        }

        for &expected in &test_values {
            let bytes = encode_vs64(expected);
            let (actual, consumed) = read_vs64(&bytes, 0).unwrap_or_else(|e| panic!("failed to read vs64: {e}"));
            assert_eq_with_diag(actual, expected);
            assert_eq_with_diag(consumed, bytes.len());
            assert_eq_with_diag(vs_len(expected), bytes.len());
        }
    }

    // -- Decoding failures --

    #[rstest]
    #[case(vec![], VarintFault::Truncated)]
    #[case(vec![0x80], VarintFault::Truncated)]
    #[case(vec![0xff, 0xff, 0xff, 0xff], VarintFault::Truncated)]
    #[case(vec![0x80, 0x80, 0x80, 0x80, 0x80, 0x00], VarintFault::Overlong)]
    #[case(vec![0xff, 0xff, 0xff, 0xff, 0x1f], VarintFault::Overflow)]
    #[case(vec![0x80, 0x80, 0x80, 0x80, 0x70], VarintFault::Overflow)]
    fn test_read_vu32_malformed(#[case] bytes: Vec<u8>, #[case] fault: VarintFault) {
        assert_eq!(
            read_vu32(&bytes, 0),
            Err(EncodeError::MalformedVarint { offset: 0, fault })
        );
    }

    #[test]
    fn test_read_vu64_malformed() {
        let overlong = vec![0x80; 10].into_iter().chain([0x00]).collect::<Vec<_>>();
        assert!(matches!(
            read_vu64(&overlong, 0),
            Err(EncodeError::MalformedVarint { fault: VarintFault::Overlong, .. })
        ));
        let overflow = vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
        assert!(matches!(
            read_vu64(&overflow, 0),
            Err(EncodeError::MalformedVarint { fault: VarintFault::Overflow, .. })
        ));
    }

    #[rstest]
    // i32::MAX with a stray sign bit in the unused group
    #[case(vec![0xff, 0xff, 0xff, 0xff, 0x0f])]
    // i32::MIN with a cleared unused bit
    #[case(vec![0x80, 0x80, 0x80, 0x80, 0x70])]
    fn test_read_vs32_overflow(#[case] bytes: Vec<u8>) {
        assert!(matches!(
            read_vs32(&bytes, 0),
            Err(EncodeError::MalformedVarint { fault: VarintFault::Overflow, .. })
        ));
    }

    #[test]
    fn test_read_vs64_overflow() {
        let bytes = vec![0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert!(matches!(
            read_vs64(&bytes, 0),
            Err(EncodeError::MalformedVarint { fault: VarintFault::Overflow, .. })
        ));
    }

    #[test]
    fn test_read_at_offset() {
        let bytes = vec![0xAA, 0xBB, 0xac, 0x02, 0x7f];
        assert_eq!(read_vu32(&bytes, 2), Ok((300, 2)));
        assert_eq!(read_vs32(&bytes, 4), Ok((-1, 1)));
        assert_eq!(
            read_vu32(&bytes, 5),
            Err(EncodeError::MalformedVarint {
                offset: 5,
                fault: VarintFault::Truncated
            })
        );
    }

    #[test]
    fn test_non_minimal_within_width_is_accepted() {
        // padding up to the maximum width is legal in the binary format
        assert_eq!(read_vu32(&[0x80, 0x80, 0x80, 0x80, 0x00], 0), Ok((0, 5)));
        assert_eq!(read_vs32(&[0xff, 0x7f], 0), Ok((-1, 2)));
    }

    // -- Floats --

    #[test]
    fn test_write_f32_into_buffer() {
        let mut buf = Vec::new();
        write_f32(&mut buf, 6.283_185_5);
        assert_eq!(buf, vec![219, 15, 201, 64]);
    }

    #[test]
    fn test_write_f64_into_buffer() {
        let mut buf = Vec::new();
        write_f64(&mut buf, std::f64::consts::TAU);
        assert_eq!(buf, vec![24, 45, 68, 84, 251, 33, 25, 64]);
    }

    #[test]
    fn test_write_u32_le() {
        let mut buf = Vec::new();
        write_u32_le(&mut buf, VERSION);
        assert_eq!(buf, vec![1, 0, 0, 0]);
    }
}
