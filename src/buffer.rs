//! An append-only byte buffer for assembling section payloads.

use crate::encoding::{
    write_f32, write_f64, write_u32_le, write_vs32, write_vs64, write_vu1, write_vu32, write_vu64,
};
use crate::error::EncodeError;

/// Converts a length into the u32 used by every length prefix in the format.
pub fn checked_len(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::PayloadTooLarge { len })
}

/// Growable byte sequence with LEB128-aware writers.
///
/// Snapshots taken with [`ByteBuffer::to_bytes`] are copies; later writes do
/// not affect them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_vu32(&mut self, v: u32) {
        write_vu32(&mut self.bytes, v);
    }

    pub fn write_vu64(&mut self, v: u64) {
        write_vu64(&mut self.bytes, v);
    }

    pub fn write_vs32(&mut self, v: i32) {
        write_vs32(&mut self.bytes, v);
    }

    pub fn write_vs64(&mut self, v: i64) {
        write_vs64(&mut self.bytes, v);
    }

    pub fn write_bool(&mut self, v: bool) {
        write_vu1(&mut self.bytes, v);
    }

    pub fn write_f32(&mut self, v: f32) {
        write_f32(&mut self.bytes, v);
    }

    pub fn write_f64(&mut self, v: f64) {
        write_f64(&mut self.bytes, v);
    }

    pub fn write_u32_le(&mut self, v: u32) {
        write_u32_le(&mut self.bytes, v);
    }

    /// Writes a vector element count.
    pub fn write_count(&mut self, count: usize) -> Result<(), EncodeError> {
        self.write_vu32(checked_len(count)?);
        Ok(())
    }

    /// Writes `vu32(len(payload))` followed by the payload verbatim.
    pub fn write_length_prefixed(&mut self, payload: &[u8]) -> Result<(), EncodeError> {
        self.write_count(payload.len())?;
        self.write_bytes(payload);
        Ok(())
    }

    /// Writes a UTF-8 name as a length-prefixed byte vector.
    pub fn write_name(&mut self, name: &str) -> Result<(), EncodeError> {
        self.write_length_prefixed(name.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns a copy of the bytes written so far.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buf: ByteBuffer) -> Self {
        buf.into_bytes()
    }
}
