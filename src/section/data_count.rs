//! DataCount section (id 12): count of data segments.
//!
//! Required only when `memory.init` or `data.drop` instructions appear in the
//! code section. Sits between Element and Code in wire order.
//!
//! ```text
//! datacountsec ::= section_12(u32)
//! ```

use crate::buffer::ByteBuffer;
use crate::error::EncodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataCountSection {
    count: Option<u32>,
}

impl DataCountSection {
    pub fn new(count: u32) -> Self {
        Self { count: Some(count) }
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count.is_none()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = ByteBuffer::new();
        if let Some(count) = self.count {
            buf.write_vu32(count);
        }
        Ok(buf.into_bytes())
    }
}
