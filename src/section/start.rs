//! Start section (id 8): start function index.
//!
//! ```text
//! startsec ::= section_8(funcidx)
//! ```

use crate::buffer::ByteBuffer;
use crate::error::EncodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartSection {
    function: Option<u32>,
}

impl StartSection {
    pub fn new(function: u32) -> Self {
        Self {
            function: Some(function),
        }
    }

    pub fn function(&self) -> Option<u32> {
        self.function
    }

    pub fn is_empty(&self) -> bool {
        self.function.is_none()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = ByteBuffer::new();
        if let Some(function) = self.function {
            buf.write_vu32(function);
        }
        Ok(buf.into_bytes())
    }
}
