//! Custom sections (id 0).
//!
//! ```text
//! customsec ::= section_0(name byte*)
//! ```
//!
//! Custom sections may appear any number of times and anywhere in a module.

use crate::buffer::ByteBuffer;
use crate::error::EncodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSection {
    pub name: String,
    pub payload: Vec<u8>,
}

impl CustomSection {
    pub fn new(name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = ByteBuffer::with_capacity(self.name.len() + self.payload.len() + 5);
        buf.write_name(&self.name)?;
        buf.write_bytes(&self.payload);
        Ok(buf.into_bytes())
    }
}
