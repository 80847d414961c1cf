//! Memory section (id 5).
//!
//! ```text
//! memsec  ::= section_5(vec(mem))
//! memtype ::= limits
//! ```

use crate::error::EncodeError;
use crate::types::Limits;

use super::render_entries;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemorySection {
    memories: Vec<Limits>,
}

impl MemorySection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, limits: Limits) -> u32 {
        self.memories.push(limits);
        (self.memories.len() - 1) as u32
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.memories, |limits, buf| {
            limits.encode(buf);
            Ok(())
        })
    }
}
