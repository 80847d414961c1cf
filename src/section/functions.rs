//! Function section (id 3): type index per locally defined function.
//!
//! ```text
//! funcsec ::= section_3(vec(typeidx))
//! ```

use crate::error::EncodeError;

use super::render_entries;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionSection {
    type_indices: Vec<u32>,
}

impl FunctionSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a function with the given type index. Returns its position
    /// among the defined functions (not counting imports).
    pub fn add(&mut self, type_index: u32) -> u32 {
        self.type_indices.push(type_index);
        (self.type_indices.len() - 1) as u32
    }

    pub fn len(&self) -> usize {
        self.type_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_indices.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.type_indices, |idx, buf| {
            buf.write_vu32(*idx);
            Ok(())
        })
    }
}
