//! Type section (id 1): function signatures.
//!
//! ```text
//! typesec  ::= section_1(vec(functype))
//! functype ::= 0x60 vec(valtype) vec(valtype)
//! ```

use crate::error::EncodeError;
use crate::types::FunctionType;

use super::render_entries;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeSection {
    types: Vec<FunctionType>,
}

impl TypeSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a signature and returns its type index.
    pub fn add(&mut self, ty: FunctionType) -> u32 {
        self.types.push(ty);
        (self.types.len() - 1) as u32
    }

    /// Index of the first signature equal to `ty`, if any.
    pub fn position(&self, ty: &FunctionType) -> Option<u32> {
        self.types.iter().position(|t| t == ty).map(|i| i as u32)
    }

    pub fn get(&self, index: u32) -> Option<&FunctionType> {
        self.types.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.types, |ty, buf| ty.encode(buf))
    }
}
