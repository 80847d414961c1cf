//! Code section (id 10): function bodies (locals + instructions).
//!
//! ```text
//! codesec ::= section_10(vec(code))
//! code    ::= size:u32 func
//! func    ::= vec(locals) expr
//! locals  ::= n:u32 t:valtype
//! ```
//!
//! Instruction bytes are opaque here: the front-end supplies them already
//! encoded, including the terminating `end`.

use crate::buffer::ByteBuffer;
use crate::error::EncodeError;
use crate::types::ValueType;

use super::render_entries;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionBody {
    /// Local declarations as (count, type) runs.
    pub locals: Vec<(u32, ValueType)>,
    pub instructions: Vec<u8>,
}

impl FunctionBody {
    pub fn new(locals: Vec<(u32, ValueType)>, instructions: impl Into<Vec<u8>>) -> Self {
        Self {
            locals,
            instructions: instructions.into(),
        }
    }

    /// Builds a body from one type per local, merging adjacent equal types
    /// into a single run.
    pub fn with_local_types(local_types: &[ValueType], instructions: impl Into<Vec<u8>>) -> Self {
        let mut locals: Vec<(u32, ValueType)> = Vec::new();
        for ty in local_types {
            match locals.last_mut() {
                Some((count, last)) if last == ty => *count += 1,
                _ => locals.push((1, *ty)),
            }
        }
        Self::new(locals, instructions)
    }

    /// Total number of locals declared (excluding parameters).
    pub fn local_count(&self) -> u64 {
        self.locals.iter().map(|(count, _)| *count as u64).sum()
    }

    fn encode(&self, buf: &mut ByteBuffer) -> Result<(), EncodeError> {
        let mut func_buf = ByteBuffer::new();
        func_buf.write_count(self.locals.len())?;
        for (count, vt) in &self.locals {
            func_buf.write_vu32(*count);
            func_buf.write_byte(vt.wire_byte());
        }
        func_buf.write_bytes(&self.instructions);

        buf.write_length_prefixed(func_buf.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeSection {
    bodies: Vec<FunctionBody>,
}

impl CodeSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, body: FunctionBody) -> u32 {
        self.bodies.push(body);
        (self.bodies.len() - 1) as u32
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.bodies, |body, buf| body.encode(buf))
    }
}
