//! Global section (id 6): global declarations with init expressions.
//!
//! ```text
//! globalsec  ::= section_6(vec(global))
//! global     ::= globaltype expr
//! globaltype ::= valtype mut
//! ```

use crate::error::EncodeError;
use crate::types::{ConstExpr, GlobalType};

use super::render_entries;

#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub global_type: GlobalType,
    pub init: ConstExpr,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobalSection {
    globals: Vec<Global>,
}

impl GlobalSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, global_type: GlobalType, init: ConstExpr) -> u32 {
        self.globals.push(Global { global_type, init });
        (self.globals.len() - 1) as u32
    }

    pub fn len(&self) -> usize {
        self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.globals, |global, buf| {
            global.global_type.encode(buf);
            global.init.encode(buf);
            Ok(())
        })
    }
}
