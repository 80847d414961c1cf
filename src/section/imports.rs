//! Import section (id 2): imported functions, tables, memories, globals.
//!
//! ```text
//! importsec  ::= section_2(vec(import))
//! import     ::= module:name name:name importdesc
//! importdesc ::= 0x00 typeidx | 0x01 tabletype | 0x02 memtype | 0x03 globaltype
//! ```

use crate::buffer::ByteBuffer;
use crate::encoding::{DESC_FUNC, DESC_GLOBAL, DESC_MEMORY, DESC_TABLE};
use crate::error::EncodeError;
use crate::types::{GlobalType, Limits, TableType};

use super::render_entries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDesc {
    Function(u32), // typeidx
    Table(TableType),
    Memory(Limits),
    Global(GlobalType),
}

impl ImportDesc {
    pub fn kind_byte(&self) -> u8 {
        match self {
            ImportDesc::Function(_) => DESC_FUNC,
            ImportDesc::Table(_) => DESC_TABLE,
            ImportDesc::Memory(_) => DESC_MEMORY,
            ImportDesc::Global(_) => DESC_GLOBAL,
        }
    }

    fn encode(&self, buf: &mut ByteBuffer) {
        buf.write_byte(self.kind_byte());
        match self {
            ImportDesc::Function(type_idx) => buf.write_vu32(*type_idx),
            ImportDesc::Table(table_type) => table_type.encode(buf),
            ImportDesc::Memory(limits) => limits.encode(buf),
            ImportDesc::Global(global_type) => global_type.encode(buf),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub module: String,
    pub name: String,
    pub desc: ImportDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportSection {
    imports: Vec<Import>,
}

impl ImportSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, module: impl Into<String>, name: impl Into<String>, desc: ImportDesc) -> u32 {
        self.imports.push(Import {
            module: module.into(),
            name: name.into(),
            desc,
        });
        (self.imports.len() - 1) as u32
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.imports, |imp, buf| {
            buf.write_name(&imp.module)?;
            buf.write_name(&imp.name)?;
            imp.desc.encode(buf);
            Ok(())
        })
    }
}
