//! Table section (id 4).
//!
//! ```text
//! tablesec  ::= section_4(vec(table))
//! tabletype ::= reftype limits
//! ```

use crate::error::EncodeError;
use crate::types::TableType;

use super::render_entries;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSection {
    tables: Vec<TableType>,
}

impl TableSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, table: TableType) -> u32 {
        self.tables.push(table);
        (self.tables.len() - 1) as u32
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.tables, |table, buf| {
            table.encode(buf);
            Ok(())
        })
    }
}
