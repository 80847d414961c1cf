//! Export section (id 7): exported items.
//!
//! ```text
//! exportsec  ::= section_7(vec(export))
//! export     ::= name exportdesc
//! exportdesc ::= 0x00 funcidx | 0x01 tableidx | 0x02 memidx | 0x03 globalidx
//! ```

use crate::encoding::{DESC_FUNC, DESC_GLOBAL, DESC_MEMORY, DESC_TABLE};
use crate::error::EncodeError;

use super::render_entries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Function(u32),
    Table(u32),
    Memory(u32),
    Global(u32),
}

impl ExportKind {
    pub fn kind_byte(&self) -> u8 {
        match self {
            ExportKind::Function(_) => DESC_FUNC,
            ExportKind::Table(_) => DESC_TABLE,
            ExportKind::Memory(_) => DESC_MEMORY,
            ExportKind::Global(_) => DESC_GLOBAL,
        }
    }

    pub fn index(&self) -> u32 {
        match *self {
            ExportKind::Function(idx)
            | ExportKind::Table(idx)
            | ExportKind::Memory(idx)
            | ExportKind::Global(idx) => idx,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub name: String,
    pub kind: ExportKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportSection {
    exports: Vec<Export>,
}

impl ExportSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, kind: ExportKind) -> u32 {
        self.exports.push(Export {
            name: name.into(),
            kind,
        });
        (self.exports.len() - 1) as u32
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exports.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.exports, |export, buf| {
            buf.write_name(&export.name)?;
            buf.write_byte(export.kind.kind_byte());
            buf.write_vu32(export.kind.index());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_kind_index() {
        let mut section = ExportSection::new();
        section.add("main", ExportKind::Function(3));
        section.add("mem", ExportKind::Memory(0));
        assert!(section.contains("mem"));
        assert!(!section.contains("memory"));

        #[rustfmt::skip]
        let expected = vec![
            0x02,
            0x04, b'm', b'a', b'i', b'n', 0x00, 0x03,
            0x03, b'm', b'e', b'm', 0x02, 0x00,
        ];
        assert_eq!(section.render().unwrap(), expected);
    }
}
