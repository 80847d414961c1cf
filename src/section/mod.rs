//! Module sections.
//!
//! Each standard section kind has its own payload type in a submodule. The
//! closed set of kinds is gathered into the [`Section`] sum type, which the
//! [`crate::builder::ModuleBuilder`] frames as:
//!
//! ```text
//! section_id: u8 | byte_length: vu32 | contents: byte*
//! ```
//!
//! A section with nothing to declare renders to zero bytes and is left out of
//! the module entirely.

use std::fmt;

use crate::buffer::ByteBuffer;
use crate::encoding::{
    SECTION_CODE, SECTION_CUSTOM, SECTION_DATA, SECTION_DATA_COUNT, SECTION_ELEMENT, SECTION_EXPORT,
    SECTION_FUNCTION, SECTION_GLOBAL, SECTION_IMPORT, SECTION_MEMORY, SECTION_START, SECTION_TABLE, SECTION_TYPE,
};
use crate::error::EncodeError;

pub mod code;
pub mod custom;
pub mod data;
pub mod data_count;
pub mod elements;
pub mod exports;
pub mod functions;
pub mod globals;
pub mod imports;
pub mod memories;
pub mod start;
pub mod tables;
pub mod types;

pub use code::{CodeSection, FunctionBody};
pub use custom::CustomSection;
pub use data::{DataMode, DataSection, DataSegment};
pub use data_count::DataCountSection;
pub use elements::{ElementItems, ElementMode, ElementSection, ElementSegment};
pub use exports::{Export, ExportKind, ExportSection};
pub use functions::FunctionSection;
pub use globals::{Global, GlobalSection};
pub use imports::{Import, ImportDesc, ImportSection};
pub use memories::MemorySection;
pub use start::StartSection;
pub use tables::TableSection;
pub use types::TypeSection;

/// Section identifiers (§5.5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Custom,
    Type,
    Import,
    Function,
    Table,
    Memory,
    Global,
    Export,
    Start,
    Element,
    Code,
    Data,
    DataCount,
}

impl SectionId {
    pub fn byte(self) -> u8 {
        match self {
            SectionId::Custom => SECTION_CUSTOM,
            SectionId::Type => SECTION_TYPE,
            SectionId::Import => SECTION_IMPORT,
            SectionId::Function => SECTION_FUNCTION,
            SectionId::Table => SECTION_TABLE,
            SectionId::Memory => SECTION_MEMORY,
            SectionId::Global => SECTION_GLOBAL,
            SectionId::Export => SECTION_EXPORT,
            SectionId::Start => SECTION_START,
            SectionId::Element => SECTION_ELEMENT,
            SectionId::Code => SECTION_CODE,
            SectionId::Data => SECTION_DATA,
            SectionId::DataCount => SECTION_DATA_COUNT,
        }
    }

    pub fn from_byte(byte: u8) -> Option<SectionId> {
        Some(match byte {
            SECTION_CUSTOM => SectionId::Custom,
            SECTION_TYPE => SectionId::Type,
            SECTION_IMPORT => SectionId::Import,
            SECTION_FUNCTION => SectionId::Function,
            SECTION_TABLE => SectionId::Table,
            SECTION_MEMORY => SectionId::Memory,
            SECTION_GLOBAL => SectionId::Global,
            SECTION_EXPORT => SectionId::Export,
            SECTION_START => SectionId::Start,
            SECTION_ELEMENT => SectionId::Element,
            SECTION_CODE => SectionId::Code,
            SECTION_DATA => SectionId::Data,
            SECTION_DATA_COUNT => SectionId::DataCount,
            _ => return None,
        })
    }

    /// Position of a standard section in a module. DataCount was added after
    /// the original ids were assigned and sits between Element and Code, so
    /// this differs from the id byte. Custom sections have no fixed position.
    pub fn wire_rank(self) -> Option<u8> {
        match self {
            SectionId::Custom => None,
            SectionId::Type => Some(1),
            SectionId::Import => Some(2),
            SectionId::Function => Some(3),
            SectionId::Table => Some(4),
            SectionId::Memory => Some(5),
            SectionId::Global => Some(6),
            SectionId::Export => Some(7),
            SectionId::Start => Some(8),
            SectionId::Element => Some(9),
            SectionId::DataCount => Some(10),
            SectionId::Code => Some(11),
            SectionId::Data => Some(12),
        }
    }

    pub fn is_custom(self) -> bool {
        self == SectionId::Custom
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionId::Custom => "custom",
            SectionId::Type => "type",
            SectionId::Import => "import",
            SectionId::Function => "function",
            SectionId::Table => "table",
            SectionId::Memory => "memory",
            SectionId::Global => "global",
            SectionId::Export => "export",
            SectionId::Start => "start",
            SectionId::Element => "element",
            SectionId::Code => "code",
            SectionId::Data => "data",
            SectionId::DataCount => "data count",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One section of a module, carrying its own typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Type(TypeSection),
    Import(ImportSection),
    Function(FunctionSection),
    Table(TableSection),
    Memory(MemorySection),
    Global(GlobalSection),
    Export(ExportSection),
    Start(StartSection),
    Element(ElementSection),
    DataCount(DataCountSection),
    Code(CodeSection),
    Data(DataSection),
    Custom(CustomSection),
}

impl Section {
    pub fn id(&self) -> SectionId {
        match self {
            Section::Type(_) => SectionId::Type,
            Section::Import(_) => SectionId::Import,
            Section::Function(_) => SectionId::Function,
            Section::Table(_) => SectionId::Table,
            Section::Memory(_) => SectionId::Memory,
            Section::Global(_) => SectionId::Global,
            Section::Export(_) => SectionId::Export,
            Section::Start(_) => SectionId::Start,
            Section::Element(_) => SectionId::Element,
            Section::DataCount(_) => SectionId::DataCount,
            Section::Code(_) => SectionId::Code,
            Section::Data(_) => SectionId::Data,
            Section::Custom(_) => SectionId::Custom,
        }
    }

    /// Renders the section payload, excluding the id byte and length prefix.
    ///
    /// Returns an empty vector when the section declares nothing.
    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Section::Type(s) => s.render(),
            Section::Import(s) => s.render(),
            Section::Function(s) => s.render(),
            Section::Table(s) => s.render(),
            Section::Memory(s) => s.render(),
            Section::Global(s) => s.render(),
            Section::Export(s) => s.render(),
            Section::Start(s) => s.render(),
            Section::Element(s) => s.render(),
            Section::DataCount(s) => s.render(),
            Section::Code(s) => s.render(),
            Section::Data(s) => s.render(),
            Section::Custom(s) => s.render(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Section::Type(s) => s.is_empty(),
            Section::Import(s) => s.is_empty(),
            Section::Function(s) => s.is_empty(),
            Section::Table(s) => s.is_empty(),
            Section::Memory(s) => s.is_empty(),
            Section::Global(s) => s.is_empty(),
            Section::Export(s) => s.is_empty(),
            Section::Start(s) => s.is_empty(),
            Section::Element(s) => s.is_empty(),
            Section::DataCount(s) => s.is_empty(),
            Section::Code(s) => s.is_empty(),
            Section::Data(s) => s.is_empty(),
            Section::Custom(_) => false,
        }
    }
}

macro_rules! impl_from_section {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Section {
                fn from(section: $ty) -> Self {
                    Section::$variant(section)
                }
            }
        )*
    };
}

impl_from_section!(
    Type(TypeSection),
    Import(ImportSection),
    Function(FunctionSection),
    Table(TableSection),
    Memory(MemorySection),
    Global(GlobalSection),
    Export(ExportSection),
    Start(StartSection),
    Element(ElementSection),
    DataCount(DataCountSection),
    Code(CodeSection),
    Data(DataSection),
    Custom(CustomSection),
);

/// Renders `vec(entry)`, or nothing at all when there are no entries.
pub(crate) fn render_entries<T>(
    entries: &[T],
    mut encode: impl FnMut(&T, &mut ByteBuffer) -> Result<(), EncodeError>,
) -> Result<Vec<u8>, EncodeError> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let mut buf = ByteBuffer::new();
    buf.write_count(entries.len())?;
    for entry in entries {
        encode(entry, &mut buf)?;
    }
    Ok(buf.into_bytes())
}
