//! Module assembly: orders sections and frames them behind the preamble.
//!
//! A module binary is the magic number (`\0asm`) and version (1), followed by
//! sections, each encoded as:
//!
//! ```text
//! section_id: u8 | byte_length: vu32 | contents: byte*
//! ```
//!
//! Sections whose payload is empty are left out entirely.
//!
//! # Example
//!
//! ```
//! use wasm_emit::builder::ModuleBuilder;
//! use wasm_emit::section::{CodeSection, FunctionBody, FunctionSection, TypeSection};
//! use wasm_emit::types::{FunctionType, ValueType};
//!
//! let mut types = TypeSection::new();
//! let sig = types.add(FunctionType::new(&[], &[ValueType::I32]));
//! let mut functions = FunctionSection::new();
//! functions.add(sig);
//! let mut code = CodeSection::new();
//! code.add(FunctionBody::new(Vec::new(), vec![0x41, 0x2a, 0x0b]));
//!
//! let mut builder = ModuleBuilder::new();
//! builder.add_section(code).unwrap();
//! builder.add_section(types).unwrap();
//! builder.add_section(functions).unwrap();
//!
//! let bytes = builder.build().unwrap();
//! assert_eq!(&bytes[0..4], b"\0asm");
//! ```

use log::{debug, trace};

use crate::buffer::ByteBuffer;
use crate::encoding::{MAGIC, VERSION};
use crate::error::EncodeError;
use crate::section::{Section, SectionId};

/// Size of the magic number plus version.
pub const PREAMBLE_LEN: usize = 8;

/// How the builder treats the order in which standard sections are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionOrdering {
    /// Standard sections are emitted in wire order regardless of the order
    /// they were added in. Custom sections stay directly after the standard
    /// section that preceded them when they were added.
    #[default]
    Canonical,
    /// Standard sections must be added in wire order; anything else is
    /// rejected by [`ModuleBuilder::add_section`].
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct BuilderOptions {
    pub ordering: SectionOrdering,
}

impl BuilderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ordering(mut self, ordering: SectionOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}

/// Accumulates sections and serialises them into a module binary.
#[derive(Debug, Clone, Default)]
pub struct ModuleBuilder {
    options: BuilderOptions,
    sections: Vec<Section>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            options,
            sections: Vec::new(),
        }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Appends a section.
    ///
    /// Fails with [`EncodeError::DuplicateSection`] if a standard section of
    /// the same kind was already added, and under
    /// [`SectionOrdering::Strict`] with [`EncodeError::InvalidSectionOrder`]
    /// if the section belongs before one already added. The builder is left
    /// unchanged on failure.
    pub fn add_section(&mut self, section: impl Into<Section>) -> Result<(), EncodeError> {
        let section = section.into();
        let id = section.id();

        if let Some(rank) = id.wire_rank() {
            if self.sections.iter().any(|s| s.id() == id) {
                return Err(EncodeError::DuplicateSection(id));
            }
            if self.options.ordering == SectionOrdering::Strict {
                if let Some(previous) = self.last_standard() {
                    if previous.wire_rank() > Some(rank) {
                        return Err(EncodeError::InvalidSectionOrder { previous, section: id });
                    }
                }
            }
        }

        trace!("added {} section", id);
        self.sections.push(section);
        Ok(())
    }

    fn last_standard(&self) -> Option<SectionId> {
        self.sections.iter().rev().map(Section::id).find(|id| !id.is_custom())
    }

    /// Sections in the order they were added.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Drops all sections so the builder can assemble a fresh module.
    pub fn reset(&mut self) {
        self.sections.clear();
    }

    /// Sections in the order they will be emitted.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut ordered: Vec<&Section> = self.sections.iter().collect();
        if self.options.ordering == SectionOrdering::Canonical {
            // custom sections inherit the rank of the standard section before them
            let mut anchor = 0;
            let mut keyed: Vec<((u8, bool), &Section)> = ordered
                .into_iter()
                .map(|section| match section.id().wire_rank() {
                    Some(rank) => {
                        anchor = rank;
                        ((rank, false), section)
                    }
                    None => ((anchor, true), section),
                })
                .collect();
            keyed.sort_by_key(|(key, _)| *key);
            ordered = keyed.into_iter().map(|(_, section)| section).collect();
        }
        ordered
    }

    /// Serialises the module.
    pub fn build(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = ByteBuffer::new();
        buf.write_bytes(&MAGIC);
        buf.write_u32_le(VERSION);

        for section in self.ordered_sections() {
            let id = section.id();
            let payload = section.render()?;
            if payload.is_empty() {
                trace!("skipping empty {} section", id);
                continue;
            }
            buf.write_byte(id.byte());
            buf.write_length_prefixed(&payload)?;
            debug!("emitted {} section: {} bytes", id, payload.len());
        }

        debug!("module encoded: {} bytes", buf.len());
        Ok(buf.into_bytes())
    }
}
