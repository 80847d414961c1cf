//! Element section (id 9): table initialisation segments.
//!
//! The leading flags value (0-7) is derived from the segment's mode and how
//! its items are encoded:
//!
//! ```text
//! elemsec ::= section_9(vec(elem))
//! bit 0 = passive or declarative
//! bit 1 = explicit table index (active) or declarative (non-active)
//! bit 2 = items are expressions rather than function indices
//! ```

use crate::buffer::ByteBuffer;
use crate::encoding::{ELEMKIND_FUNCREF, ELEM_EXPLICIT, ELEM_EXPRESSIONS, ELEM_NON_ACTIVE};
use crate::error::EncodeError;
use crate::types::{ConstExpr, RefType};

use super::render_entries;

#[derive(Debug, Clone, PartialEq)]
pub enum ElementMode {
    Active { table_index: u32, offset: ConstExpr },
    Passive,
    Declarative,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementItems {
    /// Plain function indices; the element type is always funcref.
    Functions(Vec<u32>),
    Expressions(RefType, Vec<ConstExpr>),
}

impl ElementItems {
    pub fn ref_type(&self) -> RefType {
        match self {
            ElementItems::Functions(_) => RefType::FuncRef,
            ElementItems::Expressions(rt, _) => *rt,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ElementItems::Functions(f) => f.len(),
            ElementItems::Expressions(_, e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementSegment {
    pub mode: ElementMode,
    pub items: ElementItems,
}

impl ElementSegment {
    pub fn flags(&self) -> u32 {
        let mut flags = match &self.mode {
            ElementMode::Active { table_index, .. } => {
                // the implicit form only covers funcref tables at index 0
                if *table_index != 0 || self.items.ref_type() != RefType::FuncRef {
                    ELEM_EXPLICIT
                } else {
                    0
                }
            }
            ElementMode::Passive => ELEM_NON_ACTIVE,
            ElementMode::Declarative => ELEM_NON_ACTIVE | ELEM_EXPLICIT,
        };
        if let ElementItems::Expressions(..) = self.items {
            flags |= ELEM_EXPRESSIONS;
        }
        flags
    }

    fn encode(&self, buf: &mut ByteBuffer) -> Result<(), EncodeError> {
        let flags = self.flags();
        buf.write_vu32(flags);

        if let ElementMode::Active { table_index, offset } = &self.mode {
            if flags & ELEM_EXPLICIT != 0 {
                buf.write_vu32(*table_index);
            }
            offset.encode(buf);
        }

        // elemkind / reftype is present in every form except 0 and 4
        let has_kind = flags & (ELEM_NON_ACTIVE | ELEM_EXPLICIT) != 0;

        match &self.items {
            ElementItems::Functions(indices) => {
                if has_kind {
                    buf.write_byte(ELEMKIND_FUNCREF);
                }
                buf.write_count(indices.len())?;
                for idx in indices {
                    buf.write_vu32(*idx);
                }
            }
            ElementItems::Expressions(ref_type, exprs) => {
                if has_kind {
                    buf.write_byte(ref_type.wire_byte());
                }
                buf.write_count(exprs.len())?;
                for expr in exprs {
                    expr.encode(buf);
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementSection {
    segments: Vec<ElementSegment>,
}

impl ElementSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, segment: ElementSegment) -> u32 {
        self.segments.push(segment);
        (self.segments.len() - 1) as u32
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn render(&self) -> Result<Vec<u8>, EncodeError> {
        render_entries(&self.segments, |segment, buf| segment.encode(buf))
    }
}
