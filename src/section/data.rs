//! Data section (id 11): memory initialisation segments.
//!
//! ```text
//! datasec ::= section_11(vec(data))
//! data    ::= 0x00 expr vec(byte)         (active, memory 0)
//!           | 0x01 vec(byte)              (passive)
//!           | 0x02 memidx expr vec(byte)  (active, explicit memory)
//! ```

use crate::buffer::ByteBuffer;
use crate::encoding::{DATA_ACTIVE, DATA_ACTIVE_EXPLICIT, DATA_PASSIVE};
use crate::error::EncodeError;
use crate::types::ConstExpr;

use super::render_entries;

#[derive(Debug, Clone, PartialEq)]
pub enum DataMode {
    Active { memory_index: u32, offset: ConstExpr },
    Passive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataSegment {
    pub mode: DataMode,
    pub init: Vec<u8>,
}

impl DataSegment {
    fn encode(&self, buf: &mut ByteBuffer) -> Result<(), EncodeError> {
        match &self.mode {
            DataMode::Active { memory_index, offset } => {
                if *memory_index == 0 {
                    buf.write_vu32(DATA_ACTIVE);
                } else {
                    buf.write_vu32(DATA_ACTIVE_EXPLICIT);
                    buf.write_vu32(*memory_index);
                }
                offset.encode(buf);
            }
            DataMode::Passive => buf.write_vu32(DATA_PASSIVE),
        }
        buf.write_length_prefixed(&self.init)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSection {
    segments: Vec<DataSegment>,
}

impl DataSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, segment: DataSegment) -> u32 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_modes() {
        let mut section = DataSection::new();
        section.add(DataSegment {
            mode: DataMode::Active {
                memory_index: 0,
                offset: ConstExpr::I32Const(8),
            },
            init: b"hi".to_vec(),
        });
        section.add(DataSegment {
            mode: DataMode::Passive,
            init: vec![0xff],
        });
        section.add(DataSegment {
            mode: DataMode::Active {
                memory_index: 1,
                offset: ConstExpr::GlobalGet(0),
            },
            init: Vec::new(),
        });

        #[rustfmt::skip]
        let expected = vec![
            0x03,
            0x00, 0x41, 0x08, 0x0b, 0x02, b'h', b'i',
            0x01, 0x01, 0xff,
            0x02, 0x01, 0x23, 0x00, 0x0b, 0x00,
        ];
        assert_eq!(section.render().unwrap(), expected);
    }
}
