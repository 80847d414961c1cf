//! Error types for module encoding.

use std::fmt;

use thiserror::Error;

use crate::section::SectionId;

/// The reason a LEB128 sequence was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintFault {
    /// The input ended before a byte without the continuation bit.
    Truncated,
    /// More bytes than the declared width permits.
    Overlong,
    /// The final byte carries bits outside the declared width.
    Overflow,
}

impl fmt::Display for VarintFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VarintFault::Truncated => "unexpected end",
            VarintFault::Overlong => "integer representation too long",
            VarintFault::Overflow => "integer too large",
        })
    }
}

/// Errors that can occur while assembling or serialising a module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("malformed varint at offset {offset}: {fault}")]
    MalformedVarint { offset: usize, fault: VarintFault },

    #[error("duplicate {0} section")]
    DuplicateSection(SectionId),

    #[error("{section} section cannot follow {previous} section")]
    InvalidSectionOrder { previous: SectionId, section: SectionId },

    #[error("length {len} does not fit a u32 length prefix")]
    PayloadTooLarge { len: usize },

    #[error("invalid state: {0}")]
    InvalidState(String),
}
