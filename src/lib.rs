//! A WebAssembly binary module encoder.
//!
//! wasm-emit turns logical module constructs (signatures, imports, function
//! bodies, exports, data) into a byte-exact `.wasm` image. It performs no
//! semantic validation; it only guarantees that the output is well-formed at
//! the binary format level.
//!
//! # Modules
//!
//! - [`encoding`] -- LEB128 and IEEE 754 primitives plus wire constants.
//! - [`buffer`] -- [`buffer::ByteBuffer`], the growable payload accumulator.
//! - [`types`] -- Value, table, memory, global and function types; constant expressions.
//! - [`section`] -- One payload type per section kind, gathered in [`section::Section`].
//! - [`builder`] -- [`builder::ModuleBuilder`], which orders and frames sections.
//! - [`registry`] -- [`registry::SectionRegistry`], the index-space aware front door.
//!
//! # Example
//!
//! Build a module exporting `() -> i32` that returns 42:
//!
//! ```
//! use wasm_emit::registry::SectionRegistry;
//! use wasm_emit::section::FunctionBody;
//! use wasm_emit::types::{FunctionType, ValueType};
//!
//! let mut registry = SectionRegistry::new();
//! let f = registry.add_function(
//!     FunctionType::new(&[], &[ValueType::I32]),
//!     // i32.const 42; end
//!     FunctionBody::new(Vec::new(), vec![0x41, 0x2a, 0x0b]),
//! );
//! registry.export_function("answer", f).unwrap();
//!
//! let bytes = registry.encode().unwrap();
//! assert_eq!(&bytes[0..8], b"\0asm\x01\0\0\0");
//! ```
//!
//! # Format
//!
//! Targets the [WebAssembly 2.0 binary format](https://webassembly.github.io/spec/core/binary/index.html).
//! Section references such as §5.5.2 in the source point into that document.

pub mod buffer;
pub mod builder;
pub mod encoding;
pub mod error;
pub mod registry;
pub mod section;
pub mod types;

pub use builder::{BuilderOptions, ModuleBuilder, SectionOrdering};
pub use error::{EncodeError, VarintFault};
pub use registry::SectionRegistry;
pub use section::{Section, SectionId};
