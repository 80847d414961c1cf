//! Collaborator-facing entry point for assembling a module.
//!
//! [`SectionRegistry`] routes each logical construct to the section that
//! encodes it and keeps the module's index spaces consistent: imported
//! entities take the low indices of their kind, locally defined ones follow.
//!
//! ```
//! use wasm_emit::registry::SectionRegistry;
//! use wasm_emit::section::FunctionBody;
//! use wasm_emit::types::{FunctionType, ValueType};
//!
//! let mut registry = SectionRegistry::new();
//! let answer = registry.add_function(
//!     FunctionType::new(&[], &[ValueType::I32]),
//!     FunctionBody::new(Vec::new(), vec![0x41, 0x2a, 0x0b]),
//! );
//! registry.export_function("answer", answer).unwrap();
//! let bytes = registry.encode().unwrap();
//! assert_eq!(&bytes[0..4], b"\0asm");
//! ```

use log::trace;

use crate::builder::{BuilderOptions, ModuleBuilder};
use crate::error::EncodeError;
use crate::section::{
    CodeSection, CustomSection, DataCountSection, DataSection, DataSegment, ElementSection, ElementSegment,
    ExportKind, ExportSection, FunctionBody, FunctionSection, GlobalSection, ImportDesc, ImportSection,
    MemorySection, Section, StartSection, TableSection, TypeSection,
};
use crate::types::{ConstExpr, FunctionType, GlobalType, Limits, TableType};

#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    types: TypeSection,
    imports: ImportSection,
    functions: FunctionSection,
    tables: TableSection,
    memories: MemorySection,
    globals: GlobalSection,
    exports: ExportSection,
    start: StartSection,
    elements: ElementSection,
    code: CodeSection,
    data: DataSection,
    customs: Vec<CustomSection>,
    data_count: bool,

    imported_functions: u32,
    imported_tables: u32,
    imported_memories: u32,
    imported_globals: u32,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `ty` in the type section, adding it if needed.
    pub fn intern_type(&mut self, ty: FunctionType) -> u32 {
        if let Some(idx) = self.types.position(&ty) {
            return idx;
        }
        trace!("type {} assigned index {}", ty, self.types.len());
        self.types.add(ty)
    }

    // -- Imports --

    fn check_import(&self, kind: &str, defined: usize) -> Result<(), EncodeError> {
        if defined > 0 {
            return Err(EncodeError::InvalidState(format!(
                "cannot import a {kind} after {defined} local {kind}(s) were defined"
            )));
        }
        Ok(())
    }

    pub fn import_function(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        ty: FunctionType,
    ) -> Result<u32, EncodeError> {
        self.check_import("function", self.functions.len())?;
        let type_idx = self.intern_type(ty);
        self.imports.add(module, name, ImportDesc::Function(type_idx));
        self.imported_functions += 1;
        Ok(self.imported_functions - 1)
    }

    pub fn import_table(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        table: TableType,
    ) -> Result<u32, EncodeError> {
        self.check_import("table", self.tables.len())?;
        self.imports.add(module, name, ImportDesc::Table(table));
        self.imported_tables += 1;
        Ok(self.imported_tables - 1)
    }

    pub fn import_memory(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        limits: Limits,
    ) -> Result<u32, EncodeError> {
        self.check_import("memory", self.memories.len())?;
        self.imports.add(module, name, ImportDesc::Memory(limits));
        self.imported_memories += 1;
        Ok(self.imported_memories - 1)
    }

    pub fn import_global(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        global_type: GlobalType,
    ) -> Result<u32, EncodeError> {
        self.check_import("global", self.globals.len())?;
        self.imports.add(module, name, ImportDesc::Global(global_type));
        self.imported_globals += 1;
        Ok(self.imported_globals - 1)
    }

    // -- Definitions --

    /// Defines a function: its signature goes to the type section, its type
    /// index to the function section and its body to the code section.
    /// Returns the function index.
    pub fn add_function(&mut self, ty: FunctionType, body: FunctionBody) -> u32 {
        let type_idx = self.intern_type(ty);
        let local_idx = self.functions.add(type_idx);
        self.code.add(body);
        let idx = self.imported_functions + local_idx;
        trace!("function {} has type {}", idx, type_idx);
        idx
    }

    pub fn add_table(&mut self, table: TableType) -> u32 {
        self.imported_tables + self.tables.add(table)
    }

    pub fn add_memory(&mut self, limits: Limits) -> u32 {
        self.imported_memories + self.memories.add(limits)
    }

    pub fn add_global(&mut self, global_type: GlobalType, init: ConstExpr) -> u32 {
        self.imported_globals + self.globals.add(global_type, init)
    }

    pub fn add_element(&mut self, segment: ElementSegment) -> u32 {
        self.elements.add(segment)
    }

    pub fn add_data(&mut self, segment: DataSegment) -> u32 {
        self.data.add(segment)
    }

    pub fn add_custom(&mut self, name: impl Into<String>, payload: impl Into<Vec<u8>>) {
        self.customs.push(CustomSection::new(name, payload));
    }

    // -- Exports and start --

    /// Exports an entity. Export names must be unique within a module.
    pub fn export(&mut self, name: impl Into<String>, kind: ExportKind) -> Result<(), EncodeError> {
        let name = name.into();
        if self.exports.contains(&name) {
            return Err(EncodeError::InvalidState(format!("duplicate export name {name:?}")));
        }
        self.exports.add(name, kind);
        Ok(())
    }

    pub fn export_function(&mut self, name: impl Into<String>, function_index: u32) -> Result<(), EncodeError> {
        self.export(name, ExportKind::Function(function_index))
    }

    pub fn set_start(&mut self, function_index: u32) {
        self.start = StartSection::new(function_index);
    }

    /// Emit a DataCount section. Needed when function bodies use
    /// `memory.init` or `data.drop`, which the registry cannot see inside
    /// opaque instruction bytes.
    pub fn require_data_count(&mut self) {
        self.data_count = true;
    }

    // -- Index space sizes --

    pub fn function_count(&self) -> u32 {
        self.imported_functions + self.functions.len() as u32
    }

    pub fn table_count(&self) -> u32 {
        self.imported_tables + self.tables.len() as u32
    }

    pub fn memory_count(&self) -> u32 {
        self.imported_memories + self.memories.len() as u32
    }

    pub fn global_count(&self) -> u32 {
        self.imported_globals + self.globals.len() as u32
    }

    pub fn type_count(&self) -> u32 {
        self.types.len() as u32
    }

    // -- Output --

    /// Hands every section to a builder in wire order, custom sections last.
    pub fn into_builder(self, options: BuilderOptions) -> Result<ModuleBuilder, EncodeError> {
        let data_count = if self.data_count {
            DataCountSection::new(self.data.len() as u32)
        } else {
            DataCountSection::default()
        };

        let sections: Vec<Section> = vec![
            self.types.into(),
            self.imports.into(),
            self.functions.into(),
            self.tables.into(),
            self.memories.into(),
            self.globals.into(),
            self.exports.into(),
            self.start.into(),
            self.elements.into(),
            data_count.into(),
            self.code.into(),
            self.data.into(),
        ];

        let mut builder = ModuleBuilder::with_options(options);
        for section in sections.into_iter().chain(self.customs.into_iter().map(Section::from)) {
            builder.add_section(section)?;
        }
        Ok(builder)
    }

    /// Encodes the registered module with default options.
    pub fn encode(self) -> Result<Vec<u8>, EncodeError> {
        self.into_builder(BuilderOptions::default())?.build()
    }
}
