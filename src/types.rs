//! Logical types shared by the section encoders.

use std::fmt;

use crate::buffer::ByteBuffer;
use crate::encoding::{
    LIMITS_MIN, LIMITS_MIN_MAX, OP_END, OP_F32_CONST, OP_F64_CONST, OP_GLOBAL_GET, OP_I32_CONST, OP_I64_CONST,
    OP_REF_FUNC, OP_REF_NULL, TYPE_FUNC,
};
use crate::error::EncodeError;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ValueType {
    // Number types
    I32,
    I64,
    F32,
    F64,
    // Vector types
    V128,
    // Reference types
    FuncRef,
    ExternRef,
}

impl ValueType {
    pub fn wire_byte(&self) -> u8 {
        match self {
            ValueType::I32 => 0x7f,
            ValueType::I64 => 0x7e,
            ValueType::F32 => 0x7d,
            ValueType::F64 => 0x7c,
            ValueType::V128 => 0x7b,
            ValueType::FuncRef => 0x70,
            ValueType::ExternRef => 0x6f,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::V128 => "v128",
            ValueType::FuncRef => "funcref",
            ValueType::ExternRef => "externref",
        })
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum RefType {
    FuncRef,
    ExternRef,
}

impl RefType {
    pub fn wire_byte(&self) -> u8 {
        ValueType::from(*self).wire_byte()
    }
}

impl From<RefType> for ValueType {
    fn from(rt: RefType) -> Self {
        match rt {
            RefType::FuncRef => ValueType::FuncRef,
            RefType::ExternRef => ValueType::ExternRef,
        }
    }
}

/// Size bounds of a memory (in pages) or table (in elements).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Limits {
    pub min: u32,
    pub max: Option<u32>,
}

impl Limits {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// ```text
    /// limits ::= 0x00 min:u32 | 0x01 min:u32 max:u32
    /// ```
    pub fn encode(&self, buf: &mut ByteBuffer) {
        match self.max {
            Some(max) => {
                buf.write_byte(LIMITS_MIN_MAX);
                buf.write_vu32(self.min);
                buf.write_vu32(max);
            }
            None => {
                buf.write_byte(LIMITS_MIN);
                buf.write_vu32(self.min);
            }
        }
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "min = {}, max = {}", self.min, max),
            None => write!(f, "min = {}", self.min),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TableType {
    pub ref_type: RefType,
    pub limits: Limits,
}

impl TableType {
    pub fn encode(&self, buf: &mut ByteBuffer) {
        buf.write_byte(self.ref_type.wire_byte());
        self.limits.encode(buf);
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct GlobalType {
    pub value_type: ValueType,
    pub mutable: bool,
}

impl GlobalType {
    pub fn encode(&self, buf: &mut ByteBuffer) {
        buf.write_byte(self.value_type.wire_byte());
        buf.write_bool(self.mutable);
    }
}

impl fmt::Display for GlobalType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", if self.mutable { "var" } else { "const" }, self.value_type)
    }
}

/// A function signature.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default)]
pub struct FunctionType {
    pub params: Vec<ValueType>,
    pub results: Vec<ValueType>,
}

impl FunctionType {
    pub fn new(params: &[ValueType], results: &[ValueType]) -> Self {
        Self {
            params: params.to_vec(),
            results: results.to_vec(),
        }
    }

    /// ```text
    /// functype ::= 0x60 vec(valtype) vec(valtype)
    /// ```
    pub fn encode(&self, buf: &mut ByteBuffer) -> Result<(), EncodeError> {
        buf.write_byte(TYPE_FUNC);
        write_value_types(buf, &self.params)?;
        write_value_types(buf, &self.results)
    }
}

fn write_value_types(buf: &mut ByteBuffer, types: &[ValueType]) -> Result<(), EncodeError> {
    buf.write_count(types.len())?;
    for ty in types {
        buf.write_byte(ty.wire_byte());
    }
    Ok(())
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let join = |types: &[ValueType]| types.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        write!(f, "({}) -> ({})", join(&self.params), join(&self.results))
    }
}

/// A constant expression, as used for global initialisers and segment offsets.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ConstExpr {
    I32Const(i32),
    I64Const(i64),
    F32Const(f32),
    F64Const(f64),
    GlobalGet(u32),
    RefNull(RefType),
    RefFunc(u32),
}

impl ConstExpr {
    /// Writes the instruction followed by the `end` marker.
    pub fn encode(&self, buf: &mut ByteBuffer) {
        match *self {
            ConstExpr::I32Const(v) => {
                buf.write_byte(OP_I32_CONST);
                buf.write_vs32(v);
            }
            ConstExpr::I64Const(v) => {
                buf.write_byte(OP_I64_CONST);
                buf.write_vs64(v);
            }
            ConstExpr::F32Const(v) => {
                buf.write_byte(OP_F32_CONST);
                buf.write_f32(v);
            }
            ConstExpr::F64Const(v) => {
                buf.write_byte(OP_F64_CONST);
                buf.write_f64(v);
            }
            ConstExpr::GlobalGet(idx) => {
                buf.write_byte(OP_GLOBAL_GET);
                buf.write_vu32(idx);
            }
            ConstExpr::RefNull(rt) => {
                buf.write_byte(OP_REF_NULL);
                buf.write_byte(rt.wire_byte());
            }
            ConstExpr::RefFunc(idx) => {
                buf.write_byte(OP_REF_FUNC);
                buf.write_vu32(idx);
            }
        }
        buf.write_byte(OP_END);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(f: impl FnOnce(&mut ByteBuffer)) -> Vec<u8> {
        let mut buf = ByteBuffer::new();
        f(&mut buf);
        buf.into_bytes()
    }

    #[test]
    fn limits() {
        assert_eq!(encoded(|b| Limits::new(1, None).encode(b)), vec![0x00, 0x01]);
        assert_eq!(encoded(|b| Limits::new(1, Some(300)).encode(b)), vec![0x01, 0x01, 0xac, 0x02]);
    }

    #[test]
    fn function_type() {
        let ty = FunctionType::new(&[ValueType::I32, ValueType::I64], &[ValueType::F64]);
        assert_eq!(
            encoded(|b| ty.encode(b).unwrap()),
            vec![0x60, 0x02, 0x7f, 0x7e, 0x01, 0x7c]
        );
        assert_eq!(ty.to_string(), "(i32, i64) -> (f64)");
        assert_eq!(encoded(|b| FunctionType::default().encode(b).unwrap()), vec![0x60, 0x00, 0x00]);
    }

    #[test]
    fn table_and_global_types() {
        let table = TableType {
            ref_type: RefType::ExternRef,
            limits: Limits::new(0, Some(4)),
        };
        assert_eq!(encoded(|b| table.encode(b)), vec![0x6f, 0x01, 0x00, 0x04]);

        let global = GlobalType {
            value_type: ValueType::I64,
            mutable: true,
        };
        assert_eq!(encoded(|b| global.encode(b)), vec![0x7e, 0x01]);
        assert_eq!(global.to_string(), "var i64");
    }

    #[test]
    fn const_exprs() {
        assert_eq!(encoded(|b| ConstExpr::I32Const(-1).encode(b)), vec![0x41, 0x7f, 0x0b]);
        assert_eq!(encoded(|b| ConstExpr::I64Const(128).encode(b)), vec![0x42, 0x80, 0x01, 0x0b]);
        assert_eq!(
            encoded(|b| ConstExpr::F32Const(6.283_185_5).encode(b)),
            vec![0x43, 219, 15, 201, 64, 0x0b]
        );
        assert_eq!(
            encoded(|b| ConstExpr::F64Const(std::f64::consts::TAU).encode(b)),
            vec![0x44, 24, 45, 68, 84, 251, 33, 25, 64, 0x0b]
        );
        assert_eq!(encoded(|b| ConstExpr::GlobalGet(2).encode(b)), vec![0x23, 0x02, 0x0b]);
        assert_eq!(
            encoded(|b| ConstExpr::RefNull(RefType::FuncRef).encode(b)),
            vec![0xd0, 0x70, 0x0b]
        );
        assert_eq!(encoded(|b| ConstExpr::RefFunc(3).encode(b)), vec![0xd2, 0x03, 0x0b]);
    }
}
