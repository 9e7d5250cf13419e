//! 字段类型与比较值
//!
//! - FieldKind：字段的值类型（领域字段与存储列共用）
//! - Value：过滤条件中的字面量，以及内存存储读取行字段时的统一表示

use std::cmp::Ordering;
use uuid::Uuid;

/// 字段值类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    I64,
    F64,
    Bool,
    Uuid,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::I64 => "i64",
            FieldKind::F64 => "f64",
            FieldKind::Bool => "bool",
            FieldKind::Uuid => "uuid",
        }
    }
}

/// 过滤字面量 / 行字段值。
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Uuid(Uuid),
}

impl Value {
    /// 值对应的字段类型（Null 返回 None）。
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Value::Null => None,
            Value::String(_) => Some(FieldKind::String),
            Value::I64(_) => Some(FieldKind::I64),
            Value::F64(_) => Some(FieldKind::F64),
            Value::Bool(_) => Some(FieldKind::Bool),
            Value::Uuid(_) => Some(FieldKind::Uuid),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// 值能否用于指定类型的列。
    ///
    /// 整数字面量允许比较浮点列。
    pub fn fits(&self, kind: FieldKind) -> bool {
        match (self.kind(), kind) {
            (None, _) => true,
            (Some(FieldKind::I64), FieldKind::F64) => true,
            (Some(own), kind) => own == kind,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

/// 同类值比较；任一侧为 Null 或类型不兼容时返回 None。
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::I64(a), Value::I64(b)) => Some(a.cmp(b)),
        (Value::F64(a), Value::F64(b)) => a.partial_cmp(b),
        (Value::I64(a), Value::F64(b)) => (*a as f64).partial_cmp(b),
        (Value::F64(a), Value::I64(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
