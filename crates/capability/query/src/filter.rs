//! 过滤条件表达式树
//!
//! 表达式树对字段类型 `F` 泛型：
//! - 领域侧：`Expr<F>`，`F` 为实体的字段枚举（实现 `DomainField`）
//! - 存储侧：`Expr<Column>`，由 `translate` 结构化改写得到
//!
//! 树中只包含成员访问、比较和逻辑运算，不做求值。

use crate::value::{FieldKind, Value};
use std::fmt::Debug;
use std::hash::Hash;

/// 领域实体字段。
///
/// 每个领域实体提供一个字段枚举，声明可被过滤条件引用的成员。
pub trait DomainField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// 领域实体名（用于错误信息和日志）
    const ENTITY: &'static str;

    /// 成员名（camelCase，与存储实体成员按名称、忽略大小写对应）
    fn name(self) -> &'static str;

    /// 成员值类型
    fn kind(self) -> FieldKind;

    /// 全部字段
    fn all() -> &'static [Self];
}

/// 比较运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }
}

/// 文本匹配运算符（区分大小写）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Contains,
    StartsWith,
    EndsWith,
}

/// 过滤表达式。
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<F> {
    And(Box<Expr<F>>, Box<Expr<F>>),
    Or(Box<Expr<F>>, Box<Expr<F>>),
    Not(Box<Expr<F>>),
    Compare(F, CompareOp, Value),
    Text(F, TextOp, String),
    In(F, Vec<Value>),
    IsNull(F),
}

impl<F> Expr<F> {
    pub fn and(self, other: Expr<F>) -> Expr<F> {
        Expr::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expr<F>) -> Expr<F> {
        Expr::Or(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> Expr<F> {
        Expr::Not(Box::new(self))
    }

    /// 把可选条件按 AND 合并。
    pub fn all(parts: impl IntoIterator<Item = Expr<F>>) -> Option<Expr<F>> {
        parts.into_iter().reduce(Expr::and)
    }

    /// 结构化改写：逐个替换成员引用，保持树形不变。
    ///
    /// 任一成员改写失败即整体失败，不会产生残缺的表达式。
    pub fn try_map_fields<G, E>(
        &self,
        rebind: &mut impl FnMut(&F) -> Result<G, E>,
    ) -> Result<Expr<G>, E> {
        Ok(match self {
            Expr::And(left, right) => Expr::And(
                Box::new(left.try_map_fields(rebind)?),
                Box::new(right.try_map_fields(rebind)?),
            ),
            Expr::Or(left, right) => Expr::Or(
                Box::new(left.try_map_fields(rebind)?),
                Box::new(right.try_map_fields(rebind)?),
            ),
            Expr::Not(inner) => Expr::Not(Box::new(inner.try_map_fields(rebind)?)),
            Expr::Compare(field, op, value) => Expr::Compare(rebind(field)?, *op, value.clone()),
            Expr::Text(field, op, text) => Expr::Text(rebind(field)?, *op, text.clone()),
            Expr::In(field, values) => Expr::In(rebind(field)?, values.clone()),
            Expr::IsNull(field) => Expr::IsNull(rebind(field)?),
        })
    }

    /// 按出现顺序列出引用的成员。
    pub fn fields(&self) -> Vec<&F> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a F>) {
        match self {
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
            Expr::Not(inner) => inner.collect_fields(out),
            Expr::Compare(field, _, _)
            | Expr::Text(field, _, _)
            | Expr::In(field, _)
            | Expr::IsNull(field) => out.push(field),
        }
    }
}

/// 字段引用，用于构造比较表达式。
///
/// ```rust,ignore
/// let filter = field(AssetField::Name).starts_with("item-1")
///     .and(field(AssetField::Status).eq("in_use"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<F>(F);

pub fn field<F>(field: F) -> FieldRef<F> {
    FieldRef(field)
}

impl<F> FieldRef<F> {
    pub fn eq(self, value: impl Into<Value>) -> Expr<F> {
        Expr::Compare(self.0, CompareOp::Eq, value.into())
    }

    pub fn ne(self, value: impl Into<Value>) -> Expr<F> {
        Expr::Compare(self.0, CompareOp::Ne, value.into())
    }

    pub fn gt(self, value: impl Into<Value>) -> Expr<F> {
        Expr::Compare(self.0, CompareOp::Gt, value.into())
    }

    pub fn ge(self, value: impl Into<Value>) -> Expr<F> {
        Expr::Compare(self.0, CompareOp::Ge, value.into())
    }

    pub fn lt(self, value: impl Into<Value>) -> Expr<F> {
        Expr::Compare(self.0, CompareOp::Lt, value.into())
    }

    pub fn le(self, value: impl Into<Value>) -> Expr<F> {
        Expr::Compare(self.0, CompareOp::Le, value.into())
    }

    pub fn contains(self, text: impl Into<String>) -> Expr<F> {
        Expr::Text(self.0, TextOp::Contains, text.into())
    }

    pub fn starts_with(self, text: impl Into<String>) -> Expr<F> {
        Expr::Text(self.0, TextOp::StartsWith, text.into())
    }

    pub fn ends_with(self, text: impl Into<String>) -> Expr<F> {
        Expr::Text(self.0, TextOp::EndsWith, text.into())
    }

    pub fn is_in<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Expr<F> {
        Expr::In(self.0, values.into_iter().map(Into::into).collect())
    }

    pub fn is_null(self) -> Expr<F> {
        Expr::IsNull(self.0)
    }
}
