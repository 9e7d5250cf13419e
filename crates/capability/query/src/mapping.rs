//! 存储实体描述与领域字段映射表
//!
//! - Column：存储实体的一个成员（成员名、物理列名、类型、是否允许排序）
//! - StorageEntity：存储实体（表名、成员列表、默认排序、软删除列）
//! - FieldMap：领域字段 → 存储列的映射表，每对实体注册时构建一次
//!
//! 映射在启动时按成员名（忽略大小写）匹配并校验类型一致；
//! 只存在于领域侧的字段记录为未映射，被过滤条件引用时翻译失败。

use crate::error::{MappingError, TranslationError};
use crate::filter::DomainField;
use crate::sort::{SortDir, SortKey};
use crate::value::{FieldKind, Value};
use std::collections::HashMap;
use std::marker::PhantomData;

/// 存储实体成员。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    /// 成员名（camelCase）
    pub member: &'static str,
    /// 物理列名
    pub column: &'static str,
    pub kind: FieldKind,
    /// 是否在排序白名单内
    pub sortable: bool,
}

impl Column {
    pub const fn new(member: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            member,
            column,
            kind,
            sortable: false,
        }
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn asc(self) -> SortKey {
        SortKey {
            column: self,
            dir: SortDir::Asc,
        }
    }

    pub const fn desc(self) -> SortKey {
        SortKey {
            column: self,
            dir: SortDir::Desc,
        }
    }
}

/// 存储实体：持久化层的一行。
pub trait StorageEntity: Clone + Send + Sync + 'static {
    /// 表名
    const TABLE: &'static str;

    /// 全部成员
    fn columns() -> &'static [Column];

    /// 主键列（排序的最终决胜键）
    fn id_column() -> Column;

    /// 未指定有效排序时使用的默认排序
    fn default_order() -> &'static [SortKey];

    /// 软删除标记列，标记为 true 的行对查询不可见
    fn soft_delete_column() -> Option<Column> {
        None
    }

    /// 可预加载的关联名
    fn relations() -> &'static [&'static str] {
        &[]
    }

    /// 读取成员值（内存存储求值用）
    fn value(&self, member: &str) -> Value;

    /// 按成员名查找列（忽略大小写）
    fn find_column(name: &str) -> Option<Column> {
        Self::columns()
            .iter()
            .find(|column| column.member.eq_ignore_ascii_case(name))
            .copied()
    }
}

/// 领域字段 → 存储列映射表。
#[derive(Debug, Clone)]
pub struct FieldMap<F: DomainField, S: StorageEntity> {
    map: HashMap<F, Column>,
    unmapped: Vec<F>,
    _storage: PhantomData<fn() -> S>,
}

impl<F: DomainField, S: StorageEntity> FieldMap<F, S> {
    /// 按同名成员构建映射表
    ///
    /// 成员名忽略大小写匹配；类型不一致或多个领域字段落到同一列时返回错误。
    pub fn by_name() -> Result<Self, MappingError> {
        let mut map: HashMap<F, Column> = HashMap::new();
        let mut unmapped = Vec::new();
        for &field in F::all() {
            let Some(column) = S::find_column(field.name()) else {
                unmapped.push(field);
                continue;
            };
            if column.kind != field.kind() {
                return Err(MappingError::KindMismatch {
                    entity: F::ENTITY,
                    member: field.name(),
                    domain: field.kind(),
                    storage: column.kind,
                });
            }
            if let Some((other, _)) = map.iter().find(|(_, mapped)| mapped.column == column.column)
            {
                return Err(MappingError::DuplicateColumn {
                    entity: F::ENTITY,
                    column: column.column,
                    first: other.name(),
                    second: field.name(),
                });
            }
            map.insert(field, column);
        }
        for field in &unmapped {
            tracing::warn!(
                entity = F::ENTITY,
                table = S::TABLE,
                member = field.name(),
                "domain member has no storage counterpart; filters on it will be rejected"
            );
        }
        Ok(Self {
            map,
            unmapped,
            _storage: PhantomData,
        })
    }

    /// 解析领域字段对应的存储列
    pub fn resolve(&self, field: F) -> Result<Column, TranslationError> {
        self.map
            .get(&field)
            .copied()
            .ok_or(TranslationError::MissingMember {
                entity: F::ENTITY,
                member: field.name(),
            })
    }

    /// 没有存储对应成员的领域字段
    pub fn unmapped(&self) -> &[F] {
        &self.unmapped
    }
}
