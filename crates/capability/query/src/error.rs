//! 分页查询错误类型

use crate::value::FieldKind;

/// 领域条件翻译为存储条件失败。
///
/// 属于编程/配置错误，立即返回，不会带着残缺的条件继续查询。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    #[error("{entity}.{member} has no storage counterpart")]
    MissingMember {
        entity: &'static str,
        member: &'static str,
    },
    #[error("{entity}.{member} expects {expected}, got {got}")]
    TypeMismatch {
        entity: &'static str,
        member: &'static str,
        expected: &'static str,
        got: &'static str,
    },
    #[error("{entity}.{member}: null only supports eq/ne")]
    UnsupportedNull {
        entity: &'static str,
        member: &'static str,
    },
}

/// 映射表注册失败（启动期检查）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("{entity}.{member}: domain kind {domain:?} differs from storage kind {storage:?}")]
    KindMismatch {
        entity: &'static str,
        member: &'static str,
        domain: FieldKind,
        storage: FieldKind,
    },
    #[error("{entity}: column {column} mapped by both {first} and {second}")]
    DuplicateColumn {
        entity: &'static str,
        column: &'static str,
        first: &'static str,
        second: &'static str,
    },
}

/// 分页查询错误。
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid page: page={page}, page_size={page_size}")]
    InvalidPage { page: u32, page_size: u32 },
    #[error("filter translation failed: {0}")]
    Translation(#[from] TranslationError),
    #[error("unknown include: {0}")]
    UnknownInclude(String),
    #[error("query cancelled")]
    Cancelled,
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl QueryError {
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        QueryError::Storage(Box::new(err))
    }
}
