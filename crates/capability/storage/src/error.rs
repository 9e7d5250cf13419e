//! 存储层错误类型
//!
//! 统一封装底层错误，并按调用方需要区分的情况分类：
//! - Internal：SQL 执行、连接、锁等内部错误
//! - Conflict：唯一约束冲突（资产编号、名称、用户名重复）
//! - InvalidInput：查询参数或写入数据不合法（含引用不存在的记录）
//! - Cancelled：调用方放弃了查询

use fam_query::{MappingError, QueryError};

/// 存储错误分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Internal,
    Conflict,
    InvalidInput,
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StorageError {
    kind: StorageErrorKind,
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Internal,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Conflict,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::conflict(format!(
                    "duplicate value violates {}",
                    db.constraint().unwrap_or("unique constraint")
                ));
            }
            if db.is_foreign_key_violation() {
                return Self::invalid_input(format!(
                    "referenced record not found ({})",
                    db.constraint().unwrap_or("foreign key")
                ));
            }
        }
        Self::new(err.to_string())
    }
}

impl From<MappingError> for StorageError {
    fn from(err: MappingError) -> Self {
        Self::new(format!("field mapping: {err}"))
    }
}

impl From<QueryError> for StorageError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidPage { .. }
            | QueryError::Translation(_)
            | QueryError::UnknownInclude(_) => Self::invalid_input(err.to_string()),
            QueryError::Cancelled => Self {
                kind: StorageErrorKind::Cancelled,
                message: err.to_string(),
            },
            QueryError::Storage(source) => match source.downcast::<StorageError>() {
                Ok(storage) => *storage,
                Err(other) => Self::new(other.to_string()),
            },
        }
    }
}
