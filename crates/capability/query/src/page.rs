//! 分页坐标与分页结果

use crate::error::QueryError;

/// 分页坐标（页码从 1 开始）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// 校验分页坐标，page 与 page_size 都必须 ≥ 1。
    pub fn new(page: u32, page_size: u32) -> Result<Self, QueryError> {
        if page < 1 || page_size < 1 {
            return Err(QueryError::InvalidPage { page, page_size });
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn take(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// 一页结果与全部匹配行数。
///
/// `total` 与页码无关，调用方不能假设 `total == items.len()`。
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size.max(1)))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
