//! 稳定的 DTO 与 API 响应契约。
//!
//! 所有字段对外使用 camelCase；ID 以字符串形式传输，时间为 epoch 毫秒。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 分页结果。
///
/// `total` 为全部匹配条数，与当前页条数无关。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

/// 通用列表查询参数（制造商、角色）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    #[serde(alias = "page_size")]
    pub page_size: Option<u32>,
    /// 排序串，例如 `name,-createdAt`
    pub sort: Option<String>,
    /// 名称包含（区分大小写）
    pub search: Option<String>,
}

/// 资产列表查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListQuery {
    pub page: Option<u32>,
    #[serde(alias = "page_size")]
    pub page_size: Option<u32>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub location_id: Option<String>,
    pub supplier_id: Option<String>,
    pub manufacturer_id: Option<String>,
    /// 逗号分隔的预加载关联：`supplier`、`location`
    pub include: Option<String>,
}

/// 供应商列表查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierListQuery {
    pub page: Option<u32>,
    #[serde(alias = "page_size")]
    pub page_size: Option<u32>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub active: Option<bool>,
}

/// 位置列表查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationListQuery {
    pub page: Option<u32>,
    #[serde(alias = "page_size")]
    pub page_size: Option<u32>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub parent_id: Option<String>,
}

/// 用户列表查询参数（`search` 匹配用户名）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub page: Option<u32>,
    #[serde(alias = "page_size")]
    pub page_size: Option<u32>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub active: Option<bool>,
    pub role_id: Option<String>,
}

/// 资产返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    pub id: String,
    pub name: String,
    pub asset_tag: String,
    pub serial_number: Option<String>,
    pub status: String,
    pub purchase_cost: Option<f64>,
    pub purchase_date: Option<i64>,
    pub supplier_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub location_id: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
}

/// 资产创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub name: String,
    pub asset_tag: String,
    pub serial_number: Option<String>,
    pub status: Option<String>,
    pub purchase_cost: Option<f64>,
    pub purchase_date: Option<i64>,
    pub supplier_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub location_id: Option<String>,
    pub assigned_to: Option<String>,
}

/// 资产更新请求体（未提供的字段保持不变）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<String>,
    pub purchase_cost: Option<f64>,
    pub supplier_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub location_id: Option<String>,
    pub assigned_to: Option<String>,
}

/// 供应商返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub id: String,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// 供应商创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierRequest {
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// 制造商返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerDto {
    pub id: String,
    pub name: String,
    pub website: Option<String>,
    pub created_at: i64,
}

/// 制造商创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateManufacturerRequest {
    pub name: String,
    pub website: Option<String>,
}

/// 位置返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub parent_id: Option<String>,
    pub created_at: i64,
}

/// 位置创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    pub name: String,
    pub address: Option<String>,
    pub parent_id: Option<String>,
}

/// 用户返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub role_id: Option<String>,
    pub created_at: i64,
}

/// 角色返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub rank: i64,
    pub created_at: i64,
}

/// 查询计数快照。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub paged_queries: u64,
    pub translation_failures: u64,
    pub skipped_sort_fields: u64,
    pub default_orderings: u64,
    pub cancelled_queries: u64,
}
