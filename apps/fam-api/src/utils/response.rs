//! HTTP 响应辅助函数和 DTO 转换
//!
//! - 错误响应：bad_request_error, not_found_error, storage_error
//! - DTO 转换：领域实体转对外结构，分页结果转 PageDto
//!
//! 所有错误返回统一的 ApiResponse 格式，HTTP 状态码与错误码一一对应。

use api_contract::{
    ApiResponse, AssetDto, LocationDto, ManufacturerDto, PageDto, RoleDto, SupplierDto, UserDto,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{Asset, Location, Manufacturer, Role, Supplier, User};
use fam_query::Page;
use fam_storage::{StorageError, StorageErrorKind};
use tracing::error;

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 存储错误响应，按错误分类选择状态码
pub fn storage_error(err: StorageError) -> Response {
    let (status, code) = match err.kind() {
        StorageErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, "INVALID.REQUEST"),
        StorageErrorKind::Conflict => (StatusCode::CONFLICT, "RESOURCE.CONFLICT"),
        StorageErrorKind::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "REQUEST.CANCELLED"),
        StorageErrorKind::Internal => {
            error!(error = %err, "storage failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL.ERROR")
        }
    };
    (
        status,
        Json(ApiResponse::<()>::error(code, err.to_string())),
    )
        .into_response()
}

/// 分页结果转 PageDto
pub fn page_to_dto<T, U>(page: Page<T>, to_dto: impl FnMut(T) -> U) -> PageDto<U> {
    let total_pages = page.total_pages();
    let page = page.map(to_dto);
    PageDto {
        items: page.items,
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages,
    }
}

fn id_to_string(id: Option<uuid::Uuid>) -> Option<String> {
    id.map(|id| id.to_string())
}

/// Asset 转 AssetDto
pub fn asset_to_dto(asset: Asset) -> AssetDto {
    AssetDto {
        id: asset.id.to_string(),
        name: asset.name,
        asset_tag: asset.asset_tag,
        serial_number: asset.serial_number,
        status: asset.status.as_str().to_string(),
        purchase_cost: asset.purchase_cost,
        purchase_date: asset.purchase_date_ms,
        supplier_id: id_to_string(asset.supplier_id),
        manufacturer_id: id_to_string(asset.manufacturer_id),
        location_id: id_to_string(asset.location_id),
        assigned_to: id_to_string(asset.assigned_to),
        created_at: asset.created_at_ms,
        supplier_name: asset.supplier_name,
        location_name: asset.location_name,
    }
}

/// Supplier 转 SupplierDto
pub fn supplier_to_dto(supplier: Supplier) -> SupplierDto {
    SupplierDto {
        id: supplier.id.to_string(),
        name: supplier.name,
        contact_email: supplier.contact_email,
        phone: supplier.phone,
        is_active: supplier.is_active,
        created_at: supplier.created_at_ms,
    }
}

/// Manufacturer 转 ManufacturerDto
pub fn manufacturer_to_dto(manufacturer: Manufacturer) -> ManufacturerDto {
    ManufacturerDto {
        id: manufacturer.id.to_string(),
        name: manufacturer.name,
        website: manufacturer.website,
        created_at: manufacturer.created_at_ms,
    }
}

/// Location 转 LocationDto
pub fn location_to_dto(location: Location) -> LocationDto {
    LocationDto {
        id: location.id.to_string(),
        name: location.name,
        address: location.address,
        parent_id: id_to_string(location.parent_id),
        created_at: location.created_at_ms,
    }
}

/// User 转 UserDto
pub fn user_to_dto(user: User) -> UserDto {
    UserDto {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        full_name: user.full_name,
        is_active: user.is_active,
        role_id: id_to_string(user.role_id),
        created_at: user.created_at_ms,
    }
}

/// Role 转 RoleDto
pub fn role_to_dto(role: Role) -> RoleDto {
    RoleDto {
        id: role.id.to_string(),
        name: role.name,
        description: role.description,
        rank: role.rank,
        created_at: role.created_at_ms,
    }
}
