//! 资产 handlers
//!
//! - GET /assets - 分页列出资产（status / locationId / supplierId / manufacturerId 过滤，
//!   include=supplier,location 预加载关联名称）
//! - POST /assets - 创建资产
//! - GET /assets/{id} - 获取资产详情
//! - PUT /assets/{id} - 更新资产
//! - DELETE /assets/{id} - 删除资产（软删除，资产编号可重新使用）

use crate::AppState;
use crate::utils::response::{bad_request_error, not_found_error, storage_error};
use crate::utils::{
    asset_to_dto, normalize_optional, normalize_required, page_request, page_to_dto, parse_id,
    parse_optional_id, parse_status, request_cancel, search_filter, split_includes,
};
use api_contract::{ApiResponse, AssetListQuery, CreateAssetRequest, UpdateAssetRequest};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{Asset, AssetField, AssetStatus, now_ms};
use fam_query::{Expr, PagedQuery, field};
use fam_storage::AssetUpdate;

#[derive(serde::Deserialize)]
pub struct AssetPath {
    asset_id: String,
}

/// 分页列出资产
pub async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<AssetListQuery>,
) -> Response {
    let page = match page_request(&state, query.page, query.page_size) {
        Ok(page) => page,
        Err(response) => return response,
    };
    let filter = match asset_filter(&query) {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let mut paged = PagedQuery::new(page).filter(filter).sort(query.sort);
    for relation in split_includes(query.include.as_deref()) {
        paged = paged.include(relation);
    }
    match state
        .asset_store
        .list_assets(paged, &request_cancel(&state))
        .await
    {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(page_to_dto(page, asset_to_dto))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

fn asset_filter(query: &AssetListQuery) -> Result<Option<Expr<AssetField>>, Response> {
    let mut parts = Vec::new();
    parts.extend(search_filter(query.search.as_deref(), AssetField::Name));
    if let Some(status) = query.status.as_deref().filter(|value| !value.trim().is_empty()) {
        parts.push(field(AssetField::Status).eq(parse_status(status)?.as_str()));
    }
    if let Some(id) = parse_optional_id(query.location_id.as_deref(), "locationId")? {
        parts.push(field(AssetField::LocationId).eq(id));
    }
    if let Some(id) = parse_optional_id(query.supplier_id.as_deref(), "supplierId")? {
        parts.push(field(AssetField::SupplierId).eq(id));
    }
    if let Some(id) = parse_optional_id(query.manufacturer_id.as_deref(), "manufacturerId")? {
        parts.push(field(AssetField::ManufacturerId).eq(id));
    }
    Ok(Expr::all(parts))
}

/// 创建资产
pub async fn create_asset(
    State(state): State<AppState>,
    Json(req): Json<CreateAssetRequest>,
) -> Response {
    let asset = match new_asset(req) {
        Ok(asset) => asset,
        Err(response) => return response,
    };
    match state.asset_store.create_asset(asset).await {
        Ok(asset) => (
            StatusCode::OK,
            Json(ApiResponse::success(asset_to_dto(asset))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

fn new_asset(req: CreateAssetRequest) -> Result<Asset, Response> {
    let name = normalize_required(req.name, "name")?;
    let asset_tag = normalize_required(req.asset_tag, "assetTag")?;
    let mut asset = Asset::new(name, asset_tag, now_ms());
    asset.serial_number = normalize_optional(req.serial_number, "serialNumber")?;
    asset.status = match req.status.as_deref() {
        Some(value) => parse_status(value)?,
        None => AssetStatus::Available,
    };
    asset.purchase_cost = req.purchase_cost;
    asset.purchase_date_ms = req.purchase_date;
    asset.supplier_id = parse_optional_id(req.supplier_id.as_deref(), "supplierId")?;
    asset.manufacturer_id = parse_optional_id(req.manufacturer_id.as_deref(), "manufacturerId")?;
    asset.location_id = parse_optional_id(req.location_id.as_deref(), "locationId")?;
    asset.assigned_to = parse_optional_id(req.assigned_to.as_deref(), "assignedTo")?;
    Ok(asset)
}

/// 获取资产详情
pub async fn get_asset(State(state): State<AppState>, Path(path): Path<AssetPath>) -> Response {
    let asset_id = match parse_id(&path.asset_id, "assetId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.asset_store.find_asset(asset_id).await {
        Ok(Some(asset)) => (
            StatusCode::OK,
            Json(ApiResponse::success(asset_to_dto(asset))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 更新资产（未提供的字段保持不变）
pub async fn update_asset(
    State(state): State<AppState>,
    Path(path): Path<AssetPath>,
    Json(req): Json<UpdateAssetRequest>,
) -> Response {
    let asset_id = match parse_id(&path.asset_id, "assetId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let update = match asset_update(req) {
        Ok(update) => update,
        Err(response) => return response,
    };
    match state.asset_store.update_asset(asset_id, update).await {
        Ok(Some(asset)) => (
            StatusCode::OK,
            Json(ApiResponse::success(asset_to_dto(asset))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

fn asset_update(req: UpdateAssetRequest) -> Result<AssetUpdate, Response> {
    let update = AssetUpdate {
        name: normalize_optional(req.name, "name")?,
        serial_number: normalize_optional(req.serial_number, "serialNumber")?,
        status: req.status.as_deref().map(parse_status).transpose()?,
        purchase_cost: req.purchase_cost,
        supplier_id: parse_optional_id(req.supplier_id.as_deref(), "supplierId")?,
        manufacturer_id: parse_optional_id(req.manufacturer_id.as_deref(), "manufacturerId")?,
        location_id: parse_optional_id(req.location_id.as_deref(), "locationId")?,
        assigned_to: parse_optional_id(req.assigned_to.as_deref(), "assignedTo")?,
    };
    let empty = update.name.is_none()
        && update.serial_number.is_none()
        && update.status.is_none()
        && update.purchase_cost.is_none()
        && update.supplier_id.is_none()
        && update.manufacturer_id.is_none()
        && update.location_id.is_none()
        && update.assigned_to.is_none();
    if empty {
        return Err(bad_request_error("empty update"));
    }
    Ok(update)
}

/// 删除资产
pub async fn delete_asset(State(state): State<AppState>, Path(path): Path<AssetPath>) -> Response {
    let asset_id = match parse_id(&path.asset_id, "assetId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.asset_store.delete_asset(asset_id).await {
        Ok(true) => (StatusCode::OK, Json(ApiResponse::success(()))).into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
