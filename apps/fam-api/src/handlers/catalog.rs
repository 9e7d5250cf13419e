//! 目录数据 handlers：供应商、制造商、位置
//!
//! - GET /suppliers（active 过滤）、POST /suppliers、GET|DELETE /suppliers/{id}
//! - GET /manufacturers、POST /manufacturers、GET|DELETE /manufacturers/{id}
//! - GET /locations（parentId 过滤）、POST /locations、GET|DELETE /locations/{id}
//!
//! 删除均为软删除，名称在未删除的记录中唯一。

use crate::AppState;
use crate::utils::response::{not_found_error, storage_error};
use crate::utils::{
    location_to_dto, manufacturer_to_dto, normalize_optional, normalize_required, page_request,
    page_to_dto, parse_id, parse_optional_id, request_cancel, search_filter, supplier_to_dto,
};
use api_contract::{
    ApiResponse, CreateLocationRequest, CreateManufacturerRequest, CreateSupplierRequest,
    ListQuery, LocationListQuery, SupplierListQuery,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{
    Location, LocationField, Manufacturer, ManufacturerField, Supplier, SupplierField, now_ms,
};
use fam_query::{Expr, PagedQuery, field};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct SupplierPath {
    supplier_id: String,
}

#[derive(serde::Deserialize)]
pub struct ManufacturerPath {
    manufacturer_id: String,
}

#[derive(serde::Deserialize)]
pub struct LocationPath {
    location_id: String,
}

/// 分页列出供应商
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<SupplierListQuery>,
) -> Response {
    let page = match page_request(&state, query.page, query.page_size) {
        Ok(page) => page,
        Err(response) => return response,
    };
    let mut parts = Vec::new();
    parts.extend(search_filter(query.search.as_deref(), SupplierField::Name));
    if let Some(active) = query.active {
        parts.push(field(SupplierField::IsActive).eq(active));
    }
    let paged = PagedQuery::new(page)
        .filter(Expr::all(parts))
        .sort(query.sort);
    match state
        .supplier_store
        .list_suppliers(paged, &request_cancel(&state))
        .await
    {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(page_to_dto(page, supplier_to_dto))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 创建供应商
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(req): Json<CreateSupplierRequest>,
) -> Response {
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let contact_email = match normalize_optional(req.contact_email, "contactEmail") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let phone = match normalize_optional(req.phone, "phone") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let supplier = Supplier {
        id: Uuid::new_v4(),
        name,
        contact_email,
        phone,
        is_active: req.is_active.unwrap_or(true),
        created_at_ms: now_ms(),
    };
    match state.supplier_store.create_supplier(supplier).await {
        Ok(supplier) => (
            StatusCode::OK,
            Json(ApiResponse::success(supplier_to_dto(supplier))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 获取供应商详情
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(path): Path<SupplierPath>,
) -> Response {
    let supplier_id = match parse_id(&path.supplier_id, "supplierId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.supplier_store.find_supplier(supplier_id).await {
        Ok(Some(supplier)) => (
            StatusCode::OK,
            Json(ApiResponse::success(supplier_to_dto(supplier))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除供应商
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(path): Path<SupplierPath>,
) -> Response {
    let supplier_id = match parse_id(&path.supplier_id, "supplierId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.supplier_store.delete_supplier(supplier_id).await {
        Ok(true) => (StatusCode::OK, Json(ApiResponse::success(()))).into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 分页列出制造商
pub async fn list_manufacturers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let page = match page_request(&state, query.page, query.page_size) {
        Ok(page) => page,
        Err(response) => return response,
    };
    let paged = PagedQuery::new(page)
        .filter(search_filter(query.search.as_deref(), ManufacturerField::Name))
        .sort(query.sort);
    match state
        .manufacturer_store
        .list_manufacturers(paged, &request_cancel(&state))
        .await
    {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(page_to_dto(page, manufacturer_to_dto))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 创建制造商
pub async fn create_manufacturer(
    State(state): State<AppState>,
    Json(req): Json<CreateManufacturerRequest>,
) -> Response {
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let website = match normalize_optional(req.website, "website") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let manufacturer = Manufacturer {
        id: Uuid::new_v4(),
        name,
        website,
        created_at_ms: now_ms(),
    };
    match state
        .manufacturer_store
        .create_manufacturer(manufacturer)
        .await
    {
        Ok(manufacturer) => (
            StatusCode::OK,
            Json(ApiResponse::success(manufacturer_to_dto(manufacturer))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 获取制造商详情
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(path): Path<ManufacturerPath>,
) -> Response {
    let manufacturer_id = match parse_id(&path.manufacturer_id, "manufacturerId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state
        .manufacturer_store
        .find_manufacturer(manufacturer_id)
        .await
    {
        Ok(Some(manufacturer)) => (
            StatusCode::OK,
            Json(ApiResponse::success(manufacturer_to_dto(manufacturer))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除制造商
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(path): Path<ManufacturerPath>,
) -> Response {
    let manufacturer_id = match parse_id(&path.manufacturer_id, "manufacturerId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state
        .manufacturer_store
        .delete_manufacturer(manufacturer_id)
        .await
    {
        Ok(true) => (StatusCode::OK, Json(ApiResponse::success(()))).into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 分页列出位置
pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationListQuery>,
) -> Response {
    let page = match page_request(&state, query.page, query.page_size) {
        Ok(page) => page,
        Err(response) => return response,
    };
    let parent_id = match parse_optional_id(query.parent_id.as_deref(), "parentId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mut parts = Vec::new();
    parts.extend(search_filter(query.search.as_deref(), LocationField::Name));
    if let Some(parent_id) = parent_id {
        parts.push(field(LocationField::ParentId).eq(parent_id));
    }
    let paged = PagedQuery::new(page)
        .filter(Expr::all(parts))
        .sort(query.sort);
    match state
        .location_store
        .list_locations(paged, &request_cancel(&state))
        .await
    {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(page_to_dto(page, location_to_dto))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 创建位置（parentId 必须指向已存在的位置）
pub async fn create_location(
    State(state): State<AppState>,
    Json(req): Json<CreateLocationRequest>,
) -> Response {
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let address = match normalize_optional(req.address, "address") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let parent_id = match parse_optional_id(req.parent_id.as_deref(), "parentId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let location = Location {
        id: Uuid::new_v4(),
        name,
        address,
        parent_id,
        created_at_ms: now_ms(),
    };
    match state.location_store.create_location(location).await {
        Ok(location) => (
            StatusCode::OK,
            Json(ApiResponse::success(location_to_dto(location))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 获取位置详情
pub async fn get_location(
    State(state): State<AppState>,
    Path(path): Path<LocationPath>,
) -> Response {
    let location_id = match parse_id(&path.location_id, "locationId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.location_store.find_location(location_id).await {
        Ok(Some(location)) => (
            StatusCode::OK,
            Json(ApiResponse::success(location_to_dto(location))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除位置
pub async fn delete_location(
    State(state): State<AppState>,
    Path(path): Path<LocationPath>,
) -> Response {
    let location_id = match parse_id(&path.location_id, "locationId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.location_store.delete_location(location_id).await {
        Ok(true) => (StatusCode::OK, Json(ApiResponse::success(()))).into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, memory_state};

    fn supplier_request(name: &str, is_active: Option<bool>) -> CreateSupplierRequest {
        CreateSupplierRequest {
            name: name.to_string(),
            contact_email: None,
            phone: None,
            is_active,
        }
    }

    #[tokio::test]
    async fn suppliers_filter_by_active() {
        let state = memory_state();
        for (name, active) in [("Acme", None), ("Globex", Some(false)), ("Initech", Some(true))] {
            let response =
                create_supplier(State(state.clone()), Json(supplier_request(name, active))).await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let query = SupplierListQuery {
            active: Some(true),
            sort: Some("name".to_string()),
            ..SupplierListQuery::default()
        };
        let response = list_suppliers(State(state), Query(query)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["items"][0]["name"], "Acme");
        assert_eq!(body["data"]["items"][1]["name"], "Initech");
        assert_eq!(body["data"]["pageSize"], 20);
    }

    #[tokio::test]
    async fn supplier_name_is_reusable_after_delete() {
        let state = memory_state();
        let response =
            create_supplier(State(state.clone()), Json(supplier_request("Acme", None))).await;
        let body = body_json(response).await;
        let supplier_id = body["data"]["id"].as_str().expect("id").to_string();

        let response =
            create_supplier(State(state.clone()), Json(supplier_request("Acme", None))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = delete_supplier(
            State(state.clone()),
            Path(SupplierPath {
                supplier_id: supplier_id.clone(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = get_supplier(State(state.clone()), Path(SupplierPath { supplier_id })).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = create_supplier(State(state), Json(supplier_request("Acme", None))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn manufacturer_search_matches_name() {
        let state = memory_state();
        for name in ["Dell", "Lenovo", "Dell EMC"] {
            let req = CreateManufacturerRequest {
                name: name.to_string(),
                website: None,
            };
            let response = create_manufacturer(State(state.clone()), Json(req)).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
        let query = ListQuery {
            search: Some("Dell".to_string()),
            sort: Some("-name".to_string()),
            ..ListQuery::default()
        };
        let response = list_manufacturers(State(state), Query(query)).await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["items"][0]["name"], "Dell EMC");
    }

    #[tokio::test]
    async fn locations_require_existing_parent() {
        let state = memory_state();
        let req = CreateLocationRequest {
            name: "HQ".to_string(),
            address: Some("1 Main St".to_string()),
            parent_id: None,
        };
        let response = create_location(State(state.clone()), Json(req)).await;
        let body = body_json(response).await;
        let hq = body["data"]["id"].as_str().expect("id").to_string();

        let req = CreateLocationRequest {
            name: "Floor 2".to_string(),
            address: None,
            parent_id: Some(hq.clone()),
        };
        let response = create_location(State(state.clone()), Json(req)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let req = CreateLocationRequest {
            name: "Annex".to_string(),
            address: None,
            parent_id: Some(Uuid::new_v4().to_string()),
        };
        let response = create_location(State(state.clone()), Json(req)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let query = LocationListQuery {
            parent_id: Some(hq),
            ..LocationListQuery::default()
        };
        let response = list_locations(State(state), Query(query)).await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["name"], "Floor 2");
    }
}
