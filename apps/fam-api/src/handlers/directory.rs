//! 用户与角色 handlers（只读）
//!
//! - GET /users（active / roleId 过滤，search 匹配用户名）、GET /users/{id}
//! - GET /roles、GET /roles/{id}

use crate::AppState;
use crate::utils::response::{not_found_error, storage_error};
use crate::utils::{
    page_request, page_to_dto, parse_id, parse_optional_id, request_cancel, role_to_dto,
    search_filter, user_to_dto,
};
use api_contract::{ApiResponse, ListQuery, UserListQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{RoleField, UserField};
use fam_query::{Expr, PagedQuery, field};

#[derive(serde::Deserialize)]
pub struct UserPath {
    user_id: String,
}

#[derive(serde::Deserialize)]
pub struct RolePath {
    role_id: String,
}

/// 分页列出用户
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Response {
    let page = match page_request(&state, query.page, query.page_size) {
        Ok(page) => page,
        Err(response) => return response,
    };
    let role_id = match parse_optional_id(query.role_id.as_deref(), "roleId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mut parts = Vec::new();
    parts.extend(search_filter(query.search.as_deref(), UserField::Username));
    if let Some(active) = query.active {
        parts.push(field(UserField::IsActive).eq(active));
    }
    if let Some(role_id) = role_id {
        parts.push(field(UserField::RoleId).eq(role_id));
    }
    let paged = PagedQuery::new(page)
        .filter(Expr::all(parts))
        .sort(query.sort);
    match state
        .user_store
        .list_users(paged, &request_cancel(&state))
        .await
    {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(page_to_dto(page, user_to_dto))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 获取用户详情
pub async fn get_user(State(state): State<AppState>, Path(path): Path<UserPath>) -> Response {
    let user_id = match parse_id(&path.user_id, "userId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.user_store.find_user(user_id).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(user_to_dto(user))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 分页列出角色
pub async fn list_roles(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let page = match page_request(&state, query.page, query.page_size) {
        Ok(page) => page,
        Err(response) => return response,
    };
    let paged = PagedQuery::new(page)
        .filter(search_filter(query.search.as_deref(), RoleField::Name))
        .sort(query.sort);
    match state
        .role_store
        .list_roles(paged, &request_cancel(&state))
        .await
    {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(page_to_dto(page, role_to_dto))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 获取角色详情
pub async fn get_role(State(state): State<AppState>, Path(path): Path<RolePath>) -> Response {
    let role_id = match parse_id(&path.role_id, "roleId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.role_store.find_role(role_id).await {
        Ok(Some(role)) => (
            StatusCode::OK,
            Json(ApiResponse::success(role_to_dto(role))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
