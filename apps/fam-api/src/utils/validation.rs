//! 输入验证辅助函数
//!
//! - normalize_required：必填字段去除空格并检查非空
//! - normalize_optional：可选字段如果提供则去除空格并检查非空
//! - parse_id / parse_optional_id：路径与查询参数中的 UUID
//! - parse_status：资产状态
//!
//! 失败统一返回 bad_request_error 响应。

use crate::utils::response::bad_request_error;
use axum::response::Response;
use domain::AssetStatus;
use uuid::Uuid;

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

/// 验证可选字段，如果提供则去除空格并检查非空
pub fn normalize_optional(value: Option<String>, field: &str) -> Result<Option<String>, Response> {
    match value {
        Some(value) => normalize_required(value, field).map(Some),
        None => Ok(None),
    }
}

/// 解析 UUID
pub fn parse_id(value: &str, field: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(value.trim()).map_err(|_| bad_request_error(format!("invalid {field}")))
}

/// 解析可选 UUID（空串视为未提供）
pub fn parse_optional_id(value: Option<&str>, field: &str) -> Result<Option<Uuid>, Response> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => parse_id(value, field).map(Some),
        _ => Ok(None),
    }
}

/// 解析资产状态
pub fn parse_status(value: &str) -> Result<AssetStatus, Response> {
    AssetStatus::parse(value).ok_or_else(|| bad_request_error(format!("invalid status: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn required_fields_are_trimmed() {
        assert_eq!(
            normalize_required("  Laptop ".to_string(), "name").expect("name"),
            "Laptop"
        );
        let response = normalize_required("   ".to_string(), "name").expect_err("blank");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn optional_ids_ignore_blank_values() {
        assert_eq!(parse_optional_id(Some("  "), "locationId").expect("blank"), None);
        assert_eq!(parse_optional_id(None, "locationId").expect("none"), None);
        let id = Uuid::new_v4();
        assert_eq!(
            parse_optional_id(Some(&id.to_string()), "locationId").expect("id"),
            Some(id)
        );
        assert!(parse_optional_id(Some("abc"), "locationId").is_err());
    }

    #[test]
    fn status_must_be_known() {
        assert_eq!(parse_status("in_use").expect("status"), AssetStatus::InUse);
        assert!(parse_status("lost").is_err());
    }
}
