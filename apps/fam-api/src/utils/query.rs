//! 列表查询参数 → 分页查询
//!
//! 分页坐标在进入查询引擎前校验：page ≥ 1，1 ≤ pageSize ≤ 上限。
//! `search` 统一编译为名称包含（区分大小写）。

use crate::AppState;
use crate::utils::response::bad_request_error;
use axum::response::Response;
use fam_query::{CancellationToken, DomainField, Expr, PageRequest, field};

/// 校验分页坐标，未提供时使用第 1 页与默认页大小
pub fn page_request(
    state: &AppState,
    page: Option<u32>,
    page_size: Option<u32>,
) -> Result<PageRequest, Response> {
    let page = page.unwrap_or(1);
    let page_size = page_size.unwrap_or(state.default_page_size);
    if page_size > state.max_page_size {
        return Err(bad_request_error(format!(
            "pageSize must be at most {}",
            state.max_page_size
        )));
    }
    PageRequest::new(page, page_size).map_err(|err| bad_request_error(err.to_string()))
}

/// 搜索词 → 字段包含条件（空白搜索词忽略）
pub fn search_filter<F: DomainField>(search: Option<&str>, target: F) -> Option<Expr<F>> {
    let text = search.map(str::trim).filter(|text| !text.is_empty())?;
    Some(field(target).contains(text))
}

/// 逗号分隔的预加载关联
pub fn split_includes(include: Option<&str>) -> Vec<String> {
    include
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// 请求级取消令牌，进程退出时触发
pub fn request_cancel(state: &AppState) -> CancellationToken {
    state.shutdown.child_token()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use fam_config::AppConfig;

    fn state() -> AppState {
        let config = AppConfig {
            default_page_size: 10,
            max_page_size: 50,
            ..AppConfig::default()
        };
        AppState::in_memory(&config).expect("state")
    }

    #[test]
    fn page_defaults_and_bounds() {
        let state = state();
        let page = page_request(&state, None, None).expect("defaults");
        assert_eq!((page.page(), page.page_size()), (1, 10));

        let page = page_request(&state, Some(3), Some(50)).expect("max");
        assert_eq!(page.skip(), 100);

        for (page, size) in [(Some(0), None), (None, Some(0)), (None, Some(51))] {
            let response = page_request(&state, page, size).expect_err("invalid");
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn blank_search_is_ignored() {
        assert!(search_filter(Some("  "), domain::AssetField::Name).is_none());
        assert!(search_filter(None, domain::AssetField::Name).is_none());
        assert_eq!(
            search_filter(Some(" lap "), domain::AssetField::Name),
            Some(Expr::Text(
                domain::AssetField::Name,
                fam_query::TextOp::Contains,
                "lap".to_string()
            ))
        );
    }

    #[test]
    fn includes_are_split_and_trimmed() {
        assert_eq!(
            split_includes(Some("supplier, location,,")),
            vec!["supplier".to_string(), "location".to_string()]
        );
        assert!(split_includes(None).is_empty());
    }
}
