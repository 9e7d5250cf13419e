//! 请求上下文中间件
//!
//! 每个请求带一组 request_id/trace_id：写入请求扩展、日志 span 与响应头。
//! 调用方传入合法的 `x-request-id` 时沿用，否则新生成。

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use fam_telemetry::{RequestIds, new_request_ids};
use tracing::{Instrument, info_span};

const REQUEST_ID: &str = "x-request-id";
const TRACE_ID: &str = "x-trace-id";

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = request_ids(req.headers());
    req.extensions_mut().insert(ids.clone());
    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %req.method(),
        path = %req.uri().path()
    );

    let mut response = next.run(req).instrument(span).await;
    let headers = response.headers_mut();
    for (name, value) in [(REQUEST_ID, &ids.request_id), (TRACE_ID, &ids.trace_id)] {
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(name, value);
        }
    }
    response
}

fn request_ids(headers: &HeaderMap) -> RequestIds {
    let mut ids = new_request_ids();
    let incoming = headers
        .get(REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= 128);
    if let Some(request_id) = incoming {
        ids.request_id = request_id.to_string();
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_request_id_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID, HeaderValue::from_static("client-42"));
        let ids = request_ids(&headers);
        assert_eq!(ids.request_id, "client-42");
        assert!(!ids.trace_id.is_empty());

        let ids = request_ids(&HeaderMap::new());
        assert_ne!(ids.request_id, "client-42");
    }
}
