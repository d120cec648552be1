//! HTTP 요청 metrics middleware.
//!
//! 모든 HTTP 요청에 대해 메트릭을 수집합니다.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::warn;

use crate::metrics::{
    normalize_path, record_http_duration, record_http_request, record_http_response,
};

/// 느린 요청 경고 기준 (초).
const SLOW_REQUEST_SECS: f64 = 5.0;

/// HTTP 메트릭을 수집하는 미들웨어 레이어.
///
/// 각 요청에 대해 다음 메트릭을 기록합니다:
/// - `http_requests_total`: 총 요청 수 (method, path 라벨)
/// - `http_responses_total`: 총 응답 수 (method, path, status 라벨)
/// - `http_request_duration_seconds`: 요청 처리 시간 히스토그램
///
/// path 라벨은 라우트 템플릿(`/api/alphavantage/quote/{symbol}`)을 우선 사용하고,
/// 매칭되지 않은 요청은 숫자 세그먼트를 정규화한 경로를 사용합니다.
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().to_string();
    let path = route_label(&request);

    record_http_request(&method, &path);

    let response = next.run(request).await;

    let status = response.status();
    let duration = start.elapsed().as_secs_f64();

    record_http_response(&method, &path, status.as_u16());
    record_http_duration(&method, &path, duration);

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), "Request failed");
    } else if duration > SLOW_REQUEST_SECS {
        warn!(%method, %path, duration_secs = duration, "Slow request");
    }

    response
}

fn route_label(request: &Request) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => normalize_path(request.uri().path()),
    }
}
