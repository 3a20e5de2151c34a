//! Completion HTTP API 호출 공용 유틸리티.

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::application::error::GatewayError;

/// completion API 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout_secs: u64) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
/// 재시도는 하지 않는다.
pub async fn send_json(action: &str, request: RequestBuilder) -> Result<Value, GatewayError> {
    let started = Instant::now();
    let response = request.send().await.map_err(|err| {
        tracing::warn!(action, error = %err, "completion request did not complete");
        GatewayError::Transport(err.to_string())
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        GatewayError::Transport(format!("failed to read {action} response body: {err}"))
    })?;
    tracing::debug!(
        action,
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "completion response received"
    );

    if !status.is_success() {
        return Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|err| GatewayError::Decode(err.to_string()))
}
