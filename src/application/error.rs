//! 실행 시작 거부/게이트웨이 오류 타입.

use thiserror::Error;

use crate::domain::humanize::RequestError;

/// 상태 전이 없이 사용자에게 안내만 하는 실행 거부 사유.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("enter some text to humanize first")]
    EmptyInput,

    #[error("temperature must be between 0 and 1 (got {0})")]
    InvalidTemperature(f32),

    #[error("a run is already in progress")]
    AlreadyProcessing,

    #[error("no API key supplied; run cancelled")]
    CredentialDeclined,

    #[error(transparent)]
    Setup(#[from] anyhow::Error),
}

impl From<RequestError> for RunError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::EmptyText => Self::EmptyInput,
            RequestError::TemperatureOutOfRange(value) => Self::InvalidTemperature(value),
        }
    }
}

/// completion API 호출 실패. 메시지는 그대로 사용자에게 노출된다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("completion request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to reach completion endpoint: {0}")]
    Transport(String),

    #[error("invalid JSON response from completion endpoint: {0}")]
    Decode(String),
}
