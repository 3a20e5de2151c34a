//! 실행(폼) 상태 머신의 상태 값.

use serde::Serialize;

use crate::domain::detection::DetectionResult;
use crate::domain::humanize::TokenUsage;

/// `Idle -> Processing -> {Completed | Failed} -> Idle`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrchestrationState {
    #[default]
    Idle,
    Processing,
    Completed {
        humanized: String,
        detection: DetectionResult,
        usage: TokenUsage,
    },
    Failed {
        message: String,
        /// 재작성은 성공했지만 탐지가 실패한 경우 보존되는 재작성 결과
        humanized: Option<String>,
    },
}

impl OrchestrationState {
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }

    /// 복사/내보내기 대상 텍스트.
    pub fn humanized_text(&self) -> Option<&str> {
        match self {
            Self::Completed { humanized, .. } => Some(humanized),
            Self::Failed {
                humanized: Some(humanized),
                ..
            } => Some(humanized),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
        }
    }
}
