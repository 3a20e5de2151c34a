//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::application::error::GatewayError;
use crate::domain::completion::{CompletionRequest, CompletionResponse};
use crate::domain::humanize::Credential;
use crate::domain::state::OrchestrationState;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 외부 completion API 호출 포트.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: &Credential,
    ) -> Result<CompletionResponse, GatewayError>;
}

/// 설정에 맞는 게이트웨이를 생성하는 팩토리 포트.
pub trait GatewayFactory: Send + Sync {
    fn build(&self, config: &Config) -> Result<Box<dyn CompletionGateway>>;
}

/// 인증 값을 제공하는 개별 소스(환경변수, 로컬 파일, 세션 등).
pub trait CredentialSource: Send + Sync {
    /// 진단/로그용 이름(값은 절대 포함하지 않는다)
    fn label(&self) -> String;
    fn fetch(&self) -> Option<Credential>;
}

/// 우선순위 순서로 정렬된 인증 소스 목록을 구성하는 팩토리 포트.
pub trait CredentialSourceFactory: Send + Sync {
    fn build(&self, config: &Config) -> Vec<Box<dyn CredentialSource>>;
}

/// 세션 동안만 유지되는 인증 값 저장소.
pub trait SessionCredentialStore: Send + Sync {
    fn get(&self) -> Option<Credential>;
    fn put(&self, credential: Credential);
    fn clear(&self);
}

/// 사용자에게 인증 값을 직접 입력받는 포트. 거절하면 `None`.
pub trait CredentialPrompt: Send + Sync {
    fn ask(&self) -> Result<Option<Credential>>;
}

/// 상태 전이 구독 포트.
pub trait StateObserver: Send + Sync {
    fn state_changed(&self, state: &OrchestrationState);
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn step_status(&self, step: &str, status: &str, extra: Option<&str>);
    fn raw(&self, line: &str);
}

/// 시스템 클립보드 포트.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// 결과 텍스트 파일 내보내기 포트.
pub trait TextExporter: Send + Sync {
    fn export(&self, dir: &Path, text: &str) -> Result<PathBuf>;
}
