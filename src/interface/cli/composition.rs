//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use crate::application::ports::{ConfigRepository, CredentialPrompt};
use crate::application::usecases::humanize_text::{HumanizePorts, Orchestrator};
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::result_actions::{CopyResultUseCase, ExportResultUseCase};
use crate::infrastructure::adapters::{
    ConsoleReporter, CredentialSourceFactoryAdapter, FileTextExporter, GatewayFactoryAdapter,
    InMemorySessionStore, JsonConfigRepository, NonInteractivePrompt, SystemClipboard,
    TerminalCredentialPrompt,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
/// 세션 인증 저장소는 이 컨테이너의 수명(= 프로세스 세션) 동안 유지된다.
pub struct AppComposition {
    config_repo: Box<dyn ConfigRepository>,
    gateway_factory: GatewayFactoryAdapter,
    credential_sources: CredentialSourceFactoryAdapter,
    session_store: Arc<InMemorySessionStore>,
    credential_prompt: Box<dyn CredentialPrompt>,
    reporter: ConsoleReporter,
    clipboard: SystemClipboard,
    exporter: FileTextExporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl AppComposition {
    /// `interactive`: 인증 키를 터미널에서 입력받을 수 있는지 여부
    /// `quiet`: 진행 출력을 끌지 여부(`--json`)
    pub fn new(interactive: bool, quiet: bool) -> Self {
        let prompt: Box<dyn CredentialPrompt> = if interactive {
            Box::new(TerminalCredentialPrompt)
        } else {
            Box::new(NonInteractivePrompt)
        };
        let reporter = if quiet {
            ConsoleReporter::silent()
        } else {
            ConsoleReporter::new()
        };
        Self::with_parts(Box::new(JsonConfigRepository), prompt, reporter)
    }

    /// 한 번 실행 후 종료하는 모드용. 클립보드 복사는 핸들 유지 시간까지 기다린다.
    pub fn one_shot(interactive: bool, quiet: bool) -> Self {
        Self {
            clipboard: SystemClipboard::hand_off(),
            ..Self::new(interactive, quiet)
        }
    }

    /// 설정 저장소/인증 입력/리포터를 외부에서 주입한다.
    pub fn with_parts(
        config_repo: Box<dyn ConfigRepository>,
        credential_prompt: Box<dyn CredentialPrompt>,
        reporter: ConsoleReporter,
    ) -> Self {
        let session_store = Arc::new(InMemorySessionStore::default());
        Self {
            config_repo,
            gateway_factory: GatewayFactoryAdapter,
            credential_sources: CredentialSourceFactoryAdapter::new(session_store.clone()),
            session_store,
            credential_prompt,
            reporter,
            clipboard: SystemClipboard::new(),
            exporter: FileTextExporter,
        }
    }

    /// 폼 상태를 소유하는 오케스트레이터를 생성한다(초기 상태 Idle).
    pub fn orchestrator(&self) -> Orchestrator<'_> {
        Orchestrator::new(HumanizePorts {
            config_repo: self.config_repo.as_ref(),
            gateway_factory: &self.gateway_factory,
            credential_sources: &self.credential_sources,
            session_store: self.session_store.as_ref(),
            credential_prompt: self.credential_prompt.as_ref(),
            observer: &self.reporter,
            reporter: &self.reporter,
        })
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: self.config_repo.as_ref(),
        }
    }

    /// 결과 복사 유스케이스를 생성한다.
    pub fn copy_result_usecase(&self) -> CopyResultUseCase<'_> {
        CopyResultUseCase {
            clipboard: &self.clipboard,
        }
    }

    /// 결과 파일 내보내기 유스케이스를 생성한다.
    pub fn export_result_usecase(&self) -> ExportResultUseCase<'_> {
        ExportResultUseCase {
            exporter: &self.exporter,
        }
    }
}
