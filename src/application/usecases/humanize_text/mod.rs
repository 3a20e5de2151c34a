//! 휴머나이즈 + 탐지 실행의 전체 오케스트레이션(상태 머신).

mod steps;

use crate::application::config::Config;
use crate::application::credentials::resolve_credential;
use crate::application::error::RunError;
use crate::application::ports::{
    ConfigRepository, CredentialPrompt, CredentialSourceFactory, GatewayFactory, Reporter,
    SessionCredentialStore, StateObserver,
};
use crate::domain::humanize::{Credential, DetectionRequest, RewriteRequest, RunOptions};
use crate::domain::state::OrchestrationState;

use steps::{RunPlan, run_detection, run_rewrite};

/// 오케스트레이터가 사용하는 포트 묶음.
pub struct HumanizePorts<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub gateway_factory: &'a dyn GatewayFactory,
    pub credential_sources: &'a dyn CredentialSourceFactory,
    pub session_store: &'a dyn SessionCredentialStore,
    pub credential_prompt: &'a dyn CredentialPrompt,
    pub observer: &'a dyn StateObserver,
    pub reporter: &'a dyn Reporter,
}

/// 폼 상태를 단독으로 소유하고, 재작성 -> 탐지 호출을 순차 실행한다.
/// 표시 계층은 `state()`로 읽기만 한다.
pub struct Orchestrator<'a> {
    ports: HumanizePorts<'a>,
    state: OrchestrationState,
}

impl<'a> Orchestrator<'a> {
    pub fn new(ports: HumanizePorts<'a>) -> Self {
        Self {
            ports,
            state: OrchestrationState::Idle,
        }
    }

    pub fn state(&self) -> &OrchestrationState {
        &self.state
    }

    /// 실행 진입점.
    /// 시작 조건(입력/인증)이 맞지 않으면 상태를 바꾸지 않고 `RunError`를 반환한다.
    /// 게이트웨이 실패는 오류가 아니라 `Failed` 상태로 기록된다.
    pub async fn start(&mut self, options: RunOptions) -> Result<(), RunError> {
        if self.state.is_processing() {
            return Err(RunError::AlreadyProcessing);
        }
        if options.text.trim().is_empty() {
            return Err(RunError::EmptyInput);
        }

        let config = self.ports.config_repo.load()?;
        let tone = options.tone.unwrap_or_else(|| config.tone());
        let temperature = options.temperature.unwrap_or_else(|| config.temperature());
        let rewrite = RewriteRequest::new(options.text.clone(), tone, temperature)?;
        let gateway = self.ports.gateway_factory.build(&config)?;
        let (credential, key_source) = self.acquire_credential(&config)?;

        let plan = RunPlan {
            detection: DetectionRequest::new(options.text),
            rewrite,
            language: config.language(),
            model: config.gateway.model(),
            max_tokens: config.gateway.max_tokens(),
            detection_temperature: config.gateway.detection_temperature(),
        };

        self.ports.reporter.section("Run");
        self.ports.reporter.kv("Tone", tone.code());
        self.ports.reporter.kv("Temperature", &format!("{temperature:.2}"));
        self.ports.reporter.kv("Model", &plan.model);
        self.ports.reporter.kv("API Key", &key_source);
        self.transition(OrchestrationState::Processing);

        let (humanized, mut usage) =
            match run_rewrite(&self.ports, gateway.as_ref(), &plan, &credential).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    self.transition(OrchestrationState::Failed {
                        message: err.to_string(),
                        humanized: None,
                    });
                    return Ok(());
                }
            };

        // 재작성 결과는 보존하되 실행 자체는 실패로 종료한다.
        let (detection, detection_usage) =
            match run_detection(&self.ports, gateway.as_ref(), &plan, &credential).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    self.transition(OrchestrationState::Failed {
                        message: err.to_string(),
                        humanized: Some(humanized),
                    });
                    return Ok(());
                }
            };
        usage.add_from(&detection_usage);

        self.transition(OrchestrationState::Completed {
            humanized,
            detection,
            usage,
        });
        Ok(())
    }

    /// 폼을 초기 상태로 되돌린다. 실행 중에는 무시된다.
    pub fn clear(&mut self) -> bool {
        if self.state.is_processing() {
            return false;
        }
        if self.state != OrchestrationState::Idle {
            self.transition(OrchestrationState::Idle);
        }
        true
    }

    /// 세션에 보관된 인증 값을 지운다(다음 실행에서 다시 입력받는다).
    pub fn forget_session_credential(&self) {
        self.ports.session_store.clear();
    }

    /// 인증 값과 출처 이름을 돌려준다. 출력은 호출 측 섹션 안에서 한다.
    fn acquire_credential(&self, config: &Config) -> Result<(Credential, String), RunError> {
        let sources = self.ports.credential_sources.build(config);
        if let Some(resolved) = resolve_credential(&sources) {
            return Ok((resolved.credential, resolved.source));
        }

        let Some(credential) = self.ports.credential_prompt.ask()? else {
            return Err(RunError::CredentialDeclined);
        };
        self.ports.session_store.put(credential.clone());
        Ok((credential, "session (prompted)".to_string()))
    }

    fn transition(&mut self, next: OrchestrationState) {
        tracing::debug!(from = self.state.label(), to = next.label(), "state transition");
        self.state = next;
        self.ports.observer.state_changed(&self.state);
    }
}
