#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use humanizer::application::config::Config;
use humanizer::application::error::GatewayError;
use humanizer::application::ports::{
    CompletionGateway, CredentialPrompt, GatewayFactory, Reporter, StateObserver,
};
use humanizer::domain::completion::{CompletionRequest, CompletionResponse};
use humanizer::domain::humanize::Credential;
use humanizer::domain::state::OrchestrationState;

/// 미리 정한 응답을 순서대로 돌려주고 요청을 기록하는 게이트웨이.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    script: Arc<Mutex<VecDeque<Result<CompletionResponse, GatewayError>>>>,
    requests: Arc<Mutex<Vec<(CompletionRequest, String)>>>,
}

impl ScriptedGateway {
    pub fn with_replies(replies: Vec<Result<&str, GatewayError>>) -> Self {
        let gateway = Self::default();
        {
            let mut script = gateway.script.lock().unwrap();
            for reply in replies {
                script.push_back(reply.map(chat_reply));
            }
        }
        gateway
    }

    /// 가공하지 않은 응답 본문을 스크립트 끝에 추가한다.
    pub fn push_response(&self, response: CompletionResponse) {
        self.script.lock().unwrap().push_back(Ok(response));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(CompletionRequest, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: &Credential,
    ) -> Result<CompletionResponse, GatewayError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), credential.expose().to_string()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("script exhausted".to_string())))
    }
}

pub struct ScriptedGatewayFactory(pub ScriptedGateway);

impl GatewayFactory for ScriptedGatewayFactory {
    fn build(&self, _config: &Config) -> Result<Box<dyn CompletionGateway>> {
        Ok(Box::new(self.0.clone()))
    }
}

pub fn chat_reply(content: &str) -> CompletionResponse {
    CompletionResponse::new(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    }))
}

/// 정해진 값을 돌려주며 호출 횟수를 센다.
pub struct CountingPrompt {
    answer: Option<String>,
    asked: AtomicUsize,
}

impl CountingPrompt {
    pub fn answering(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(str::to_string),
            asked: AtomicUsize::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl CredentialPrompt for CountingPrompt {
    fn ask(&self) -> Result<Option<Credential>> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.as_deref().and_then(Credential::new))
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    labels: Mutex<Vec<&'static str>>,
}

impl RecordingObserver {
    pub fn labels(&self) -> Vec<&'static str> {
        self.labels.lock().unwrap().clone()
    }
}

impl StateObserver for RecordingObserver {
    fn state_changed(&self, state: &OrchestrationState) {
        self.labels.lock().unwrap().push(state.label());
    }
}

/// 리포터 출력을 `section:`/`kv:`/`status:` 줄로 기록한다.
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.lines().iter().position(|line| line.starts_with(prefix))
    }

    fn record(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, name: &str) {
        self.record(format!("section:{name}"));
    }

    fn kv(&self, key: &str, value: &str) {
        self.record(format!("kv:{key}={value}"));
    }

    fn status(&self, scope: &str, message: &str) {
        self.record(format!("status:{scope}={message}"));
    }

    fn step_status(&self, step: &str, status: &str, _extra: Option<&str>) {
        self.record(format!("step:{step}={status}"));
    }

    fn raw(&self, line: &str) {
        self.record(format!("raw:{line}"));
    }
}

/// 환경변수/파일 소스가 비어 있도록 만든 설정.
pub fn isolated_config(inline_key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.gateway.api_key = inline_key.map(str::to_string);
    config.gateway.api_key_env = Some("HUMANIZER_TEST_UNSET_KEY_VAR".to_string());
    config.gateway.credential_file = Some(
        std::env::temp_dir()
            .join("humanizer-test-missing-credential")
            .display()
            .to_string(),
    );
    config
}
