//! 재작성/탐지 호출 단계.

use std::time::Instant;

use crate::application::error::GatewayError;
use crate::application::ports::CompletionGateway;
use crate::application::usecases::humanize_text::HumanizePorts;
use crate::domain::completion::CompletionRequest;
use crate::domain::detection::{DetectionResult, extract_detection};
use crate::domain::humanize::{
    Credential, DetectionRequest, OutputLanguage, RewriteRequest, TokenUsage,
};
use crate::domain::policy::{build_detection_prompt, build_rewrite_prompt};

/// 한 번의 실행에 필요한 요청/모델 파라미터 묶음.
pub(super) struct RunPlan {
    pub rewrite: RewriteRequest,
    pub detection: DetectionRequest,
    pub language: OutputLanguage,
    pub model: String,
    pub max_tokens: u32,
    pub detection_temperature: f32,
}

/// 1차 호출: 원문을 재작성한다.
pub(super) async fn run_rewrite(
    ports: &HumanizePorts<'_>,
    gateway: &dyn CompletionGateway,
    plan: &RunPlan,
    credential: &Credential,
) -> Result<(String, TokenUsage), GatewayError> {
    let prompt = build_rewrite_prompt(&plan.rewrite, plan.language);
    let request = CompletionRequest::user_prompt(
        &plan.model,
        prompt,
        plan.rewrite.temperature(),
        plan.max_tokens,
    );

    let response = timed_step(ports, "rewrite", gateway.complete(&request, credential)).await?;
    if response.is_truncated() {
        tracing::warn!(
            max_tokens = plan.max_tokens,
            "rewrite stopped at the token limit; output is truncated"
        );
        ports.reporter.status(
            "Rewrite",
            &format!(
                "warning: output hit max_tokens ({}) and may be cut off; raise gateway.max_tokens",
                plan.max_tokens
            ),
        );
    }
    Ok((
        response.first_choice_text().trim().to_string(),
        response.usage(),
    ))
}

/// 2차 호출: 원문(재작성 결과가 아님)의 AI 작성 확률을 추정한다.
pub(super) async fn run_detection(
    ports: &HumanizePorts<'_>,
    gateway: &dyn CompletionGateway,
    plan: &RunPlan,
    credential: &Credential,
) -> Result<(DetectionResult, TokenUsage), GatewayError> {
    let prompt = build_detection_prompt(&plan.detection, plan.language);
    let request = CompletionRequest::user_prompt(
        &plan.model,
        prompt,
        plan.detection_temperature,
        plan.max_tokens,
    );

    let response = timed_step(ports, "detect", gateway.complete(&request, credential)).await?;
    Ok((
        extract_detection(response.first_choice_text()),
        response.usage(),
    ))
}

async fn timed_step<T>(
    ports: &HumanizePorts<'_>,
    step: &str,
    call: impl Future<Output = Result<T, GatewayError>>,
) -> Result<T, GatewayError> {
    ports.reporter.step_status(step, "running", None);
    let started = Instant::now();
    let result = call.await;
    let elapsed = format!("{:.1}s", started.elapsed().as_secs_f32());
    match &result {
        Ok(_) => ports.reporter.step_status(step, "done", Some(&elapsed)),
        Err(_) => ports.reporter.step_status(step, "error", Some(&elapsed)),
    }
    result
}
