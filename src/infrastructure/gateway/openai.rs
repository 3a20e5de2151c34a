//! OpenAI 호환 `/chat/completions` 게이트웨이 어댑터.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::application::config::GatewayConfig;
use crate::application::error::GatewayError;
use crate::application::ports::CompletionGateway;
use crate::domain::completion::{CompletionRequest, CompletionResponse};
use crate::domain::humanize::Credential;

use super::api_runner::{build_api_client, send_json};

pub struct ChatCompletionGateway {
    client: Client,
    endpoint: Url,
}

impl ChatCompletionGateway {
    /// 설정의 api_base 뒤에 `chat/completions`를 붙여 엔드포인트를 고정한다.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let endpoint = chat_completions_endpoint(&config.api_base())?;
        Ok(Self {
            client: build_api_client(config.timeout_secs()),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionGateway for ChatCompletionGateway {
    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: &Credential,
    ) -> Result<CompletionResponse, GatewayError> {
        tracing::info!(
            endpoint = %self.endpoint,
            model = %request.model,
            temperature = request.temperature,
            "sending chat completion request"
        );
        let builder = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(credential.expose())
            .json(request);

        let raw = send_json("request chat completion", builder).await?;
        Ok(CompletionResponse::new(raw))
    }
}

fn chat_completions_endpoint(api_base: &str) -> Result<Url> {
    let trimmed = api_base.trim();
    // Url::join은 마지막 세그먼트를 대체하므로 base를 디렉터리 형태로 맞춘다.
    let base = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let base =
        Url::parse(&base).with_context(|| format!("invalid gateway.api_base: {api_base}"))?;
    base.join("chat/completions")
        .with_context(|| format!("failed to build completion endpoint from {api_base}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_version_segment() {
        let url = chat_completions_endpoint("https://api.openai.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");

        let slashed = chat_completions_endpoint("http://127.0.0.1:8080/").unwrap();
        assert_eq!(slashed.as_str(), "http://127.0.0.1:8080/chat/completions");
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(chat_completions_endpoint("not a url").is_err());
    }
}
